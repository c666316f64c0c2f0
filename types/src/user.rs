use secrecy::SecretString;
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE_NAME: &str = "gobarber_session";

/// Public profile of the signed-in user. Safe to hand to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl CurrentUser {
    pub fn initial(&self) -> String {
        initial(&self.name)
    }
}

/// Upper-cased first letter of `name`, shown when there is no avatar.
pub fn initial(name: &str) -> String {
    name.chars().next().unwrap_or('?').to_uppercase().to_string()
}

/// Server-side session: the profile plus the API bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub user: CurrentUser,
    #[serde(with = "secret_string")]
    pub token: SecretString,
}

mod secret_string {
    use secrecy::SecretString;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use secrecy::ExposeSecret;
        serializer.serialize_str(secret.expose_secret())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn session_round_trips_token() {
        let session = UserSession {
            user: CurrentUser {
                id: "u1".into(),
                name: "Diego".into(),
                email: "diego@example.com".into(),
                avatar_url: None,
            },
            token: "jwt-token".to_string().into(),
        };

        let json = serde_json::to_string(&session).unwrap();
        let decoded: UserSession = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.user, session.user);
        assert_eq!(decoded.token.expose_secret(), "jwt-token");
    }

    #[test]
    fn initial_is_uppercased() {
        let user = CurrentUser {
            id: "u1".into(),
            name: "ana".into(),
            email: "ana@example.com".into(),
            avatar_url: None,
        };
        assert_eq!(user.initial(), "A");
    }
}
