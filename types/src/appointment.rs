use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub date: Timestamp,
    pub user: AppointmentUser,
}

/// The customer who booked an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentUser {
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl AppointmentUser {
    pub fn initial(&self) -> String {
        crate::user::initial(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_api_payload() {
        let appointments: Vec<Appointment> = serde_json::from_str(
            r#"[{
                "id": "7c1b6a8e-0b52-4c1e-9f1e-5d3a2f4b6c7d",
                "date": "2024-03-04T13:00:00.000Z",
                "user": { "name": "João", "avatar_url": "http://localhost:3333/files/a.png" }
            }]"#,
        )
        .unwrap();

        let appointment = &appointments[0];
        assert_eq!(appointment.id, "7c1b6a8e-0b52-4c1e-9f1e-5d3a2f4b6c7d");
        assert_eq!(appointment.date, "2024-03-04T13:00:00Z".parse::<Timestamp>().unwrap());
        assert_eq!(appointment.user.name, "João");
        assert_eq!(
            appointment.user.avatar_url.as_deref(),
            Some("http://localhost:3333/files/a.png")
        );
    }

    #[test]
    fn avatar_is_optional() {
        let appointment: Appointment = serde_json::from_str(
            r#"{"id":"1","date":"2024-03-04T09:00:00Z","user":{"name":"Ana","avatar_url":null}}"#,
        )
        .unwrap();

        assert_eq!(appointment.user.avatar_url, None);
    }

    #[test]
    fn customer_initial_matches_signed_in_user() {
        let customer = AppointmentUser {
            name: "élida".into(),
            avatar_url: None,
        };
        assert_eq!(customer.initial(), "É");
        assert_eq!(customer.initial(), crate::user::initial("élida"));

        let unnamed = AppointmentUser {
            name: String::new(),
            avatar_url: None,
        };
        assert_eq!(unnamed.initial(), "?");
    }
}
