use anyhow::Context;
use secrecy::SecretString;
use serde::Deserialize;
use types::Result;
use url::Url;

/// Server settings, read from an optional `gobarber.toml` and then from
/// `GOBARBER_*` environment variables.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Base URL of the scheduling API, e.g. `http://localhost:3333/`.
    pub api_url: Url,
    /// Key used to sign the session cookie.
    #[serde(deserialize_with = "crate::secret_string")]
    pub session_secret: SecretString,
    #[serde(default)]
    pub secure_cookies: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::with_name("gobarber").required(false))
                .add_source(config::Environment::with_prefix("GOBARBER")),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let config = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use secrecy::ExposeSecret;

    fn from_toml(toml: &str) -> Result<Config> {
        Config::from_builder(
            config::Config::builder().add_source(config::File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn reads_toml_with_defaults() {
        let config = from_toml(
            r#"
            api_url = "http://localhost:3333/"
            session_secret = "super-secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_url.as_str(), "http://localhost:3333/");
        assert_eq!(config.session_secret.expose_secret(), "super-secret");
        assert!(!config.secure_cookies);
    }

    #[test]
    fn missing_secret_is_an_error() {
        let result = from_toml(r#"api_url = "http://localhost:3333/""#);
        assert!(result.is_err());
    }
}
