mod auth_routes;
mod config;
mod gobarber;
mod session_cookie;

use std::sync::OnceLock;

use axum::Router;
use axum::http::HeaderMap;
use dioxus::fullstack::FullstackContext;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use tracing_subscriber::EnvFilter;
use types::{Result, UserSession, err};

use crate::auth_routes::{AuthState, auth_router};
pub use crate::config::Config;
pub use crate::gobarber::GoBarberClient;
pub use crate::session_cookie::{decode_session, encode_session};

static CONFIG: OnceLock<Config> = OnceLock::new();
static GOBARBER: OnceLock<GoBarberClient> = OnceLock::new();

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Load configuration and build the sign-in routes.
pub async fn init() -> Result<Router> {
    let config = match CONFIG.get() {
        Some(config) => config,
        None => {
            let loaded = Config::load()?;
            CONFIG.get_or_init(|| loaded)
        }
    };
    let client = GOBARBER.get_or_init(|| GoBarberClient::new(config.api_url.clone()));
    tracing::info!(api_url = %config.api_url, "scheduling API configured");

    Ok(auth_router(AuthState {
        client: client.clone(),
        session_secret: config.session_secret.clone(),
        secure_cookies: config.secure_cookies,
    }))
}

pub fn config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| err!("server configuration has not been loaded"))
}

pub fn gobarber() -> Result<&'static GoBarberClient> {
    GOBARBER
        .get()
        .ok_or_else(|| err!("scheduling API client has not been initialised"))
}

/// Extract the user session from the request cookie.
pub async fn get_session_from_cookie() -> Result<UserSession> {
    let headers: HeaderMap = FullstackContext::extract()
        .await
        .map_err(|e| err!("failed to read request headers: {e:?}"))?;

    let cookie_header = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| err!("no cookies in request"))?;

    let value = session_cookie::find_session_cookie(cookie_header)
        .ok_or_else(|| err!("session cookie not found"))?;

    decode_session(value, &config()?.session_secret)
}

/// Require a signed-in user, returning the session if valid.
pub async fn require_session() -> Result<UserSession> {
    get_session_from_cookie().await.map_err(|e| {
        tracing::debug!(error = %e, "rejected request without a valid session");
        err!("not signed in")
    })
}

pub(crate) fn secret_string<'de, D>(deserializer: D) -> std::result::Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Into::into)
}
