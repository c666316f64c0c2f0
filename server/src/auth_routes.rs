use axum::{
    Form, Router,
    extract::State,
    http::{HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use cookie::{Cookie, SameSite};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use types::SESSION_COOKIE_NAME;

use crate::{GoBarberClient, session_cookie::encode_session};

const SIGN_IN_FAILED: &str = "Erro na autenticação, cheque as credenciais";

#[derive(Clone)]
pub struct AuthState {
    pub client: GoBarberClient,
    pub session_secret: SecretString,
    pub secure_cookies: bool,
}

pub fn auth_router(state: AuthState) -> Router {
    Router::new()
        .route("/auth/signin", post(sign_in))
        .route("/auth/signout", get(sign_out))
        .with_state(state)
}

#[derive(Deserialize)]
struct SignInForm {
    email: String,
    #[serde(deserialize_with = "crate::secret_string")]
    password: SecretString,
}

async fn sign_in(
    State(state): State<AuthState>,
    Form(form): Form<SignInForm>,
) -> Result<Response, AuthError> {
    let session = match state
        .client
        .create_session(&form.email, form.password.expose_secret())
        .await
    {
        Ok(session) => session,
        Err(error) => {
            tracing::warn!(%error, "sign-in failed");
            return Ok(Redirect::to(&sign_in_error_path(SIGN_IN_FAILED)).into_response());
        }
    };
    tracing::info!(user_id = %session.user.id, "signed in");

    let value = encode_session(&session, &state.session_secret).map_err(|error| {
        tracing::error!(%error, "failed to encode session cookie");
        AuthError::Session
    })?;

    let cookie = Cookie::build((SESSION_COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies)
        .build();

    with_cookie(Redirect::to("/dashboard"), cookie)
}

async fn sign_out() -> Result<Response, AuthError> {
    let cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::ZERO)
        .build();

    with_cookie(Redirect::to("/"), cookie)
}

fn with_cookie(redirect: Redirect, cookie: Cookie<'_>) -> Result<Response, AuthError> {
    let value = HeaderValue::from_str(&cookie.to_string()).map_err(|_| AuthError::Session)?;

    let mut response = redirect.into_response();
    response.headers_mut().insert(SET_COOKIE, value);
    Ok(response)
}

fn sign_in_error_path(message: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    format!("/?error={encoded}")
}

#[derive(Debug)]
enum AuthError {
    Session,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Session => (StatusCode::INTERNAL_SERVER_ERROR, "Session error").into_response(),
        }
    }
}
