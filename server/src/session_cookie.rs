//! Stateless session cookies: the session JSON, base64url encoded, followed
//! by an HMAC-SHA256 signature over the encoded payload.

use anyhow::Context;
use base64::prelude::*;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use types::{Result, SESSION_COOKIE_NAME, UserSession, err};

type HmacSha256 = Hmac<Sha256>;

pub fn encode_session(session: &UserSession, secret: &SecretString) -> Result<String> {
    let json = serde_json::to_string(session).context("failed to serialize session")?;
    let payload = BASE64_URL_SAFE_NO_PAD.encode(json.as_bytes());
    let signature = BASE64_URL_SAFE_NO_PAD.encode(sign(&payload, secret)?.finalize().into_bytes());

    Ok(format!("{}.{}", payload, signature))
}

pub fn decode_session(value: &str, secret: &SecretString) -> Result<UserSession> {
    let (payload, signature_b64) = value
        .split_once('.')
        .ok_or_else(|| err!("invalid session cookie format"))?;

    let signature = BASE64_URL_SAFE_NO_PAD
        .decode(signature_b64)
        .context("failed to decode session signature")?;
    sign(payload, secret)?
        .verify_slice(&signature)
        .map_err(|_| err!("session signature mismatch"))?;

    let bytes = BASE64_URL_SAFE_NO_PAD
        .decode(payload)
        .context("failed to decode session payload")?;
    let json = String::from_utf8(bytes).context("invalid UTF-8 in session")?;
    Ok(serde_json::from_str(&json).context("failed to parse session JSON")?)
}

/// Find the session cookie in a `Cookie` request header.
pub fn find_session_cookie(cookie_header: &str) -> Option<&str> {
    let prefix = format!("{}=", SESSION_COOKIE_NAME);
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
}

fn sign(payload: &str, secret: &SecretString) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .map_err(|_| err!("invalid session secret"))?;
    mac.update(payload.as_bytes());
    Ok(mac)
}
