use anyhow::Context;
use jiff::civil::Date;
use reqwest::{Client, Method, RequestBuilder};
use secrecy::ExposeSecret;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use types::{
    Appointment, CurrentUser, MonthAvailabilityEntry, Result, UserSession, YearMonth, err,
};
use url::Url;

pub(crate) trait ReqwestExt {
    async fn try_send<T: DeserializeOwned>(self) -> Result<T>;
}

impl ReqwestExt for RequestBuilder {
    async fn try_send<T: DeserializeOwned>(self) -> Result<T> {
        let response = self.send().await.context("request to scheduling API failed")?;
        let url = response.url().clone();
        let response = response
            .error_for_status()
            .context("scheduling API returned an error status")?;
        let body = response
            .bytes()
            .await
            .context("failed to read scheduling API response")?;

        match serde_json::from_slice(&body) {
            Ok(r) => Ok(r),
            Err(error) => {
                // Bodies may carry personal data, so only the URL is logged.
                tracing::debug!(%url, %error, "failed to parse response");
                Err(anyhow::Error::new(error)
                    .context("malformed scheduling API response")
                    .into())
            }
        }
    }
}

/// Client for the barber-shop scheduling API.
#[derive(Clone)]
pub struct GoBarberClient {
    client: Client,
    base_url: Url,
}

impl GoBarberClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| err!("scheduling API URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);

        Ok(self.client.request(method, url))
    }

    fn get(&self, session: &UserSession, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self
            .request(Method::GET, segments)?
            .bearer_auth(session.token.expose_secret()))
    }

    /// Exchange credentials for an API token.
    pub async fn create_session(&self, email: &str, password: &str) -> Result<UserSession> {
        #[derive(Deserialize)]
        struct SessionResponse {
            user: CurrentUser,
            token: String,
        }

        let response: SessionResponse = self
            .request(Method::POST, &["sessions"])?
            .json(&json!({ "email": email, "password": password }))
            .try_send()
            .await?;

        Ok(UserSession {
            user: response.user,
            token: response.token.into(),
        })
    }

    pub async fn month_availability(
        &self,
        session: &UserSession,
        provider_id: &str,
        month: YearMonth,
    ) -> Result<Vec<MonthAvailabilityEntry>> {
        self.get(session, &["providers", provider_id, "month-availability"])?
            .query(&[("year", month.year()), ("month", i16::from(month.month()))])
            .try_send()
            .await
    }

    pub async fn my_appointments(&self, session: &UserSession, date: Date) -> Result<Vec<Appointment>> {
        self.get(session, &["appointments", "me"])?
            .query(&[
                ("year", date.year()),
                ("month", i16::from(date.month())),
                ("day", i16::from(date.day())),
            ])
            .try_send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::{Path, Query},
        http::{HeaderMap, StatusCode, header::AUTHORIZATION},
        routing::{get, post},
    };
    use jiff::civil::date;
    use serde_json::Value;
    use std::collections::HashMap;

    async fn spawn_api(router: Router) -> GoBarberClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        GoBarberClient::new(Url::parse(&format!("http://{addr}/")).unwrap())
    }

    fn session() -> UserSession {
        UserSession {
            user: CurrentUser {
                id: "provider-1".into(),
                name: "Diego".into(),
                email: "diego@example.com".into(),
                avatar_url: None,
            },
            token: "jwt".to_string().into(),
        }
    }

    fn bearer(headers: &HeaderMap) -> Option<String> {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    }

    #[tokio::test]
    async fn month_availability_sends_query_and_token() {
        let router = Router::new().route(
            "/providers/{id}/month-availability",
            get(
                |Path(id): Path<String>,
                 Query(params): Query<HashMap<String, String>>,
                 headers: HeaderMap| async move {
                    assert_eq!(id, "provider-1");
                    assert_eq!(params["year"], "2024");
                    assert_eq!(params["month"], "3");
                    assert_eq!(bearer(&headers).as_deref(), Some("Bearer jwt"));

                    Json(json!([
                        { "day": 1, "available": true },
                        { "day": 5, "available": false }
                    ]))
                },
            ),
        );
        let client = spawn_api(router).await;

        let entries = client
            .month_availability(&session(), "provider-1", YearMonth::new(2024, 3).unwrap())
            .await
            .unwrap();

        assert_eq!(
            entries,
            vec![
                MonthAvailabilityEntry { day: 1, available: true },
                MonthAvailabilityEntry { day: 5, available: false },
            ]
        );
    }

    #[tokio::test]
    async fn my_appointments_sends_full_date() {
        let router = Router::new().route(
            "/appointments/me",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["year"], "2024");
                assert_eq!(params["month"], "3");
                assert_eq!(params["day"], "4");

                Json(json!([{
                    "id": "a1",
                    "date": "2024-03-04T13:00:00.000Z",
                    "user": { "name": "Ana", "avatar_url": null }
                }]))
            }),
        );
        let client = spawn_api(router).await;

        let appointments = client
            .my_appointments(&session(), date(2024, 3, 4))
            .await
            .unwrap();

        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].id, "a1");
        assert_eq!(appointments[0].user.name, "Ana");
    }

    #[tokio::test]
    async fn create_session_returns_profile_and_token() {
        let router = Router::new().route(
            "/sessions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["email"], "diego@example.com");
                assert_eq!(body["password"], "123456");

                Json(json!({
                    "user": {
                        "id": "u1",
                        "name": "Diego",
                        "email": "diego@example.com",
                        "avatar_url": null,
                        "created_at": "2024-01-01T00:00:00.000Z"
                    },
                    "token": "issued-token"
                }))
            }),
        );
        let client = spawn_api(router).await;

        let session = client
            .create_session("diego@example.com", "123456")
            .await
            .unwrap();

        assert_eq!(session.user.id, "u1");
        assert_eq!(session.token.expose_secret(), "issued-token");
    }

    #[tokio::test]
    async fn error_status_is_an_error() {
        let router = Router::new().route(
            "/appointments/me",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "message": "JWT token is missing" }))) }),
        );
        let client = spawn_api(router).await;

        let error = client
            .my_appointments(&session(), date(2024, 3, 4))
            .await
            .unwrap_err();

        assert!(error.message.contains("error status"));
    }

    #[tokio::test]
    async fn malformed_payload_is_an_error() {
        let router = Router::new().route(
            "/appointments/me",
            get(|| async { Json(json!([{ "id": "a1" }])) }),
        );
        let client = spawn_api(router).await;

        let error = client
            .my_appointments(&session(), date(2024, 3, 4))
            .await
            .unwrap_err();

        assert!(error.message.contains("malformed"));
    }

    #[tokio::test]
    async fn keeps_base_path_prefix() {
        let router = Router::new().route(
            "/v1/appointments/me",
            get(|| async { Json(json!([])) }),
        );
        let client = spawn_api(router).await;
        let prefixed = GoBarberClient::new(client.base_url.join("v1").unwrap());

        let appointments = prefixed
            .my_appointments(&session(), date(2024, 3, 4))
            .await
            .unwrap();

        assert!(appointments.is_empty());
    }
}
