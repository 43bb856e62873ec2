use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use tracing::debug;

use crate::application::ports::record_gateway::RecordGateway;
use crate::application::ports::session_gateway::{SessionGateway, UserSession};
use crate::domain::entities::{NewLabelRecord, PackageRecord};
use crate::shared::config::ApiConfig;
use crate::shared::error::AppError;

const NOT_AUTHENTICATED_MESSAGE: &str = "Not authenticated. Please sign in again.";

/// reqwest-backed client for the remote record store. Session cookies ride
/// along on every call.
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|err| AppError::Configuration(err.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RecordGateway for HttpApiClient {
    async fn create(&self, record: &NewLabelRecord) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.url("/api/pack-ids/from-label"))
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(map_create_failure(status, read_error_message(response).await))
    }

    async fn recent(
        &self,
        limit: usize,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<PackageRecord>, AppError> {
        let query = recent_query(limit, from, to);
        let response = self
            .http
            .get(self.url("/api/pack-ids/recent"))
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        map_recent_failure(status)
    }
}

#[async_trait]
impl SessionGateway for HttpApiClient {
    async fn current_user(&self) -> Result<Option<UserSession>, AppError> {
        let response = self.http.get(self.url("/api/app-users/me")).send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            _ => Err(AppError::Network(
                "Failed to fetch current user.".to_string(),
            )),
        }
    }

    fn login_url(&self) -> String {
        self.url("/oauth2/authorization/google")
    }

    fn logout_url(&self) -> String {
        self.url("/logout")
    }
}

/// A lapsed write session is a distinct, actionable failure; anything else
/// surfaces whatever the server said.
fn map_create_failure(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::UNAUTHORIZED {
        AppError::Unauthenticated(NOT_AUTHENTICATED_MESSAGE.to_string())
    } else {
        AppError::Network(message)
    }
}

/// A lapsed read session shows an empty history, not an error.
fn map_recent_failure(status: StatusCode) -> Result<Vec<PackageRecord>, AppError> {
    if status == StatusCode::UNAUTHORIZED {
        debug!("history query unauthenticated; treating as empty");
        Ok(vec![])
    } else {
        Err(AppError::Network(
            "Failed to load label history.".to_string(),
        ))
    }
}

fn recent_query(
    limit: usize,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<(&'static str, String)> {
    let mut query = vec![("limit", limit.to_string())];
    if let Some(from) = from {
        query.push(("from", from.to_rfc3339()));
    }
    if let Some(to) = to {
        query.push(("to", to.to_rfc3339()));
    }
    query
}

/// Best-effort extraction of a human-readable failure message: the JSON
/// `message`/`error` keys, then the raw body, then the status line.
async fn read_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
                let message = value
                    .get("message")
                    .and_then(|v| v.as_str())
                    .or_else(|| value.get("error").and_then(|v| v.as_str()));
                if let Some(message) = message {
                    return message.to_string();
                }
            }
            body
        }
        _ => format!("HTTP {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn recent_query_includes_only_present_bounds() {
        let from = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();

        let query = recent_query(200, Some(from), None);
        assert_eq!(query[0], ("limit", "200".to_string()));
        assert_eq!(query[1].0, "from");
        assert!(query[1].1.starts_with("2024-01-10T00:00:00"));
        assert_eq!(query.len(), 2);

        let query = recent_query(50, None, None);
        assert_eq!(query.len(), 1);
    }

    #[test]
    fn lapsed_write_session_maps_to_unauthenticated() {
        let err = map_create_failure(StatusCode::UNAUTHORIZED, "ignored body".to_string());
        match err {
            AppError::Unauthenticated(message) => {
                assert_eq!(message, "Not authenticated. Please sign in again.");
            }
            other => panic!("expected Unauthenticated, got {other:?}"),
        }

        let err = map_create_failure(StatusCode::BAD_REQUEST, "apartment is required".to_string());
        match err {
            AppError::Network(message) => assert_eq!(message, "apartment is required"),
            other => panic!("expected Network, got {other:?}"),
        }
    }

    #[test]
    fn lapsed_read_session_maps_to_an_empty_history() {
        assert!(map_recent_failure(StatusCode::UNAUTHORIZED).unwrap().is_empty());

        let err = map_recent_failure(StatusCode::INTERNAL_SERVER_ERROR).unwrap_err();
        match err {
            AppError::Network(message) => {
                assert_eq!(message, "Failed to load label history.");
            }
            other => panic!("expected Network, got {other:?}"),
        }
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = HttpApiClient::new(&ApiConfig {
            base_url: "http://localhost:8080/".to_string(),
        })
        .expect("client");
        assert_eq!(
            client.url("/api/pack-ids/recent"),
            "http://localhost:8080/api/pack-ids/recent"
        );
        assert_eq!(
            client.login_url(),
            "http://localhost:8080/oauth2/authorization/google"
        );
    }
}
