//! WeatherHub API client with session-aware request handling.

use std::sync::Arc;

use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;
use weatherhub_auth::Session;

use crate::error::ClientError;
use crate::listener::{NoopListener, SessionListener};
use crate::types::{
    parse_error_body, Ack, ApiResult, AuthToken, CredentialsRequest, DataPayload, WeatherReport,
};

/// Client for the WeatherHub auth and weather endpoints.
///
/// Before each send the stored credential, if any, is attached as a bearer
/// header. A 401 clears the credential, notifies the [`SessionListener`] and
/// is still returned to the caller as [`ClientError::Unauthorized`].
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Arc<Client>,
    session: Session,
    listener: Arc<dyn SessionListener>,
}

impl ApiClient {
    /// Create a client for `base_url` backed by `session`.
    pub fn new(base_url: &str, session: Session) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last path segment unless it ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(concat!("weatherhub/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url,
            client: Arc::new(client),
            session,
            listener: Arc::new(NoopListener),
        })
    }

    /// Replace the listener invoked when the server rejects the credential.
    pub fn with_listener(mut self, listener: Arc<dyn SessionListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Register a new account. The returned token is not stored.
    #[instrument(skip(self, password), level = "info")]
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ApiResult<AuthToken>, ClientError> {
        let url = self.endpoint("auth/signup")?;
        let request = self
            .client
            .post(url)
            .json(&CredentialsRequest { email, password });
        self.send(request).await
    }

    /// Authenticate. Storing the returned token is up to the caller.
    #[instrument(skip(self, password), level = "info")]
    pub async fn signin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ApiResult<AuthToken>, ClientError> {
        let url = self.endpoint("auth/signin")?;
        let request = self
            .client
            .post(url)
            .json(&CredentialsRequest { email, password });
        self.send(request).await
    }

    /// Tell the server the session is ending. The local credential is left
    /// in place.
    #[instrument(skip(self), level = "info")]
    pub async fn signout(&self) -> Result<ApiResult<Ack>, ClientError> {
        let url = self.endpoint("auth/signout")?;
        self.send(self.client.post(url)).await
    }

    /// Current weather at (`lat`, `lon`). Coordinates are passed through
    /// as-is; the request goes out even without a stored credential.
    #[instrument(skip(self), level = "info")]
    pub async fn get_current_weather(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<ApiResult<WeatherReport>, ClientError> {
        let url = self.endpoint("weather")?;
        let request = self.client.get(url).query(&[("lat", lat), ("lon", lon)]);
        let result: ApiResult<DataPayload<WeatherReport>> = self.send(request).await?;
        Ok(result.map(|payload| payload.data))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    /// Attach the headers every request carries, reading the credential now
    /// rather than at construction. Bodies get their content type from
    /// `RequestBuilder::json`. An unreadable store sends the request without
    /// a credential.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(header::ACCEPT, "application/json");

        match self.session.token() {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(e) => {
                tracing::warn!("Could not read stored credential, sending without it: {}", e);
                request
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiResult<T>, ClientError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            let text = response.text().await.unwrap_or_default();
            self.invalidate_session();
            return Err(ClientError::Unauthorized {
                error: parse_error_body(&text),
            });
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!("API error ({}): {}", status, text);
            return Err(ClientError::Status {
                status: status.as_u16(),
                error: parse_error_body(&text),
            });
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))?;

        let result = ApiResult::from_value(value)
            .map_err(|e| ClientError::InvalidResponse(format!("Unexpected payload: {}", e)))?;

        if let Some(message) = result.error_message() {
            tracing::info!("API reported failure: {}", message);
        }
        Ok(result)
    }

    fn invalidate_session(&self) {
        if let Err(e) = self.session.clear_token() {
            tracing::error!("Failed to clear credential after 401: {}", e);
        }
        tracing::warn!("Credential rejected by server; session invalidated");
        self.listener.session_invalidated();
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use weatherhub_auth::MemoryStore;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session() -> Session {
        Session::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/api", session()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
        assert_eq!(
            client.endpoint("auth/signin").unwrap().as_str(),
            "http://localhost:8080/api/auth/signin"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ApiClient::new("not a url", session());
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_signin_posts_credentials() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/signin"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({
                "email": "a@b.com",
                "password": "secret"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "token": "abc"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri(), session()).unwrap();
        let result = client.signin("a@b.com", "secret").await.unwrap();

        assert_eq!(result.into_success().unwrap().token, "abc");
        // The client itself never stores the token.
        assert_eq!(client.session().token().unwrap(), None);
    }

    #[tokio::test]
    async fn test_signout_sends_bearer() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/signout"))
            .and(header("Authorization", "Bearer abc"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let session = session();
        session.set_token("abc").unwrap();
        let client = ApiClient::new(&mock_server.uri(), session).unwrap();

        let result = client.signout().await.unwrap();
        assert!(result.is_success());
        assert_eq!(client.session().token().unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_weather_query_params() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "23.45"))
            .and(query_param("lon", "46.68"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": {
                    "coordinates": {"lat": 23.45, "lon": 46.68},
                    "tempC": 30,
                    "humidity": 40,
                    "description": "clear"
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri(), session()).unwrap();
        let report = client
            .get_current_weather(23.45, 46.68)
            .await
            .unwrap()
            .into_success()
            .unwrap();

        assert_eq!(report.description, "clear");
        assert_eq!(report.coordinates.lon, 46.68);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_token_and_notifies() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "success": false,
                "error": {"message": "Token expired"}
            })))
            .mount(&mock_server)
            .await;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let session = session();
        session.set_token("stale").unwrap();

        let client = ApiClient::new(&mock_server.uri(), session)
            .unwrap()
            .with_listener(Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));

        let err = client.get_current_weather(1.0, 2.0).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), Some("Token expired"));
        assert_eq!(client.session().token().unwrap(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_other_status_is_rejected_without_cleanup() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/signup"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "success": false,
                "error": {"message": "Email already registered"}
            })))
            .mount(&mock_server)
            .await;

        let session = session();
        session.set_token("keep").unwrap();
        let client = ApiClient::new(&mock_server.uri(), session).unwrap();

        let err = client.signup("a@b.com", "secret").await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 409, .. }));
        assert_eq!(err.server_message(), Some("Email already registered"));
        assert_eq!(client.session().token().unwrap().as_deref(), Some("keep"));
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/signin"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri(), session()).unwrap();
        let err = client.signin("a@b.com", "secret").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }
}
