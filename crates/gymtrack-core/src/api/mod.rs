//! HTTP client for the remote gym API.

mod errors;
mod types;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
pub use errors::{ApiError, ApiErrorKind, ApiResult, AuthError, AuthErrorKind};
use futures_util::future::BoxFuture;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
pub use types::{Exercise, HistoryDay, HistoryEntry, User};
use types::{
    AvatarResponse, CreateUserRequest, SignInRequest, SignInResponse, UpdateProfileRequest,
};

use crate::config::Config;
use crate::core::session::{Authenticator, Session};
use crate::forms;

/// Standard User-Agent header for gymtrack API requests.
pub const USER_AGENT: &str = concat!("gymtrack/", env!("CARGO_PKG_VERSION"));

const SIGN_IN_FAILED: &str = "Could not sign in. Try again later.";
const SIGN_UP_FAILED: &str = "Could not create the account. Try again later.";
const PROFILE_FAILED: &str = "Could not update the profile. Try again later.";
const AVATAR_FAILED: &str = "Could not update the photo. Try again later.";
const HISTORY_FAILED: &str = "Could not load the history.";
const GROUPS_FAILED: &str = "Could not load the exercise groups.";
const EXERCISES_FAILED: &str = "Could not load the exercises.";

/// Gym API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `base_url` (no trailing slash required).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { base_url, http })
    }

    /// Creates a client from the resolved config (env > config > default).
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.api_base_url()?;
        Self::new(base_url, config.api.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /sessions`: exchanges credentials for a user identity and token.
    ///
    /// # Errors
    /// Returns an `AuthError` for rejected credentials, transport failures or
    /// server errors.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        tracing::debug!(email, "POST /sessions");
        let request = self
            .http
            .post(self.url("/sessions"))
            .json(&SignInRequest { email, password });
        let response: SignInResponse = send_json(request, SIGN_IN_FAILED).await?;
        if !response.user.is_complete() || response.token.trim().is_empty() {
            return Err(AuthError::server(SIGN_IN_FAILED));
        }
        Ok(Session {
            user: response.user,
            token: response.token,
        })
    }

    /// `POST /users`: creates an account.
    ///
    /// # Errors
    /// Returns an `ApiError` with the server's message (e.g. email already in use).
    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> ApiResult<()> {
        tracing::debug!(email, "POST /users");
        let request = self.http.post(self.url("/users")).json(&CreateUserRequest {
            name,
            email,
            password,
        });
        send_empty(request, SIGN_UP_FAILED).await
    }

    /// `PUT /users`: updates name and, optionally, the password.
    ///
    /// # Errors
    /// Returns an `ApiError`; `Unauthorized` means the session has expired.
    pub async fn update_profile(
        &self,
        token: &str,
        name: &str,
        old_password: Option<&str>,
        password: Option<&str>,
    ) -> ApiResult<()> {
        tracing::debug!(changes_password = password.is_some(), "PUT /users");
        let request = self
            .http
            .put(self.url("/users"))
            .bearer_auth(token)
            .json(&UpdateProfileRequest {
                name,
                old_password,
                password,
            });
        send_empty(request, PROFILE_FAILED).await
    }

    /// `PATCH /users/avatar`: uploads a new profile photo.
    ///
    /// The file size is checked against the avatar limit before the file
    /// is read.
    /// Returns the avatar reference reported by the server, if any.
    ///
    /// # Errors
    /// Returns an `ApiError` when the file is unreadable or too large, or
    /// the upload fails.
    pub async fn upload_avatar(&self, token: &str, path: &Path) -> ApiResult<Option<String>> {
        let unreadable = |err: std::io::Error| {
            ApiError::invalid_input(format!("Could not read {}: {err}", path.display()))
        };
        let size = tokio::fs::metadata(path).await.map_err(unreadable)?.len();
        forms::check_avatar_size(size).map_err(|err| ApiError::invalid_input(err.message))?;
        let bytes = tokio::fs::read(path).await.map_err(unreadable)?;

        let file_name = path
            .file_name()
            .map_or_else(|| "avatar".to_string(), |n| n.to_string_lossy().to_string());
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(image_mime(path))
            .map_err(|err| ApiError::invalid_input(format!("Unsupported photo type: {err}")))?;
        let form = reqwest::multipart::Form::new().part("avatar", part);

        tracing::debug!(path = %path.display(), "PATCH /users/avatar");
        let request = self
            .http
            .patch(self.url("/users/avatar"))
            .bearer_auth(token)
            .multipart(form);
        let response: AvatarResponse = send_json(request, AVATAR_FAILED).await?;
        Ok(response.avatar)
    }

    /// `GET /history`: exercise history grouped by day.
    ///
    /// # Errors
    /// Returns an `ApiError`; `Unauthorized` means the session has expired.
    pub async fn history(&self, token: &str) -> ApiResult<Vec<HistoryDay>> {
        let request = self.http.get(self.url("/history")).bearer_auth(token);
        send_json(request, HISTORY_FAILED).await
    }

    /// `GET /groups`: exercise group names.
    ///
    /// # Errors
    /// Returns an `ApiError`; `Unauthorized` means the session has expired.
    pub async fn groups(&self, token: &str) -> ApiResult<Vec<String>> {
        let request = self.http.get(self.url("/groups")).bearer_auth(token);
        send_json(request, GROUPS_FAILED).await
    }

    /// `GET /exercises/bygroup/{group}`.
    ///
    /// # Errors
    /// Returns an `ApiError`; `Unauthorized` means the session has expired.
    pub async fn exercises_by_group(&self, token: &str, group: &str) -> ApiResult<Vec<Exercise>> {
        let mut url = url::Url::parse(&self.url("/exercises/bygroup/")).map_err(|err| {
            ApiError::invalid_input(format!("Invalid API URL: {err}"))
        })?;
        url.path_segments_mut()
            .map_err(|()| ApiError::invalid_input("Invalid API URL"))?
            .pop_if_empty()
            .push(group);
        let request = self.http.get(url).bearer_auth(token);
        send_json(request, EXERCISES_FAILED).await
    }
}

impl Authenticator for ApiClient {
    fn authenticate<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<Session, AuthError>> {
        Box::pin(self.sign_in(email, password))
    }
}

fn image_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// Sends the request and reads the body, mapping non-2xx to `ApiError`.
async fn send_raw(request: RequestBuilder, fallback: &str) -> ApiResult<String> {
    let response = request.send().await.map_err(|err| {
        tracing::warn!(error = %err, "request failed");
        ApiError::network(&err)
    })?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| ApiError::network(&err))?;

    if status.is_success() {
        Ok(body)
    } else {
        tracing::warn!(status = status.as_u16(), "API returned an error");
        Err(ApiError::from_status(status.as_u16(), &body, fallback))
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder, fallback: &str) -> ApiResult<T> {
    let body = send_raw(request, fallback).await?;
    serde_json::from_str(&body).map_err(|err| {
        tracing::warn!(error = %err, "unexpected response body");
        ApiError::parse(fallback, &err)
    })
}

async fn send_empty(request: RequestBuilder, fallback: &str) -> ApiResult<()> {
    send_raw(request, fallback).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(server.uri(), Some(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sessions"))
            .and(body_json(json!({"email": "a@b.com", "password": "secret1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {"id": 1, "name": "A", "email": "a@b.com", "avatar": null},
                "token": "tok-1",
                "refresh_token": "ref-1"
            })))
            .mount(&server)
            .await;

        let session = client(&server).sign_in("a@b.com", "secret1").await.unwrap();
        assert_eq!(session.user.id, "1");
        assert_eq!(session.user.email, "a@b.com");
        assert_eq!(session.token, "tok-1");
    }

    #[tokio::test]
    async fn test_sign_in_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sessions"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"status": "error", "message": "Wrong email or password."})),
            )
            .mount(&server)
            .await;

        let err = client(&server).sign_in("a@b.com", "wrong").await.unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::InvalidCredentials);
        assert_eq!(err.message, "Wrong email or password.");
    }

    #[tokio::test]
    async fn test_sign_in_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sessions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client(&server).sign_in("a@b.com", "x").await.unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::Server);
        assert_eq!(err.message, SIGN_IN_FAILED);
    }

    #[tokio::test]
    async fn test_sign_in_incomplete_identity_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {"id": "", "name": "A", "email": "a@b.com"},
                "token": "tok"
            })))
            .mount(&server)
            .await;

        let err = client(&server).sign_in("a@b.com", "x").await.unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::Server);
    }

    #[tokio::test]
    async fn test_sign_in_unreachable_server() {
        // Port 9 (discard) on localhost is closed in test environments.
        let api = ApiClient::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
        let err = api.sign_in("a@b.com", "x").await.unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::NetworkUnreachable);
    }

    #[tokio::test]
    async fn test_create_user_conflict_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "Email already in use."})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .create_user("A", "a@b.com", "secret1")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Status(400));
        assert_eq!(err.message, "Email already in use.");
    }

    #[tokio::test]
    async fn test_create_user_accepts_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        client(&server)
            .create_user("A", "a@b.com", "secret1")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_history_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/history"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"title": "22.07.24", "data": [
                    {"id": 1, "name": "Front pulldown", "group": "back", "hour": "08:00", "created_at": "2024-07-22 08:00:00"},
                    {"id": 2, "name": "One-arm row", "group": "back", "hour": "08:20", "created_at": "2024-07-22 08:20:00"}
                ]}
            ])))
            .mount(&server)
            .await;

        let days = client(&server).history("tok-1").await.unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].data.len(), 2);
        assert_eq!(days[0].data[1].name, "One-arm row");
    }

    #[tokio::test]
    async fn test_history_expired_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/history"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "token.expired"})))
            .mount(&server)
            .await;

        let err = client(&server).history("old").await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_history_bad_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/history"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server).history("tok").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Parse);
        assert_eq!(err.message, HISTORY_FAILED);
    }

    #[tokio::test]
    async fn test_exercises_by_group_encodes_group() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exercises/bygroup/upper%20back"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 3, "name": "Pull-up", "group": "upper back", "series": 3, "repetitions": 12}
            ])))
            .mount(&server)
            .await;

        let exercises = client(&server)
            .exercises_by_group("tok", "upper back")
            .await
            .unwrap();
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].series, 3);
    }

    #[tokio::test]
    async fn test_update_profile_without_password() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/users"))
            .and(body_json(json!({"name": "New Name"})))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        client(&server)
            .update_profile("tok", "New Name", None, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_avatar_rejects_large_file() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.png");
        std::fs::write(&path, vec![0u8; (forms::AVATAR_MAX_BYTES + 1) as usize]).unwrap();

        let err = client(&server)
            .upload_avatar("tok", &path)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InvalidInput);
        assert_eq!(err.message, forms::AVATAR_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_upload_avatar_missing_file_is_local_error() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        let err = client(&server)
            .upload_avatar("tok", &dir.path().join("missing.png"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InvalidInput);
        assert!(err.message.starts_with("Could not read"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let api = ApiClient::new("http://localhost:3333/", None).unwrap();
        assert_eq!(api.base_url(), "http://localhost:3333");
        assert_eq!(api.url("/users"), "http://localhost:3333/users");
    }

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime(Path::new("a.PNG")), "image/png");
        assert_eq!(image_mime(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(image_mime(Path::new("a")), "image/jpeg");
    }
}
