//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return `UiEvent`. The runtime
//! spawns them with `spawn_effect` and sends results to the inbox. They
//! never touch `AppState`.
//!
//! ```ignore
//! // Handler: pure async, returns UiEvent
//! pub async fn load_history(api: ApiClient, token: Option<String>, task: TaskId) -> UiEvent { ... }
//!
//! // Runtime: spawns and sends to inbox
//! self.spawn_effect(move || handlers::load_history(api, token, task));
//! ```

pub mod auth;
pub mod catalog;
pub mod profile;

pub use auth::*;
pub use catalog::*;
pub use profile::*;

use gymtrack_core::api::{ApiError, ApiErrorKind, ApiResult};

/// Runs `call` with the session token, or fails as unauthorized when the
/// session ended before the effect ran.
async fn with_token<T, F, Fut>(token: Option<String>, call: F) -> ApiResult<T>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    match token {
        Some(token) => call(token).await,
        None => Err(ApiError::new(
            ApiErrorKind::Unauthorized,
            crate::update::SESSION_EXPIRED,
        )),
    }
}
