use std::sync::Arc;

use gymtrack_core::api::ApiClient;
use gymtrack_core::core::session::SessionHolder;

use crate::common::TaskId;
use crate::events::UiEvent;

/// Signs in through the session holder. Success reaches the screens as a
/// session change; the event only settles the task.
pub async fn sign_in(
    session: Arc<SessionHolder>,
    task: TaskId,
    email: String,
    password: String,
) -> UiEvent {
    let result = session.sign_in(&email, &password).await;
    UiEvent::SignInFinished { task, result }
}

/// Creates the account, then signs in with the same credentials.
pub async fn sign_up(
    api: ApiClient,
    session: Arc<SessionHolder>,
    task: TaskId,
    name: String,
    email: String,
    password: String,
) -> UiEvent {
    let result = match api.create_user(&name, &email, &password).await {
        Ok(()) => session
            .sign_in(&email, &password)
            .await
            .map(|_| ())
            .map_err(|err| err.message),
        Err(err) => {
            tracing::info!(error = %err, details = ?err.details, "sign-up failed");
            Err(err.message)
        }
    };
    UiEvent::SignUpFinished { task, result }
}
