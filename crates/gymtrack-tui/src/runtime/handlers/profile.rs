use std::path::PathBuf;

use gymtrack_core::api::ApiClient;

use super::with_token;
use crate::common::TaskId;
use crate::events::UiEvent;

pub async fn update_profile(
    api: ApiClient,
    token: Option<String>,
    task: TaskId,
    name: String,
    old_password: Option<String>,
    password: Option<String>,
) -> UiEvent {
    let result = with_token(token, |token| {
        let name = name.clone();
        async move {
            api.update_profile(&token, &name, old_password.as_deref(), password.as_deref())
                .await
        }
    })
    .await;
    UiEvent::ProfileUpdated { task, name, result }
}

pub async fn upload_avatar(
    api: ApiClient,
    token: Option<String>,
    task: TaskId,
    path: PathBuf,
) -> UiEvent {
    let result =
        with_token(token, |token| async move { api.upload_avatar(&token, &path).await }).await;
    UiEvent::AvatarUploaded { task, result }
}
