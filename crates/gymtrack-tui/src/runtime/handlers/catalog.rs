use gymtrack_core::api::ApiClient;

use super::with_token;
use crate::common::TaskId;
use crate::events::UiEvent;

pub async fn load_groups(api: ApiClient, token: Option<String>, task: TaskId) -> UiEvent {
    let result = with_token(token, |token| async move { api.groups(&token).await }).await;
    UiEvent::GroupsLoaded { task, result }
}

pub async fn load_exercises(
    api: ApiClient,
    token: Option<String>,
    task: TaskId,
    group: String,
) -> UiEvent {
    let result = with_token(token, |token| {
        let group = group.clone();
        async move { api.exercises_by_group(&token, &group).await }
    })
    .await;
    UiEvent::ExercisesLoaded {
        task,
        group,
        result,
    }
}

pub async fn load_history(api: ApiClient, token: Option<String>, task: TaskId) -> UiEvent {
    let result = with_token(token, |token| async move { api.history(&token).await }).await;
    UiEvent::HistoryLoaded { task, result }
}
