//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).

use std::path::PathBuf;

use gymtrack_core::api::User;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    SignIn {
        task: TaskId,
        email: String,
        password: String,
    },
    SignUp {
        task: TaskId,
        name: String,
        email: String,
        password: String,
    },
    SignOut,
    /// Drop the session after the server rejected its token.
    ExpireSession,
    /// Replace the signed-in identity after a profile change.
    ReplaceUser(User),

    LoadGroups {
        task: TaskId,
    },
    LoadExercises {
        task: TaskId,
        group: String,
    },
    LoadHistory {
        task: TaskId,
    },
    UpdateProfile {
        task: TaskId,
        name: String,
        old_password: Option<String>,
        password: Option<String>,
    },
    UploadAvatar {
        task: TaskId,
        path: PathBuf,
    },
}
