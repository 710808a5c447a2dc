//! Screen features.
//!
//! Each screen owns its state, key handler, and render function. Key
//! handlers never touch tasks or effects directly: they return a
//! [`ScreenUpdate`] describing navigation and the requests to start, and
//! the reducer turns requests into tracked tasks.

pub mod auth;
pub mod form;
pub mod history;
pub mod home;
pub mod profile;
pub mod toast;

use std::path::PathBuf;

use gymtrack_core::api::Exercise;
use gymtrack_core::core::routes::Screen;

use crate::common::TaskKind;
use crate::toast::ToastKind;

/// Remote work a screen asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    SignIn {
        email: String,
        password: String,
    },
    SignUp {
        name: String,
        email: String,
        password: String,
    },
    LoadGroups,
    LoadExercises {
        group: String,
    },
    LoadHistory,
    UpdateProfile {
        name: String,
        old_password: Option<String>,
        password: Option<String>,
    },
    UploadAvatar {
        path: PathBuf,
    },
}

impl Request {
    pub fn kind(&self) -> TaskKind {
        match self {
            Request::SignIn { .. } => TaskKind::SignIn,
            Request::SignUp { .. } => TaskKind::SignUp,
            Request::LoadGroups => TaskKind::Groups,
            Request::LoadExercises { .. } => TaskKind::Exercises,
            Request::LoadHistory => TaskKind::History,
            Request::UpdateProfile { .. } => TaskKind::ProfileUpdate,
            Request::UploadAvatar { .. } => TaskKind::AvatarUpload,
        }
    }

    /// Submissions are dropped while one of the same kind is in flight;
    /// loads supersede the running one.
    pub fn is_submission(&self) -> bool {
        matches!(
            self,
            Request::SignIn { .. }
                | Request::SignUp { .. }
                | Request::UpdateProfile { .. }
                | Request::UploadAvatar { .. }
        )
    }
}

/// Non-request outcome of a screen key handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    Stay,
    Navigate(Screen),
    Notify(ToastKind, String),
    ShowExercise(Exercise),
}

#[derive(Debug)]
pub struct ScreenUpdate {
    pub action: ScreenAction,
    pub requests: Vec<Request>,
}

impl ScreenUpdate {
    fn new(action: ScreenAction) -> Self {
        Self {
            action,
            requests: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(ScreenAction::Stay)
    }

    pub fn navigate(screen: Screen) -> Self {
        Self::new(ScreenAction::Navigate(screen))
    }

    pub fn notify(kind: ToastKind, message: impl Into<String>) -> Self {
        Self::new(ScreenAction::Notify(kind, message.into()))
    }

    pub fn show_exercise(exercise: Exercise) -> Self {
        Self::new(ScreenAction::ShowExercise(exercise))
    }

    #[must_use]
    pub fn with_request(mut self, request: Request) -> Self {
        self.requests.push(request);
        self
    }
}
