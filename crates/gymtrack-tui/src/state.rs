//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── session: SessionState  (last snapshot pushed by the holder)
//! │   ├── screens: Screens       (mounted screen group + screen-local state)
//! │   ├── task_seq / tasks       (async task bookkeeping)
//! │   └── toast                  (transient notification)
//! └── overlay: Option<Overlay>   (modal overlays)
//! ```
//!
//! `screens` is always the group the route selector picks for `session`;
//! the reducer remounts it whenever that choice changes.

use std::time::Duration;

use gymtrack_core::core::routes::{self, AppRoute, AuthRoute, RouteTree, Screen};
use gymtrack_core::core::session::SessionState;

use crate::auth::{SignInState, SignUpState};
use crate::common::{TaskSeq, Tasks};
use crate::history::HistoryState;
use crate::home::HomeState;
use crate::overlays::Overlay;
use crate::profile::ProfileState;
use crate::toast::Toast;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(session: SessionState, toast_duration: Duration) -> Self {
        Self {
            tui: TuiState::new(session, toast_duration),
            overlay: None,
        }
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    pub should_quit: bool,
    pub session: SessionState,
    pub screens: Screens,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub toast: Option<Toast>,
    pub toast_duration: Duration,
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(session: SessionState, toast_duration: Duration) -> Self {
        let screens = Screens::mount(routes::select(&session), &session);
        Self {
            should_quit: false,
            session,
            screens,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            toast: None,
            toast_duration,
            spinner_frame: 0,
        }
    }
}

/// The mounted screen group. Each variant holds the screen-local state of
/// every screen in that group; remounting discards all of it.
#[derive(Debug)]
pub enum Screens {
    Auth(AuthScreens),
    App(AppScreens),
}

#[derive(Debug, Default)]
pub struct AuthScreens {
    pub route: AuthRoute,
    pub sign_in: SignInState,
    pub sign_up: SignUpState,
}

#[derive(Debug)]
pub struct AppScreens {
    pub route: AppRoute,
    pub home: HomeState,
    pub history: HistoryState,
    pub profile: ProfileState,
}

impl Screens {
    /// Fresh state for `tree`, showing its initial screen.
    pub fn mount(tree: RouteTree, session: &SessionState) -> Self {
        match tree.initial_screen() {
            Screen::Auth(route) => Screens::Auth(AuthScreens {
                route,
                ..AuthScreens::default()
            }),
            Screen::App(route) => Screens::App(AppScreens {
                route,
                home: HomeState::default(),
                history: HistoryState::default(),
                profile: ProfileState::new(session.user()),
            }),
        }
    }

    pub fn tree(&self) -> RouteTree {
        match self {
            Screens::Auth(_) => RouteTree::Auth,
            Screens::App(_) => RouteTree::App,
        }
    }

    pub fn current(&self) -> Screen {
        match self {
            Screens::Auth(auth) => Screen::Auth(auth.route),
            Screens::App(app) => Screen::App(app.route),
        }
    }
}

#[cfg(test)]
mod tests {
    use gymtrack_core::api::User;
    use gymtrack_core::core::session::Session;

    use super::*;

    #[test]
    fn test_initial_state_mounts_auth_group() {
        let state = AppState::new(SessionState::Unauthenticated, Duration::from_secs(1));
        assert_eq!(state.tui.screens.current(), Screen::Auth(AuthRoute::SignIn));
    }

    #[test]
    fn test_mount_app_prefills_profile() {
        let session = SessionState::Authenticated(Session {
            user: User {
                id: "1".into(),
                name: "Ana".into(),
                email: "ana@gym.com".into(),
                avatar: None,
            },
            token: "t".into(),
        });
        let Screens::App(app) = Screens::mount(RouteTree::App, &session) else {
            panic!("expected app screens");
        };
        assert_eq!(app.route, AppRoute::Home);
        assert_eq!(
            app.profile.form.value(gymtrack_core::forms::Field::Name),
            "Ana"
        );
    }
}
