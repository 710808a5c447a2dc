//! Route selection.
//!
//! Which screen group is mounted is a pure function of the session state.

use super::session::SessionState;

/// Top-level screen group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTree {
    /// Sign-in / sign-up.
    Auth,
    /// Home / history / profile.
    App,
}

/// Screens of the unauthenticated group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthRoute {
    #[default]
    SignIn,
    SignUp,
}

/// Screens of the authenticated group, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    History,
    Profile,
}

/// A concrete screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth(AuthRoute),
    App(AppRoute),
}

impl Screen {
    pub fn tree(self) -> RouteTree {
        match self {
            Screen::Auth(_) => RouteTree::Auth,
            Screen::App(_) => RouteTree::App,
        }
    }
}

/// Selects the screen group for `state`.
pub fn select(state: &SessionState) -> RouteTree {
    match state {
        SessionState::Unauthenticated => RouteTree::Auth,
        SessionState::Authenticated(_) => RouteTree::App,
    }
}

impl RouteTree {
    /// Screen shown when this group is (re)mounted.
    pub fn initial_screen(self) -> Screen {
        match self {
            RouteTree::Auth => Screen::Auth(AuthRoute::default()),
            RouteTree::App => Screen::App(AppRoute::default()),
        }
    }
}

impl AppRoute {
    pub const TABS: [AppRoute; 3] = [AppRoute::Home, AppRoute::History, AppRoute::Profile];

    pub fn title(self) -> &'static str {
        match self {
            AppRoute::Home => "Home",
            AppRoute::History => "History",
            AppRoute::Profile => "Profile",
        }
    }

    pub fn index(self) -> usize {
        match self {
            AppRoute::Home => 0,
            AppRoute::History => 1,
            AppRoute::Profile => 2,
        }
    }

    /// Next tab, wrapping around.
    pub fn next(self) -> Self {
        Self::TABS[(self.index() + 1) % Self::TABS.len()]
    }

    /// Previous tab, wrapping around.
    pub fn prev(self) -> Self {
        Self::TABS[(self.index() + Self::TABS.len() - 1) % Self::TABS.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::User;
    use crate::core::session::Session;

    fn authenticated() -> SessionState {
        SessionState::Authenticated(Session {
            user: User {
                id: "1".into(),
                name: "Ana".into(),
                email: "ana@gym.com".into(),
                avatar: None,
            },
            token: "t".into(),
        })
    }

    #[test]
    fn test_unauthenticated_selects_auth() {
        assert_eq!(select(&SessionState::Unauthenticated), RouteTree::Auth);
    }

    #[test]
    fn test_authenticated_selects_app() {
        assert_eq!(select(&authenticated()), RouteTree::App);
    }

    #[test]
    fn test_select_is_deterministic() {
        let state = authenticated();
        assert_eq!(select(&state), select(&state.clone()));
    }

    #[test]
    fn test_initial_screens() {
        assert_eq!(
            RouteTree::Auth.initial_screen(),
            Screen::Auth(AuthRoute::SignIn)
        );
        assert_eq!(RouteTree::App.initial_screen(), Screen::App(AppRoute::Home));
        assert_eq!(RouteTree::App.initial_screen().tree(), RouteTree::App);
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(AppRoute::Home.next(), AppRoute::History);
        assert_eq!(AppRoute::Profile.next(), AppRoute::Home);
        assert_eq!(AppRoute::Home.prev(), AppRoute::Profile);
        assert_eq!(AppRoute::History.prev(), AppRoute::Home);
    }
}
