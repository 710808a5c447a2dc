//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gymtrack_core::api::ApiError;
use gymtrack_core::core::routes::{self, AppRoute, AuthRoute, Screen};
use gymtrack_core::core::session::SessionState;

use crate::auth::{SignInState, SignUpState};
use crate::common::{TaskId, TaskKind, Tasks};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::{Request, ScreenAction, ScreenUpdate};
use crate::overlays::{ExerciseState, Overlay, OverlayTransition, SignOutState};
use crate::profile::ProfileState;
use crate::state::{AppScreens, AppState, Screens, TuiState};
use crate::toast::{Toast, ToastKind};

pub const SESSION_EXPIRED: &str = "Your session has expired. Sign in again.";

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            if app
                .tui
                .toast
                .as_ref()
                .is_some_and(|t| t.is_expired(Instant::now()))
            {
                app.tui.toast = None;
            }
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::SessionChanged(session) => handle_session_changed(app, session),
        UiEvent::SignInFinished { task, result } => {
            if !finish(&mut app.tui.tasks, TaskKind::SignIn, task) {
                return vec![];
            }
            match &mut app.tui.screens {
                Screens::Auth(auth) => {
                    let update = auth.sign_in.handle_result(result);
                    apply_screen_update(app, update)
                }
                Screens::App(_) => vec![],
            }
        }
        UiEvent::SignUpFinished { task, result } => {
            if !finish(&mut app.tui.tasks, TaskKind::SignUp, task) {
                return vec![];
            }
            match &mut app.tui.screens {
                Screens::Auth(auth) => {
                    let update = auth.sign_up.handle_result(result);
                    apply_screen_update(app, update)
                }
                Screens::App(_) => vec![],
            }
        }
        UiEvent::GroupsLoaded { task, result } => {
            app_result(app, TaskKind::Groups, task, result, |screens, result| {
                screens.home.handle_groups(result)
            })
        }
        UiEvent::ExercisesLoaded {
            task,
            group,
            result,
        } => app_result(app, TaskKind::Exercises, task, result, |screens, result| {
            screens.home.handle_exercises(&group, result)
        }),
        UiEvent::HistoryLoaded { task, result } => {
            app_result(app, TaskKind::History, task, result, |screens, result| {
                screens.history.handle_loaded(result)
            })
        }
        UiEvent::ProfileUpdated { task, name, result } => {
            let active = app.tui.tasks.profile_update.active == Some(task);
            let renamed = (active && result.is_ok()).then(|| {
                app.tui.session.user().cloned().map(|mut user| {
                    user.name = name;
                    user
                })
            });
            let mut effects = app_result(
                app,
                TaskKind::ProfileUpdate,
                task,
                result,
                |screens, result| screens.profile.handle_updated(result),
            );
            if let Some(Some(user)) = renamed {
                effects.push(UiEffect::ReplaceUser(user));
            }
            effects
        }
        UiEvent::AvatarUploaded { task, result } => {
            let active = app.tui.tasks.avatar_upload.active == Some(task);
            let with_avatar = match &result {
                Ok(Some(avatar)) if active => app.tui.session.user().cloned().map(|mut user| {
                    user.avatar = Some(avatar.clone());
                    user
                }),
                _ => None,
            };
            let mut effects = app_result(
                app,
                TaskKind::AvatarUpload,
                task,
                result,
                |screens, result| screens.profile.handle_avatar(result),
            );
            if let Some(user) = with_avatar {
                effects.push(UiEffect::ReplaceUser(user));
            }
            effects
        }
    }
}

/// Marks `task` finished. Returns false for stale results.
fn finish(tasks: &mut Tasks, kind: TaskKind, task: TaskId) -> bool {
    let active = tasks.state_mut(kind).finish_if_active(task);
    if !active {
        tracing::debug!(?kind, task = task.0, "discarding stale task result");
    }
    active
}

/// Common handling for results of authenticated calls: drop stale ones,
/// expire the session on 401, otherwise hand the result to the screen.
fn app_result<T>(
    app: &mut AppState,
    kind: TaskKind,
    task: TaskId,
    result: Result<T, ApiError>,
    apply: impl FnOnce(&mut AppScreens, Result<T, ApiError>) -> ScreenUpdate,
) -> Vec<UiEffect> {
    if !finish(&mut app.tui.tasks, kind, task) {
        return vec![];
    }
    if let Err(err) = &result
        && err.is_unauthorized()
    {
        show_toast(&mut app.tui, ToastKind::Error, SESSION_EXPIRED);
        return vec![UiEffect::ExpireSession];
    }
    if let Err(err) = &result {
        tracing::warn!(?kind, error = %err, details = ?err.details, "request failed");
    }
    match &mut app.tui.screens {
        Screens::App(screens) => {
            let update = apply(screens, result);
            apply_screen_update(app, update)
        }
        Screens::Auth(_) => vec![],
    }
}

fn show_toast(tui: &mut TuiState, kind: ToastKind, message: impl Into<String>) {
    tui.toast = Some(Toast::new(kind, message, tui.toast_duration));
}

/// Swaps the mounted screen group when the route selector's choice changes.
fn handle_session_changed(app: &mut AppState, session: SessionState) -> Vec<UiEffect> {
    app.tui.session = session;
    let tree = routes::select(&app.tui.session);
    if tree == app.tui.screens.tree() {
        return vec![];
    }

    tracing::debug!(?tree, "remounting screens");
    app.overlay = None;
    app.tui.tasks = Tasks::default();
    app.tui.screens = Screens::mount(tree, &app.tui.session);

    let requests = match &app.tui.screens {
        Screens::App(screens) => match screens.route {
            AppRoute::Home => screens.home.on_mount(),
            AppRoute::History => screens.history.on_focus(),
            AppRoute::Profile => vec![],
        },
        Screens::Auth(_) => vec![],
    };
    start_requests(&mut app.tui, requests)
}

fn apply_screen_update(app: &mut AppState, update: ScreenUpdate) -> Vec<UiEffect> {
    let mut effects = match update.action {
        ScreenAction::Stay => vec![],
        ScreenAction::Navigate(screen) => navigate(app, screen),
        ScreenAction::Notify(kind, message) => {
            show_toast(&mut app.tui, kind, message);
            vec![]
        }
        ScreenAction::ShowExercise(exercise) => {
            app.overlay = Some(Overlay::Exercise(ExerciseState { exercise }));
            vec![]
        }
    };
    effects.extend(start_requests(&mut app.tui, update.requests));
    effects
}

fn start_requests(tui: &mut TuiState, requests: Vec<Request>) -> Vec<UiEffect> {
    requests
        .into_iter()
        .filter_map(|request| start_request(tui, request))
        .collect()
}

/// Turns a screen request into a tracked task effect.
fn start_request(tui: &mut TuiState, request: Request) -> Option<UiEffect> {
    let kind = request.kind();
    if request.is_submission() && tui.tasks.is_running(kind) {
        return None;
    }
    let task = tui.tasks.start(&mut tui.task_seq, kind);
    Some(match request {
        Request::SignIn { email, password } => UiEffect::SignIn {
            task,
            email,
            password,
        },
        Request::SignUp {
            name,
            email,
            password,
        } => UiEffect::SignUp {
            task,
            name,
            email,
            password,
        },
        Request::LoadGroups => UiEffect::LoadGroups { task },
        Request::LoadExercises { group } => UiEffect::LoadExercises { task, group },
        Request::LoadHistory => UiEffect::LoadHistory { task },
        Request::UpdateProfile {
            name,
            old_password,
            password,
        } => UiEffect::UpdateProfile {
            task,
            name,
            old_password,
            password,
        },
        Request::UploadAvatar { path } => UiEffect::UploadAvatar { task, path },
    })
}

/// Moves within the mounted group, discarding the draft of the screen being
/// left. Crossing groups only happens through session changes.
fn navigate(app: &mut AppState, screen: Screen) -> Vec<UiEffect> {
    match (&mut app.tui.screens, screen) {
        (Screens::Auth(auth), Screen::Auth(route)) => {
            if auth.route == route {
                return vec![];
            }
            match auth.route {
                AuthRoute::SignIn => auth.sign_in = SignInState::default(),
                AuthRoute::SignUp => auth.sign_up = SignUpState::default(),
            }
            auth.route = route;
            vec![]
        }
        (Screens::App(screens), Screen::App(route)) => {
            if screens.route == route {
                return vec![];
            }
            if screens.route == AppRoute::Profile {
                screens.profile = ProfileState::new(app.tui.session.user());
            }
            screens.route = route;
            let requests = match route {
                AppRoute::History => screens.history.on_focus(),
                AppRoute::Home | AppRoute::Profile => vec![],
            };
            start_requests(&mut app.tui, requests)
        }
        _ => vec![],
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Paste(text) => {
            handle_paste(app, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_paste(app: &mut AppState, text: &str) {
    if app.overlay.is_some() {
        return;
    }
    match &mut app.tui.screens {
        Screens::Auth(auth) => match auth.route {
            AuthRoute::SignIn => auth.sign_in.form.paste(text),
            AuthRoute::SignUp => auth.sign_up.form.paste(text),
        },
        Screens::App(screens) => {
            if screens.route == AppRoute::Profile {
                screens.profile.form.paste(text);
            }
        }
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(key);
        if update.transition == OverlayTransition::Close {
            app.overlay = None;
        }
        return update.effects;
    }

    if let Screen::App(route) = app.tui.screens.current() {
        let target = match key.code {
            KeyCode::Right if ctrl => Some(route.next()),
            KeyCode::Left if ctrl => Some(route.prev()),
            KeyCode::Char(c @ '1'..='3') if route != AppRoute::Profile => {
                AppRoute::TABS.get(c as usize - '1' as usize).copied()
            }
            _ => None,
        };
        if let Some(target) = target {
            return navigate(app, Screen::App(target));
        }
        if ctrl && key.code == KeyCode::Char('o') {
            app.overlay = Some(Overlay::SignOut(SignOutState));
            return vec![];
        }
    }

    let tui = &mut app.tui;
    let update = match &mut tui.screens {
        Screens::Auth(auth) => match auth.route {
            AuthRoute::SignIn => auth
                .sign_in
                .handle_key(key, tui.tasks.is_running(TaskKind::SignIn)),
            AuthRoute::SignUp => auth
                .sign_up
                .handle_key(key, tui.tasks.is_running(TaskKind::SignUp)),
        },
        Screens::App(screens) => match screens.route {
            AppRoute::Home => screens.home.handle_key(key),
            AppRoute::History => screens.history.handle_key(key),
            AppRoute::Profile => screens.profile.handle_key(
                key,
                tui.tasks.is_running(TaskKind::ProfileUpdate)
                    || tui.tasks.is_running(TaskKind::AvatarUpload),
            ),
        },
    };
    apply_screen_update(app, update)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gymtrack_core::api::{ApiErrorKind, AuthError, HistoryDay, User};
    use gymtrack_core::core::session::Session;
    use gymtrack_core::forms::Field;

    use super::*;

    fn user() -> User {
        User {
            id: "1".into(),
            name: "Ana".into(),
            email: "ana@gym.com".into(),
            avatar: None,
        }
    }

    fn authenticated() -> SessionState {
        SessionState::Authenticated(Session {
            user: user(),
            token: "tok".into(),
        })
    }

    fn app() -> AppState {
        AppState::new(SessionState::Unauthenticated, Duration::from_secs(4))
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(c: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    fn paste(text: &str) -> UiEvent {
        UiEvent::Terminal(Event::Paste(text.to_string()))
    }

    fn fill_sign_in(app: &mut AppState) {
        update(app, paste("ana@gym.com"));
        update(app, key(KeyCode::Tab));
        update(app, paste("secret1"));
    }

    fn signed_in_app() -> AppState {
        let mut app = app();
        update(&mut app, UiEvent::SessionChanged(authenticated()));
        app
    }

    fn task_of(effect: &UiEffect) -> TaskId {
        match effect {
            UiEffect::SignIn { task, .. }
            | UiEffect::SignUp { task, .. }
            | UiEffect::LoadGroups { task }
            | UiEffect::LoadExercises { task, .. }
            | UiEffect::LoadHistory { task }
            | UiEffect::UpdateProfile { task, .. }
            | UiEffect::UploadAvatar { task, .. } => *task,
            other => panic!("effect without task: {other:?}"),
        }
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        assert_eq!(update(&mut app, ctrl('c')), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_sign_in_submit_emits_single_request() {
        let mut app = app();
        fill_sign_in(&mut app);

        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::SignIn { email, password, .. }]
                if email == "ana@gym.com" && password == "secret1"
        ));

        // Pending: still unauthenticated, and a second Enter is ignored.
        assert_eq!(app.tui.screens.tree(), routes::RouteTree::Auth);
        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());
    }

    #[test]
    fn test_invalid_sign_in_never_reaches_session() {
        let mut app = app();
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        let Screens::Auth(auth) = &app.tui.screens else {
            panic!("expected auth screens");
        };
        assert!(auth.sign_in.form.error(Field::Email).is_some());
    }

    #[test]
    fn test_sign_in_failure_shows_toast() {
        let mut app = app();
        fill_sign_in(&mut app);
        let effects = update(&mut app, key(KeyCode::Enter));
        let task = task_of(&effects[0]);

        update(
            &mut app,
            UiEvent::SignInFinished {
                task,
                result: Err(AuthError::invalid_credentials()),
            },
        );
        let toast = app.tui.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, AuthError::INVALID_CREDENTIALS);
        assert!(!app.tui.tasks.is_running(TaskKind::SignIn));
    }

    #[test]
    fn test_session_change_mounts_app_and_loads_home() {
        let mut app = app();
        let effects = update(&mut app, UiEvent::SessionChanged(authenticated()));

        assert_eq!(app.tui.screens.current(), Screen::App(AppRoute::Home));
        assert!(matches!(effects[0], UiEffect::LoadGroups { .. }));
        assert!(matches!(
            &effects[1],
            UiEffect::LoadExercises { group, .. } if group == "back"
        ));
    }

    #[test]
    fn test_sign_in_result_after_remount_is_discarded() {
        let mut app = app();
        fill_sign_in(&mut app);
        let effects = update(&mut app, key(KeyCode::Enter));
        let task = task_of(&effects[0]);

        update(&mut app, UiEvent::SessionChanged(authenticated()));
        let effects = update(
            &mut app,
            UiEvent::SignInFinished {
                task,
                result: Ok(user()),
            },
        );
        assert!(effects.is_empty());
        assert!(app.tui.toast.is_none());
    }

    #[test]
    fn test_same_tree_session_change_keeps_screen_state() {
        let mut app = signed_in_app();
        update(&mut app, key(KeyCode::Right));
        let mut renamed = user();
        renamed.name = "Ana Maria".into();

        let effects = update(
            &mut app,
            UiEvent::SessionChanged(SessionState::Authenticated(Session {
                user: renamed,
                token: "tok".into(),
            })),
        );
        assert!(effects.is_empty());
        let Screens::App(screens) = &app.tui.screens else {
            panic!("expected app screens");
        };
        assert_eq!(screens.home.selected_group, "biceps");
        assert_eq!(app.tui.session.user().unwrap().name, "Ana Maria");
    }

    #[test]
    fn test_sign_out_flow_remounts_auth_and_discards_drafts() {
        let mut app = app();
        fill_sign_in(&mut app);
        update(&mut app, UiEvent::SessionChanged(authenticated()));

        assert!(update(&mut app, ctrl('o')).is_empty());
        assert!(matches!(app.overlay, Some(Overlay::SignOut(_))));
        let effects = update(&mut app, key(KeyCode::Char('y')));
        assert_eq!(effects, vec![UiEffect::SignOut]);
        assert!(app.overlay.is_none());

        update(&mut app, UiEvent::SessionChanged(SessionState::Unauthenticated));
        assert_eq!(app.tui.screens.current(), Screen::Auth(AuthRoute::SignIn));
        let Screens::Auth(auth) = &app.tui.screens else {
            panic!("expected auth screens");
        };
        assert_eq!(auth.sign_in.form.value(Field::Email), "");
    }

    #[test]
    fn test_history_refreshes_on_every_focus() {
        let mut app = signed_in_app();

        let effects = update(&mut app, key(KeyCode::Char('2')));
        assert!(matches!(effects.as_slice(), [UiEffect::LoadHistory { .. }]));
        let first = task_of(&effects[0]);

        update(&mut app, key(KeyCode::Char('1')));
        let effects = update(&mut app, key(KeyCode::Char('2')));
        let second = task_of(&effects[0]);
        assert_ne!(first, second);

        // The first request was superseded.
        update(
            &mut app,
            UiEvent::HistoryLoaded {
                task: first,
                result: Ok(vec![HistoryDay {
                    title: "22.07.24".into(),
                    data: vec![],
                }]),
            },
        );
        let Screens::App(screens) = &app.tui.screens else {
            panic!("expected app screens");
        };
        assert!(screens.history.days.is_empty());
    }

    #[test]
    fn test_unauthorized_expires_session() {
        let mut app = signed_in_app();
        let effects = update(&mut app, key(KeyCode::Char('2')));
        let task = task_of(&effects[0]);

        let effects = update(
            &mut app,
            UiEvent::HistoryLoaded {
                task,
                result: Err(ApiError::new(ApiErrorKind::Unauthorized, "token.expired")),
            },
        );
        assert_eq!(effects, vec![UiEffect::ExpireSession]);
        assert_eq!(app.tui.toast.as_ref().unwrap().message, SESSION_EXPIRED);
    }

    #[test]
    fn test_profile_update_replaces_user() {
        let mut app = signed_in_app();
        update(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.tui.screens.current(), Screen::App(AppRoute::Profile));

        update(&mut app, paste(" Maria"));
        let effects = update(&mut app, key(KeyCode::Enter));
        let task = task_of(&effects[0]);

        let effects = update(
            &mut app,
            UiEvent::ProfileUpdated {
                task,
                name: "Ana Maria".into(),
                result: Ok(()),
            },
        );
        let mut expected = user();
        expected.name = "Ana Maria".into();
        assert_eq!(effects, vec![UiEffect::ReplaceUser(expected)]);
        assert_eq!(app.tui.toast.as_ref().unwrap().kind, ToastKind::Info);
    }

    #[test]
    fn test_digits_type_into_profile_form() {
        let mut app = signed_in_app();
        update(&mut app, ctrl_arrow(KeyCode::Left));
        assert_eq!(app.tui.screens.current(), Screen::App(AppRoute::Profile));

        update(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.tui.screens.current(), Screen::App(AppRoute::Profile));
        let Screens::App(screens) = &app.tui.screens else {
            panic!("expected app screens");
        };
        assert_eq!(screens.profile.form.value(Field::Name), "Ana2");
    }

    #[test]
    fn test_auth_navigation_discards_left_draft() {
        let mut app = app();
        fill_sign_in(&mut app);

        update(&mut app, ctrl('n'));
        assert_eq!(app.tui.screens.current(), Screen::Auth(AuthRoute::SignUp));
        update(&mut app, paste("Ana"));
        update(&mut app, key(KeyCode::Esc));

        assert_eq!(app.tui.screens.current(), Screen::Auth(AuthRoute::SignIn));
        let Screens::Auth(auth) = &app.tui.screens else {
            panic!("expected auth screens");
        };
        assert_eq!(auth.sign_in.form.value(Field::Email), "");
        assert_eq!(auth.sign_in.form.value(Field::Password), "");
        assert_eq!(auth.sign_up.form.value(Field::Name), "");
    }

    #[test]
    fn test_leaving_profile_discards_draft() {
        let mut app = signed_in_app();
        update(&mut app, key(KeyCode::Char('3')));
        update(&mut app, paste(" Maria"));
        update(&mut app, key(KeyCode::Tab));
        update(&mut app, paste("oldpass"));

        update(&mut app, ctrl_arrow(KeyCode::Left));
        update(&mut app, ctrl_arrow(KeyCode::Right));

        assert_eq!(app.tui.screens.current(), Screen::App(AppRoute::Profile));
        let Screens::App(screens) = &app.tui.screens else {
            panic!("expected app screens");
        };
        assert_eq!(screens.profile.form.value(Field::Name), "Ana");
        assert_eq!(screens.profile.form.value(Field::OldPassword), "");
    }

    fn ctrl_arrow(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::CONTROL)))
    }

    #[test]
    fn test_toast_expires_on_tick() {
        let mut app = AppState::new(SessionState::Unauthenticated, Duration::ZERO);
        show_toast(&mut app.tui, ToastKind::Info, "hello");
        update(&mut app, UiEvent::Tick);
        assert!(app.tui.toast.is_none());
    }
}
