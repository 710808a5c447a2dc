//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use gymtrack_core::core::routes::{AppRoute, AuthRoute};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::auth::{render_sign_in, render_sign_up};
use crate::common::{TaskKind, truncate_with_ellipsis};
use crate::history::render_history;
use crate::home::render_home;
use crate::overlays::OverlayExt;
use crate::overlays::render_utils::{InputHint, render_hints};
use crate::profile::render_profile;
use crate::state::{AppScreens, AppState, AuthScreens, Screens, TuiState};
use crate::toast::render_toast;

/// Tab bar plus its bottom border.
const HEADER_HEIGHT: u16 = 2;

/// Key hints below the body.
const FOOTER_HEIGHT: u16 = 1;

/// Ticks per spinner frame.
const SPINNER_SPEED_DIVISOR: usize = 2;

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

const BRAND: &str = "gymtrack";

const SIGN_IN_HINTS: [InputHint<'static>; 4] = [
    InputHint::new("Enter", "sign in"),
    InputHint::new("Tab", "next field"),
    InputHint::new("Ctrl+N", "create account"),
    InputHint::new("Ctrl+C", "quit"),
];

const SIGN_UP_HINTS: [InputHint<'static>; 4] = [
    InputHint::new("Enter", "create account"),
    InputHint::new("Tab", "next field"),
    InputHint::new("Esc", "back to sign in"),
    InputHint::new("Ctrl+C", "quit"),
];

const HOME_HINTS: [InputHint<'static>; 5] = [
    InputHint::new("←/→", "group"),
    InputHint::new("↑/↓", "exercise"),
    InputHint::new("Enter", "details"),
    InputHint::new("r", "reload"),
    InputHint::new("Ctrl+O", "sign out"),
];

const HISTORY_HINTS: [InputHint<'static>; 3] = [
    InputHint::new("↑/↓", "scroll"),
    InputHint::new("Ctrl+←/→", "tabs"),
    InputHint::new("Ctrl+O", "sign out"),
];

const PROFILE_HINTS: [InputHint<'static>; 4] = [
    InputHint::new("Enter", "save"),
    InputHint::new("Ctrl+U", "upload photo"),
    InputHint::new("Ctrl+←/→", "tabs"),
    InputHint::new("Ctrl+O", "sign out"),
];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    match &state.screens {
        Screens::Auth(auth) => render_auth(state, auth, frame, area),
        Screens::App(screens) => render_app(state, screens, frame, area),
    }

    if let Some(toast) = &state.toast {
        render_toast(frame, toast, area);
    }

    // Render overlay (last, so it appears on top)
    app.overlay.render(frame, area);
}

fn spinner(state: &TuiState) -> &'static str {
    SPINNER_FRAMES[(state.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()]
}

/// Spinner glyph while a task of `kind` runs.
fn busy(state: &TuiState, kind: TaskKind) -> Option<&'static str> {
    state.tasks.is_running(kind).then(|| spinner(state))
}

fn render_auth(state: &TuiState, auth: &AuthScreens, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(FOOTER_HEIGHT)])
        .split(area);

    let hints: &[InputHint] = match auth.route {
        AuthRoute::SignIn => {
            render_sign_in(frame, &auth.sign_in, chunks[0], busy(state, TaskKind::SignIn));
            &SIGN_IN_HINTS
        }
        AuthRoute::SignUp => {
            render_sign_up(frame, &auth.sign_up, chunks[0], busy(state, TaskKind::SignUp));
            &SIGN_UP_HINTS
        }
    };
    render_hints(frame, chunks[1], hints, Color::Cyan);
}

fn render_app(state: &TuiState, screens: &AppScreens, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    render_header(state, screens.route, frame, chunks[0]);

    let hints: &[InputHint] = match screens.route {
        AppRoute::Home => {
            let loading = busy(state, TaskKind::Exercises).or(busy(state, TaskKind::Groups));
            render_home(frame, &screens.home, chunks[1], loading);
            &HOME_HINTS
        }
        AppRoute::History => {
            render_history(frame, &screens.history, chunks[1], busy(state, TaskKind::History));
            &HISTORY_HINTS
        }
        AppRoute::Profile => {
            let user = state.session.user();
            let working =
                busy(state, TaskKind::ProfileUpdate).or(busy(state, TaskKind::AvatarUpload));
            render_profile(
                frame,
                &screens.profile,
                user.map_or("", |u| u.email.as_str()),
                user.and_then(|u| u.avatar.as_deref()),
                chunks[1],
                working,
            );
            &PROFILE_HINTS
        }
    };
    render_hints(frame, chunks[2], hints, Color::Cyan);
}

/// Brand, tab bar, and the signed-in user's name.
fn render_header(state: &TuiState, active: AppRoute, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {BRAND} "),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
];
    for (i, route) in AppRoute::TABS.iter().enumerate() {
        let style = if *route == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, route.title()), style));
        spans.push(Span::raw(" "));
    }

    let used: usize = spans.iter().map(Span::width).sum();
    if let Some(user) = state.session.user() {
        let available = (area.width as usize).saturating_sub(used + 1);
        let greeting = truncate_with_ellipsis(&format!("Hello, {}", user.name), available);
        let pad = available.saturating_sub(unicode_width::UnicodeWidthStr::width(greeting.as_str()));
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(greeting, Style::default().fg(Color::White)));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}
