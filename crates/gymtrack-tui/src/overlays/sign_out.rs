use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Color;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};
use crate::effects::UiEffect;

/// Confirmation before ending the session.
#[derive(Debug, Clone, Default)]
pub struct SignOutState;

impl SignOutState {
    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y' | 'Y') => {
                OverlayUpdate::close().with_ui_effects(vec![UiEffect::SignOut])
            }
            KeyCode::Esc | KeyCode::Char('n' | 'N') => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        const HINTS: [InputHint<'static>; 2] =
            [InputHint::new("y", "sign out"), InputHint::new("n", "cancel")];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Sign out",
                border_color: Color::Yellow,
                width: 40,
                height: 5,
                hints: &HINTS,
            },
        );
        frame.render_widget(
            Paragraph::new(Line::from("Sign out of gymtrack?")).alignment(Alignment::Center),
            layout.body,
        );
    }
}
