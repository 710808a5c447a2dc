//! Transient notifications.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::common::truncate_with_ellipsis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    expires_at: Instant,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            kind,
            message: message.into(),
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

const TOAST_WIDTH: u16 = 44;

/// Renders the toast in the top-right corner.
pub fn render_toast(frame: &mut Frame, toast: &Toast, area: Rect) {
    let width = TOAST_WIDTH.min(area.width);
    let inner_width = width.saturating_sub(2) as usize;
    let lines = (toast.message.chars().count() / inner_width.max(1)) as u16 + 1;
    let height = (lines + 2).min(area.height).min(6);
    let popup = Rect::new(area.x + area.width - width, area.y, width, height);

    let (color, title) = match toast.kind {
        ToastKind::Info => (Color::Green, " Message "),
        ToastKind::Error => (Color::Red, " Error "),
    };
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title);
    let text = truncate_with_ellipsis(&toast.message, inner_width * 4);
    frame.render_widget(
        Paragraph::new(Line::from(text))
            .block(block)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires() {
        let toast = Toast::new(ToastKind::Info, "hi", Duration::from_secs(2));
        let now = Instant::now();
        assert!(!toast.is_expired(now));
        assert!(toast.is_expired(now + Duration::from_secs(3)));
    }
}
