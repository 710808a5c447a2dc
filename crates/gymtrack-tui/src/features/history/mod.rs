//! History screen: logged exercises grouped by day.

mod render;

use crossterm::event::{KeyCode, KeyEvent};
use gymtrack_core::api::{ApiError, HistoryDay};
pub use render::render_history;

use crate::features::{Request, ScreenUpdate};
use crate::toast::ToastKind;

pub const EMPTY_TEXT: &str = "No exercises registered yet.";

#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    pub days: Vec<HistoryDay>,
    /// First rendered row.
    pub scroll: usize,
}

impl HistoryState {
    /// Refreshes every time the screen gains focus.
    pub fn on_focus(&self) -> Vec<Request> {
        vec![Request::LoadHistory]
    }

    /// Rows the list occupies: one header per day plus its entries.
    pub fn row_count(&self) -> usize {
        self.days.iter().map(|d| d.data.len() + 1).sum()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenUpdate {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
                ScreenUpdate::stay()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.scroll + 1 < self.row_count() {
                    self.scroll += 1;
                }
                ScreenUpdate::stay()
            }
            KeyCode::Char('r') => ScreenUpdate::stay().with_request(Request::LoadHistory),
            _ => ScreenUpdate::stay(),
        }
    }

    pub fn handle_loaded(&mut self, result: Result<Vec<HistoryDay>, ApiError>) -> ScreenUpdate {
        match result {
            Ok(days) => {
                self.days = days;
                self.scroll = self.scroll.min(self.row_count().saturating_sub(1));
                ScreenUpdate::stay()
            }
            Err(err) => ScreenUpdate::notify(ToastKind::Error, err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use gymtrack_core::api::{ApiErrorKind, HistoryEntry};

    use super::*;
    use crate::features::ScreenAction;

    fn day(title: &str, names: &[&str]) -> HistoryDay {
        HistoryDay {
            title: title.into(),
            data: names
                .iter()
                .enumerate()
                .map(|(i, name)| HistoryEntry {
                    id: i.to_string(),
                    name: (*name).into(),
                    group: "back".into(),
                    hour: "08:00".into(),
                    created_at: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_focus_requests_history() {
        let history = HistoryState::default();
        assert_eq!(history.on_focus(), vec![Request::LoadHistory]);
    }

    #[test]
    fn test_loaded_days_and_scroll_clamp() {
        let mut history = HistoryState {
            scroll: 10,
            ..HistoryState::default()
        };
        history.handle_loaded(Ok(vec![
            day("22.07.24", &["Front pulldown", "One-arm row"]),
            day("23.07.24", &["Front pulldown"]),
        ]));
        assert_eq!(history.row_count(), 5);
        assert_eq!(history.scroll, 4);
    }

    #[test]
    fn test_failure_keeps_previous_days() {
        let mut history = HistoryState::default();
        history.handle_loaded(Ok(vec![day("22.07.24", &["Row"])]));
        let update = history.handle_loaded(Err(ApiError::new(ApiErrorKind::Status(500), "down")));
        assert_eq!(history.days.len(), 1);
        assert_eq!(
            update.action,
            ScreenAction::Notify(ToastKind::Error, "down".into())
        );
    }
}
