//! Home screen: exercise groups and the exercises of the selected group.

mod render;

use crossterm::event::{KeyCode, KeyEvent};
use gymtrack_core::api::{ApiError, Exercise};
pub use render::render_home;

use crate::features::{Request, ScreenUpdate};
use crate::toast::ToastKind;

/// Group selected when the screen mounts.
pub const INITIAL_GROUP: &str = "back";

/// Shown until the server's list arrives, and kept if it never does.
pub const FALLBACK_GROUPS: [&str; 6] = ["back", "biceps", "triceps", "shoulders", "legs", "forearm"];

#[derive(Debug, Clone)]
pub struct HomeState {
    pub groups: Vec<String>,
    pub selected_group: String,
    pub exercises: Vec<Exercise>,
    pub selected_exercise: usize,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            groups: FALLBACK_GROUPS.iter().map(ToString::to_string).collect(),
            selected_group: INITIAL_GROUP.to_string(),
            exercises: Vec::new(),
            selected_exercise: 0,
        }
    }
}

impl HomeState {
    /// Requests issued when the screen mounts.
    pub fn on_mount(&self) -> Vec<Request> {
        vec![
            Request::LoadGroups,
            Request::LoadExercises {
                group: self.selected_group.clone(),
            },
        ]
    }

    fn group_index(&self) -> usize {
        self.groups
            .iter()
            .position(|g| g.eq_ignore_ascii_case(&self.selected_group))
            .unwrap_or(0)
    }

    fn select_group(&mut self, idx: usize) -> ScreenUpdate {
        let Some(group) = self.groups.get(idx) else {
            return ScreenUpdate::stay();
        };
        if group.eq_ignore_ascii_case(&self.selected_group) {
            return ScreenUpdate::stay();
        }
        self.selected_group.clone_from(group);
        self.exercises.clear();
        self.selected_exercise = 0;
        ScreenUpdate::stay().with_request(Request::LoadExercises {
            group: self.selected_group.clone(),
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenUpdate {
        let count = self.groups.len().max(1);
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.select_group((self.group_index() + count - 1) % count)
            }
            KeyCode::Right | KeyCode::Char('l') => self.select_group((self.group_index() + 1) % count),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_exercise = self.selected_exercise.saturating_sub(1);
                ScreenUpdate::stay()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_exercise + 1 < self.exercises.len() {
                    self.selected_exercise += 1;
                }
                ScreenUpdate::stay()
            }
            KeyCode::Enter => match self.exercises.get(self.selected_exercise) {
                Some(exercise) => ScreenUpdate::show_exercise(exercise.clone()),
                None => ScreenUpdate::stay(),
            },
            KeyCode::Char('r') => {
                let mut update = ScreenUpdate::stay();
                update.requests = self.on_mount();
                update
            }
            _ => ScreenUpdate::stay(),
        }
    }

    pub fn handle_groups(&mut self, result: Result<Vec<String>, ApiError>) -> ScreenUpdate {
        match result {
            Ok(groups) if !groups.is_empty() => {
                self.groups = groups;
                if self
                    .groups
                    .iter()
                    .any(|g| g.eq_ignore_ascii_case(&self.selected_group))
                {
                    ScreenUpdate::stay()
                } else {
                    self.selected_group.clear();
                    self.select_group(0)
                }
            }
            Ok(_) => ScreenUpdate::stay(),
            Err(err) => ScreenUpdate::notify(ToastKind::Error, err.message),
        }
    }

    /// Applies exercises for `group`; results for a group that is no longer
    /// selected are ignored.
    pub fn handle_exercises(
        &mut self,
        group: &str,
        result: Result<Vec<Exercise>, ApiError>,
    ) -> ScreenUpdate {
        if !group.eq_ignore_ascii_case(&self.selected_group) {
            return ScreenUpdate::stay();
        }
        match result {
            Ok(exercises) => {
                self.exercises = exercises;
                self.selected_exercise = 0;
                ScreenUpdate::stay()
            }
            Err(err) => ScreenUpdate::notify(ToastKind::Error, err.message),
        }
    }
}
