use crossterm::event::{KeyCode, KeyEvent};
use gymtrack_core::api::Exercise;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};

/// Details of one exercise.
#[derive(Debug, Clone)]
pub struct ExerciseState {
    pub exercise: Exercise,
}

impl ExerciseState {
    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        const HINTS: [InputHint<'static>; 1] = [InputHint::new("Esc", "close")];
        let exercise = &self.exercise;
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: &exercise.name,
                border_color: Color::Green,
                width: 50,
                height: 9,
                hints: &HINTS,
            },
        );

        let label = Style::default().fg(Color::Gray);
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Group   ", label),
                Span::raw(exercise.group.to_uppercase()),
            ]),
            Line::from(vec![
                Span::styled("Sets    ", label),
                Span::raw(exercise.series.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Reps    ", label),
                Span::raw(exercise.repetitions.to_string()),
            ]),
        ];
        if let Some(demo) = &exercise.demo {
            lines.push(Line::from(vec![
                Span::styled("Demo    ", label),
                Span::raw(demo.clone()),
            ]));
        }
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }),
            layout.body,
        );
    }
}
