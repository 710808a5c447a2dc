use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use super::HomeState;
use crate::common::truncate_with_ellipsis;

pub fn render_home(frame: &mut Frame, home: &HomeState, area: Rect, loading: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let mut spans = Vec::new();
    for group in &home.groups {
        let style = if group.eq_ignore_ascii_case(&home.selected_group) {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", group.to_uppercase()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    let count = home.exercises.len();
    let header = match loading {
        Some(spinner) => format!("Exercises {spinner}"),
        None => format!("Exercises ({count})"),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            header,
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        chunks[2],
    );

    let width = chunks[3].width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = home
        .exercises
        .iter()
        .map(|exercise| {
            let detail = format!(
                "  {} sets x {} reps",
                exercise.series, exercise.repetitions
            );
            ListItem::new(vec![
                Line::from(truncate_with_ellipsis(&exercise.name, width)),
                Line::from(Span::styled(detail, Style::default().fg(Color::Gray))),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::LEFT))
        .highlight_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if count > 0 {
        list_state.select(Some(home.selected_exercise));
    }
    frame.render_stateful_widget(list, chunks[3], &mut list_state);
}
