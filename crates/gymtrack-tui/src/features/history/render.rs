use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{EMPTY_TEXT, HistoryState};
use crate::common::truncate_with_ellipsis;

pub fn render_history(frame: &mut Frame, history: &HistoryState, area: Rect, loading: Option<&str>) {
    let title = match loading {
        Some(spinner) => format!("Exercise history {spinner}"),
        None => "Exercise history".to_string(),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        Rect::new(area.x, area.y, area.width, 1),
    );
    let body = Rect::new(
        area.x,
        area.y + 2,
        area.width,
        area.height.saturating_sub(2),
    );

    if history.days.is_empty() {
        if loading.is_none() {
            let lines = vec![
                Line::from(EMPTY_TEXT),
                Line::from("Let's work out today?"),
            ];
            let y = body.y + body.height / 2;
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Gray)),
                Rect::new(body.x, y.saturating_sub(1), body.width, 2.min(body.height)),
            );
        }
        return;
    }

    let width = body.width.saturating_sub(4) as usize;
    let mut lines = Vec::with_capacity(history.row_count());
    for day in &history.days {
        lines.push(Line::from(Span::styled(
            day.title.clone(),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )));
        for entry in &day.data {
            let hour = format!("  {:>5}  ", entry.hour);
            let label = truncate_with_ellipsis(
                &format!("{} · {}", entry.group.to_uppercase(), entry.name),
                width.saturating_sub(hour.len()),
            );
            lines.push(Line::from(vec![
                Span::styled(hour, Style::default().fg(Color::DarkGray)),
                Span::raw(label),
            ]));
        }
    }
    frame.render_widget(
        Paragraph::new(lines).scroll((history.scroll as u16, 0)),
        body,
    );
}
