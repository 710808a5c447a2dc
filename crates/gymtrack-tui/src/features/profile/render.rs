use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::ProfileState;
use crate::features::form::render_form;

pub fn render_profile(
    frame: &mut Frame,
    profile: &ProfileState,
    email: &str,
    avatar: Option<&str>,
    area: Rect,
    busy: Option<&str>,
) {
    let mut header = vec![
        Line::from(vec![
            Span::styled("Email  ", Style::default().fg(Color::Gray)),
            Span::styled(email.to_string(), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled("Photo  ", Style::default().fg(Color::Gray)),
            Span::styled(
                avatar.unwrap_or("none").to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];
    if let Some(spinner) = busy {
        header.push(Line::from(Span::styled(
            format!("{spinner} Saving…"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    frame.render_widget(Paragraph::new(header), Rect::new(area.x, area.y, area.width, 3));

    let form = Rect::new(
        area.x,
        area.y + 4,
        area.width,
        area.height.saturating_sub(4),
    );
    render_form(frame, &profile.form, form, busy.is_some());
}
