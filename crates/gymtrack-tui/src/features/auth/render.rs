//! Auth screens view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{SignInState, SignUpState};
use crate::features::form::{FIELD_HEIGHT, render_form};
use crate::overlays::render_utils::centered_rect;

const CARD_WIDTH: u16 = 48;
const BRAND_HEIGHT: u16 = 4;

fn render_brand(frame: &mut Frame, area: Rect, heading: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "gymtrack",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Train your mind and your body",
            Style::default().fg(Color::Gray),
        )),
        Line::default(),
        Line::from(Span::styled(
            heading.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_busy(frame: &mut Frame, area: Rect, label: &str, spinner: &str) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("{spinner} {label}"),
            Style::default().fg(Color::Yellow),
        )))
        .alignment(Alignment::Center),
        area,
    );
}

fn layout(area: Rect, fields: u16) -> (Rect, Rect, Rect) {
    let height = BRAND_HEIGHT + 1 + fields * FIELD_HEIGHT + 1;
    let card = centered_rect(area, CARD_WIDTH, height);
    let brand = Rect::new(card.x, card.y, card.width, BRAND_HEIGHT);
    let form = Rect::new(
        card.x,
        card.y + BRAND_HEIGHT + 1,
        card.width,
        card.height.saturating_sub(BRAND_HEIGHT + 2),
    );
    let status = Rect::new(card.x, card.y + card.height.saturating_sub(1), card.width, 1);
    (brand, form, status)
}

pub fn render_sign_in(frame: &mut Frame, state: &SignInState, area: Rect, busy: Option<&str>) {
    let (brand, form, status) = layout(area, state.form.fields().len() as u16);
    render_brand(frame, brand, "Sign in to your account");
    render_form(frame, &state.form, form, busy.is_some());
    if let Some(spinner) = busy {
        render_busy(frame, status, "Signing in…", spinner);
    }
}

pub fn render_sign_up(frame: &mut Frame, state: &SignUpState, area: Rect, busy: Option<&str>) {
    let (brand, form, status) = layout(area, state.form.fields().len() as u16);
    render_brand(frame, brand, "Create your account");
    render_form(frame, &state.form, form, busy.is_some());
    if let Some(spinner) = busy {
        render_busy(frame, status, "Creating account…", spinner);
    }
}
