//! Placeholder for conditions that are not implemented yet.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::render_header;
use crate::tui::styles::MedicalTheme;

pub fn render_placeholder(f: &mut Frame, area: Rect, condition: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(f, chunks[0], "Disease Risk Predictor", condition);

    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "This module is under development. Stay tuned!",
            MedicalTheme::info(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, chunks[1]);
}
