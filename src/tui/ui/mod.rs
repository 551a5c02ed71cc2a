//! UI module: View components for the TUI.

pub mod diabetes;
pub mod home;
pub mod placeholder;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::Screen;
use crate::tui::styles::MedicalTheme;

/// Render the condition selector.
pub fn render_sidebar(f: &mut Frame, area: Rect, current: Screen) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Choose a condition to assess:",
            MedicalTheme::text_secondary(),
        )),
        Line::from(""),
    ];

    for screen in Screen::ALL {
        let style = if screen == current {
            MedicalTheme::selected()
        } else {
            MedicalTheme::text()
        };
        lines.push(Line::from(Span::styled(format!(" {} ", screen.title()), style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[←→] ", MedicalTheme::key_hint()),
        Span::styled("Switch", MedicalTheme::key_desc()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("[Ctrl+Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]));

    let block = Block::default()
        .title(Span::styled(" Select Disease ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "DISCLAIMER: This tool provides indicative estimates and does not replace professional medical evaluation.",
        MedicalTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Header bar shared by all views.
pub(crate) fn render_header(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(title.to_string(), MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled(subtitle.to_string(), MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

#[cfg(test)]
pub(crate) fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
