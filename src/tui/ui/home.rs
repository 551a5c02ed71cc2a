//! Home view: last prediction, the data it was made from, and charts.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, List,
        ListItem, Paragraph, Row, Table, Wrap,
    },
    Frame,
};

use super::render_header;
use crate::application::SessionState;
use crate::domain::Prediction;
use crate::tui::styles::MedicalTheme;

pub fn render_home(f: &mut Frame, area: Rect, session: &SessionState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(
        f,
        chunks[0],
        "Disease Risk Predictor",
        "Select a condition from the sidebar",
    );

    match session.last_result() {
        Some(prediction) => render_result(f, chunks[1], prediction, session),
        None => render_empty(f, chunks[1]),
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let p = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No prediction available yet. Please run a prediction from the selected tab.",
            MedicalTheme::warning(),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(p, area);
}

fn render_result(f: &mut Frame, area: Rect, prediction: &Prediction, session: &SessionState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let outcome = Paragraph::new(Line::from(vec![
        Span::styled("Last Predicted Outcome: ", MedicalTheme::info()),
        Span::styled(prediction.label.as_str(), MedicalTheme::label(prediction.label)),
        Span::styled(
            format!(" ({}% confidence)", prediction.confidence),
            MedicalTheme::info(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border_focused()),
    );
    f.render_widget(outcome, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(8)])
        .split(body[0]);

    render_input_table(f, left[0], prediction);
    render_history(f, left[1], session);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(body[1]);

    let age = prediction.input.get("Age");
    let glucose = prediction.input.get("Glucose");
    let bmi = prediction.input.get("BMI");

    render_scatter(f, charts[0], bmi, glucose, prediction);
    render_bar(
        f,
        charts[1],
        " Age vs Glucose Level ",
        age,
        glucose,
        MedicalTheme::CHART_GLUCOSE,
    );
    render_bar(
        f,
        charts[2],
        " Age vs BMI ",
        age,
        bmi,
        MedicalTheme::CHART_BMI,
    );
}

fn render_input_table(f: &mut Frame, area: Rect, prediction: &Prediction) {
    let header = Row::new(vec![
        Cell::from("Feature").style(MedicalTheme::subtitle()),
        Cell::from("Value").style(MedicalTheme::subtitle()),
    ]);

    let rows: Vec<Row> = prediction
        .input
        .iter()
        .map(|(name, value)| {
            Row::new(vec![
                Cell::from(name.to_string()).style(MedicalTheme::text_secondary()),
                Cell::from(format_value(value)).style(MedicalTheme::text()),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(60), Constraint::Percentage(40)])
        .header(header)
        .block(
            Block::default()
                .title(Span::styled(
                    " Patient Data Used for Prediction ",
                    MedicalTheme::subtitle(),
                ))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(table, area);
}

fn render_history(f: &mut Frame, area: Rect, session: &SessionState) {
    let items: Vec<ListItem> = session
        .history()
        .iter()
        .rev()
        .map(|p| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", p.created_at.format("%H:%M:%S")),
                    MedicalTheme::text_muted(),
                ),
                Span::styled(p.summary(), MedicalTheme::label(p.label)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(Span::styled(" Session History ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(list, area);
}

fn render_scatter(
    f: &mut Frame,
    area: Rect,
    bmi: Option<f64>,
    glucose: Option<f64>,
    prediction: &Prediction,
) {
    let block = Block::default()
        .title(Span::styled(" Glucose vs BMI ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let (Some(bmi), Some(glucose)) = (bmi, glucose) else {
        render_unavailable(f, area, block);
        return;
    };

    let points = [(bmi, glucose)];
    let x_max = axis_max(bmi);
    let y_max = axis_max(glucose);

    let dataset = Dataset::default()
        .name(prediction.label.as_str())
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(MedicalTheme::CHART_SCATTER))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title("BMI")
                .style(MedicalTheme::text_secondary())
                .bounds([0.0, x_max])
                .labels(axis_labels(x_max)),
        )
        .y_axis(
            Axis::default()
                .title("Glucose")
                .style(MedicalTheme::text_secondary())
                .bounds([0.0, y_max])
                .labels(axis_labels(y_max)),
        );

    f.render_widget(chart, area);
}

fn render_bar(
    f: &mut Frame,
    area: Rect,
    title: &'static str,
    age: Option<f64>,
    value: Option<f64>,
    color: ratatui::style::Color,
) {
    let block = Block::default()
        .title(Span::styled(title, MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let (Some(age), Some(value)) = (age, value) else {
        render_unavailable(f, area, block);
        return;
    };

    // Bar heights are integral; the exact value is shown as the bar text.
    let bar = Bar::default()
        .value(value.max(0.0).round() as u64)
        .text_value(format_value(value))
        .label(Line::from(format!("Age {}", format_value(age))))
        .style(Style::default().fg(color));

    let chart = BarChart::default()
        .block(block)
        .bar_width(12)
        .bar_gap(1)
        .value_style(MedicalTheme::title())
        .label_style(MedicalTheme::text_secondary())
        .data(BarGroup::default().bars(&[bar]))
        .max(axis_max(value).round() as u64);

    f.render_widget(chart, area);
}

fn render_unavailable(f: &mut Frame, area: Rect, block: Block) {
    let p = Paragraph::new(Span::styled(
        "Not available for this model's features.",
        MedicalTheme::text_muted(),
    ))
    .block(block);
    f.render_widget(p, area);
}

/// Upper axis bound leaving headroom above a single data point.
fn axis_max(value: f64) -> f64 {
    (value * 1.25).max(1.0)
}

fn axis_labels(max: f64) -> Vec<Span<'static>> {
    vec![
        Span::raw("0"),
        Span::raw(format!("{:.0}", max / 2.0)),
        Span::raw(format!("{max:.0}")),
    ]
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e12 {
        format!("{value:.0}")
    } else {
        format!("{value:.3}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{engineer_features, PatientMeasurements};
    use crate::tui::ui::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(session: &SessionState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal
            .draw(|f| render_home(f, f.area(), session))
            .unwrap();
        buffer_text(&terminal)
    }

    fn sample_prediction() -> Prediction {
        let measurements = PatientMeasurements {
            age: 45,
            glucose: 120.0,
            bmi: 28.0,
            insulin: 0.0,
            blood_pressure: 72.0,
            diabetes_pedigree: 0.35,
            pregnancies: 2,
            skin_thickness: 20.0,
        };
        Prediction::new(1, 0.8, engineer_features(&measurements))
    }

    #[test]
    fn test_empty_session_shows_warning() {
        let text = draw(&SessionState::new());
        assert!(text.contains("No prediction available yet."));
        assert!(!text.contains("Last Predicted Outcome"));
    }

    #[test]
    fn test_result_shows_outcome_table_and_charts() {
        let mut session = SessionState::new();
        session.record(sample_prediction());

        let text = draw(&session);
        assert!(text.contains("Last Predicted Outcome: Diabetic (79.2% confidence)"));
        assert!(text.contains("Patient Data Used for Prediction"));
        assert!(text.contains("Glucose_per_BMI"));
        assert!(text.contains("Glucose vs BMI"));
        assert!(text.contains("Age vs Glucose Level"));
        assert!(text.contains("Age vs BMI"));
    }

    #[test]
    fn test_charts_degrade_without_columns() {
        let mut session = SessionState::new();
        session.record(Prediction::new(0, 0.7, crate::domain::FeatureRow::new()));

        let text = draw(&session);
        assert!(text.contains("Not available for this model's features."));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(45.0), "45");
        assert_eq!(format_value(4.285714), "4.286");
    }
}
