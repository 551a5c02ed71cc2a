//! Diabetes measurement form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use zeroize::Zeroize;

use super::render_header;
use crate::domain::PatientMeasurements;
use crate::tui::styles::MedicalTheme;

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
    pub min: f64,
    pub max: Option<f64>,
    /// Only whole numbers are accepted
    pub integer: bool,
}

impl FormField {
    fn new(label: &'static str, hint: &'static str, min: f64) -> Self {
        Self {
            label,
            hint,
            value: String::new(),
            min,
            max: None,
            integer: false,
        }
    }

    fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    /// Parse the buffer. An empty buffer takes the field minimum.
    fn parse(&self) -> Result<f64, String> {
        let raw = self.value.trim();
        if raw.is_empty() {
            return Ok(self.min);
        }

        let value: f64 = raw
            .parse()
            .map_err(|_| format!("{}: Invalid number", self.label))?;

        if !value.is_finite() {
            return Err(format!("{}: Invalid number", self.label));
        }
        if self.integer && value.fract() != 0.0 {
            return Err(format!("{}: Must be a whole number", self.label));
        }
        if value < self.min {
            return Err(format!("{}: Must be at least {}", self.label, self.min));
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(format!(
                    "{}: Value must be between {} and {}",
                    self.label, self.min, max
                ));
            }
        }

        Ok(value)
    }
}

/// Result line shown under the form after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Success(String),
    Error(String),
}

/// Diabetes form state
pub struct DiabetesFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub status: Option<FormStatus>,
}

impl Default for DiabetesFormState {
    fn default() -> Self {
        // Order matches MEASUREMENT_COLUMNS.
        Self {
            fields: vec![
                FormField::new("Age", "years (18-100)", 18.0)
                    .max(100.0)
                    .integer(),
                FormField::new("Glucose Level", "mg/dL", 0.0),
                FormField::new("BMI", "kg/m²", 0.0),
                FormField::new("Insulin Level", "mu U/ml", 0.0),
                FormField::new("Blood Pressure", "mm Hg", 0.0),
                FormField::new("Diabetes Pedigree Function", "score", 0.0),
                FormField::new("Pregnancies", "count", 0.0).integer(),
                FormField::new("Skin Thickness", "mm", 0.0),
            ],
            selected_field: 0,
            status: None,
        }
    }
}

impl DiabetesFormState {
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field. Only digits and a decimal
    /// point are accepted; no measurement is negative.
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        let accepted = c.is_ascii_digit() || (c == '.' && !field.integer);
        if accepted {
            field.value.push(c);
            self.status = None;
        }
    }

    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.zeroize();
    }

    /// Wipe all field buffers from memory and clear values.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
        }
        self.status = None;
        self.selected_field = 0;
    }

    /// Validate and convert to measurements.
    ///
    /// # Errors
    /// Returns the first field that fails to parse or is out of range.
    pub fn to_measurements(&self) -> Result<PatientMeasurements, String> {
        let mut values = [0.0; 8];
        for (slot, field) in values.iter_mut().zip(self.fields.iter()) {
            *slot = field.parse()?;
        }

        // Integer fields were checked for a zero fractional part above.
        Ok(PatientMeasurements {
            age: values[0] as u32,
            glucose: values[1],
            bmi: values[2],
            insulin: values[3],
            blood_pressure: values[4],
            diabetes_pedigree: values[5],
            pregnancies: values[6] as u32,
            skin_thickness: values[7],
        })
    }

    /// Load a typical adult record for trying the form out.
    pub fn load_sample_data(&mut self) {
        let sample = [
            "45",   // age (years)
            "120",  // glucose (mg/dL)
            "28.0", // bmi
            "0",    // insulin (mu U/ml)
            "72",   // blood pressure (mm Hg)
            "0.35", // pedigree
            "2",    // pregnancies
            "20",   // skin thickness (mm)
        ];
        for (field, val) in self.fields.iter_mut().zip(sample) {
            field.value = val.to_string();
        }
        self.status = None;
    }
}

/// Render the diabetes form
pub fn render_diabetes_form(f: &mut Frame, area: Rect, state: &DiabetesFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Result
            Constraint::Length(2), // Key hints
        ])
        .split(area);

    render_header(
        f,
        chunks[0],
        "Diabetes Risk Predictor",
        "Enter the following information:",
    );
    render_form_fields(f, chunks[1], state);
    render_status(f, chunks[2], state);
    render_key_hints(f, chunks[3]);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &DiabetesFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = state.fields.len().div_ceil(2);

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = if field.value.is_empty() {
            Span::styled(field.hint, MedicalTheme::text_muted())
        } else {
            Span::styled(field.value.as_str(), MedicalTheme::text())
        };

        let cursor = if is_selected {
            Span::styled("▌", MedicalTheme::cursor())
        } else {
            Span::raw("")
        };

        let content = Paragraph::new(Line::from(vec![Span::raw(" "), value_display, cursor]))
            .block(block);

        f.render_widget(content, chunks[i]);
    }
}

fn render_status(f: &mut Frame, area: Rect, state: &DiabetesFormState) {
    let line = match &state.status {
        Some(FormStatus::Success(msg)) => Line::from(vec![
            Span::styled("✓ ", MedicalTheme::success()),
            Span::styled(msg.as_str(), MedicalTheme::success()),
        ]),
        Some(FormStatus::Error(msg)) => Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(msg.as_str(), MedicalTheme::danger()),
        ]),
        None => Line::from(Span::styled(
            "Press Enter to predict.",
            MedicalTheme::text_muted(),
        )),
    };

    let p = Paragraph::new(line)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(p, area);
}

fn render_key_hints(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled("[↑↓/Tab] ", MedicalTheme::key_hint()),
        Span::styled("Navigate ", MedicalTheme::key_desc()),
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled("Predict ", MedicalTheme::key_desc()),
        Span::styled("[S] ", MedicalTheme::key_hint()),
        Span::styled("Sample Data ", MedicalTheme::key_desc()),
        Span::styled("[Del] ", MedicalTheme::key_hint()),
        Span::styled("Clear Field ", MedicalTheme::key_desc()),
        Span::styled("[C] ", MedicalTheme::key_hint()),
        Span::styled("Clear All", MedicalTheme::key_desc()),
    ]);

    f.render_widget(Paragraph::new(hints), area);
}
