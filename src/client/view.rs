use crate::models::{Appointment, NewAppointment};

pub const HEADING: &str = "Appointment Calendar";
pub const SUMMARY_HEADING: &str = "Upcoming Appointments";

/// Input field of the add dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Date,
    Time,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Title, Field::Description, Field::Date, Field::Time];

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Description => "Description",
            Field::Date => "Date",
            Field::Time => "Time",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(name))
    }
}

/// Values typed into the add dialog so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
}

impl Draft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Date => &self.date,
            Field::Time => &self.time,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Date => &mut self.date,
            Field::Time => &mut self.time,
        };
        *slot = value.into();
    }

    pub fn to_request(&self) -> NewAppointment {
        NewAppointment::new(
            self.title.clone(),
            self.description.clone(),
            self.date.clone(),
            self.time.clone(),
        )
    }
}

/// Local view flags: which list mode is shown and whether the add dialog
/// is open (with its draft).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub summary: bool,
    pub dialog: Option<Draft>,
}

impl ViewState {
    pub fn toggle_label(&self) -> &'static str {
        if self.summary { "Back to Calendar" } else { "View Summary" }
    }
}

/// An in-progress drag in board mode. Tracks where the dragged row
/// currently sits so each hover moves it one step further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub index: usize,
}

impl DragSession {
    /// Returns the `(from, to)` move a hover over row `target` triggers,
    /// updating the tracked position. Hovering over itself does nothing.
    pub fn hover(&mut self, target: usize) -> Option<(usize, usize)> {
        if target == self.index {
            return None;
        }
        let from = self.index;
        self.index = target;
        Some((from, target))
    }
}

fn row(appointment: &Appointment) -> String {
    format!("{} - {}", appointment.title, appointment.time)
}

/// Renders the screen as text lines.
pub fn render(appointments: &[Appointment], view: &ViewState) -> Vec<String> {
    let mut lines = vec![
        HEADING.to_string(),
        format!("[Add Appointment]  [{}]", view.toggle_label()),
        String::new(),
    ];

    if view.summary {
        lines.push(SUMMARY_HEADING.to_string());
        lines.extend(
            appointments
                .iter()
                .enumerate()
                .map(|(i, a)| format!("  {:>2}. {}  [Delete]", i + 1, row(a))),
        );
    } else {
        lines.extend(
            appointments
                .iter()
                .enumerate()
                .map(|(i, a)| format!("  {:>2} ≡ {}  [Delete]", i + 1, row(a))),
        );
    }

    if let Some(draft) = &view.dialog {
        lines.push(String::new());
        lines.push("+-- Add Appointment --".to_string());
        for field in Field::ALL {
            lines.push(format!("| {:<12} {}", format!("{}:", field.label()), draft.get(field)));
        }
        lines.push("+-- [Cancel] [Add] --".to_string());
    }

    lines
}
