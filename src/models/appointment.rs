use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored appointment as it crosses the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

/// Candidate record from a create request. Every field is optional on the
/// wire so a missing one turns into a validation message instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

/// A record that passed validation and is ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidAppointment {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

impl NewAppointment {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            date: Some(date.into()),
            time: Some(time.into()),
        }
    }

    /// Checks the required fields and stamps `created_at`.
    ///
    /// All problems are reported at once, in field order.
    pub fn validate(self) -> Result<ValidAppointment> {
        let mut problems = Vec::new();

        let title = required("title", self.title, &mut problems);
        let description = required("description", self.description, &mut problems);
        let date = required("date", self.date, &mut problems).and_then(|raw| {
            let parsed = parse_date(&raw);
            if parsed.is_none() {
                problems.push(format!("date: `{}` is not a valid date", raw));
            }
            parsed
        });
        let time = required("time", self.time, &mut problems);

        match (title, description, date, time) {
            (Some(title), Some(description), Some(date), Some(time)) if problems.is_empty() => {
                Ok(ValidAppointment {
                    title,
                    description,
                    date,
                    time,
                    created_at: now_millis(),
                })
            }
            _ => Err(AppError::Validation(format!(
                "appointment validation failed: {}",
                problems.join(", ")
            ))),
        }
    }
}

impl ValidAppointment {
    pub fn with_id(self, id: String) -> Appointment {
        Appointment {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            created_at: self.created_at,
        }
    }
}

/// Current time truncated to the millisecond precision of stored datetimes.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

fn required(field: &str, value: Option<String>, problems: &mut Vec<String>) -> Option<String> {
    match value {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            problems.push(format!("{}: is required", field));
            None
        }
    }
}

/// Accepts a plain calendar date or a full RFC 3339 timestamp, keeping the
/// UTC date of the latter.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|ts| ts.with_timezone(&Utc).date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dentist() -> NewAppointment {
        NewAppointment::new("Dentist", "Checkup", "2024-05-01", "09:00")
    }

    #[test]
    fn accepts_complete_record() {
        let valid = dentist().validate().unwrap();
        assert_eq!(valid.title, "Dentist");
        assert_eq!(valid.description, "Checkup");
        assert_eq!(valid.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(valid.time, "09:00");
    }

    #[test]
    fn created_at_has_millisecond_precision() {
        let valid = dentist().validate().unwrap();
        assert_eq!(valid.created_at.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn rejects_missing_field() {
        let candidate = NewAppointment {
            description: None,
            ..dentist()
        };
        match candidate.validate() {
            Err(AppError::Validation(message)) => {
                assert!(message.contains("description: is required"), "{}", message)
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_empty_strings_and_names_every_field() {
        let candidate = NewAppointment::new("", "Checkup", "", "");
        let Err(AppError::Validation(message)) = candidate.validate() else {
            panic!("expected validation error");
        };
        assert!(message.contains("title"));
        assert!(message.contains("date"));
        assert!(message.contains("time"));
        assert!(!message.contains("description"));
    }

    #[test]
    fn rejects_unparseable_date() {
        let candidate = NewAppointment {
            date: Some("next tuesday".to_string()),
            ..dentist()
        };
        let Err(AppError::Validation(message)) = candidate.validate() else {
            panic!("expected validation error");
        };
        assert!(message.contains("not a valid date"));
    }

    #[test]
    fn coerces_timestamp_to_date() {
        assert_eq!(
            parse_date("2024-05-01T23:30:00-02:00"),
            NaiveDate::from_ymd_opt(2024, 5, 2)
        );
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let appointment = dentist().validate().unwrap().with_id("abc".to_string());
        let json = serde_json::to_value(&appointment).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["date"], "2024-05-01");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("_id").is_none());
    }
}
