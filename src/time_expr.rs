//! The resolved "when" of a reminder.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Kind tag of a [`TimeExpression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeKind {
    Absolute,
    Relative,
    Recurring,
    Event,
    Unspecified,
}

/// A resolved temporal expression.
///
/// Exactly one of `datetime` / `relative_seconds` / `cron_expression` is
/// meaningful, determined by `kind`. `natural_language` carries the source
/// phrase the resolver matched (or the language's "in 1 hour" phrase for the
/// last-resort fallback).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeExpression {
    pub kind: TimeKind,
    pub datetime: Option<NaiveDateTime>,
    pub relative_seconds: Option<i64>,
    pub cron_expression: Option<String>,
    pub natural_language: String,
    pub confidence: f64,
}

impl TimeExpression {
    pub fn absolute(datetime: NaiveDateTime, phrase: impl Into<String>, confidence: f64) -> Self {
        TimeExpression {
            kind: TimeKind::Absolute,
            datetime: Some(datetime),
            relative_seconds: None,
            cron_expression: None,
            natural_language: phrase.into(),
            confidence,
        }
    }

    pub fn relative(seconds: i64, phrase: impl Into<String>, confidence: f64) -> Self {
        TimeExpression {
            kind: TimeKind::Relative,
            datetime: None,
            relative_seconds: Some(seconds),
            cron_expression: None,
            natural_language: phrase.into(),
            confidence,
        }
    }

    /// Recurring schedules are never produced by the resolver chain; the
    /// constructor completes the tagged union for transport mapping.
    pub fn recurring(cron: impl Into<String>, phrase: impl Into<String>, confidence: f64) -> Self {
        TimeExpression {
            kind: TimeKind::Recurring,
            datetime: None,
            relative_seconds: None,
            cron_expression: Some(cron.into()),
            natural_language: phrase.into(),
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn constructors_set_exactly_one_payload() {
        let dt = NaiveDate::from_ymd_opt(2013, 2, 13).unwrap().and_hms_opt(15, 0, 0).unwrap();

        let abs = TimeExpression::absolute(dt, "завтра в 15:00", 0.8);
        assert_eq!(abs.kind, TimeKind::Absolute);
        assert_eq!(abs.datetime, Some(dt));
        assert_eq!(abs.relative_seconds, None);
        assert_eq!(abs.cron_expression, None);

        let rel = TimeExpression::relative(7200, "in 2 hours", 0.85);
        assert_eq!(rel.kind, TimeKind::Relative);
        assert_eq!(rel.relative_seconds, Some(7200));
        assert_eq!(rel.datetime, None);

        let rec = TimeExpression::recurring("0 9 * * 1", "every monday", 0.5);
        assert_eq!(rec.kind, TimeKind::Recurring);
        assert_eq!(rec.cron_expression.as_deref(), Some("0 9 * * 1"));
    }
}
