use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::engine::{ReminderParser, RuleBasedParser};
use crate::lang::Lang;
use crate::time_expr::TimeExpression;

static DEFAULT_PARSER: Lazy<RuleBasedParser> = Lazy::new(RuleBasedParser::new);

/// Parsing context.
///
/// This holds environment needed to resolve relative expressions (like "tomorrow").
#[derive(Debug, Clone)]
pub struct Context {
    /// Reference datetime used to resolve relative expressions. UTC, naive.
    pub reference_time: NaiveDateTime,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            let date = NaiveDate::from_ymd_opt(2013, 2, 12).unwrap();
            let time = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
            Self { reference_time: NaiveDateTime::new(date, time) }
        } else {
            Self { reference_time: Utc::now().naive_utc() }
        }
    }
}

/// Options that affect parsing behavior.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Skip language detection and use this language.
    pub language_hint: Option<Lang>,
}

/// A tagged span found in input.
///
/// `start`/`end` are character offsets into the text the span was
/// extracted from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    /// Slice of the text that matched.
    pub text: String,
    /// Open string tag: `"TIME"`, `"DATE"`, `"PERSON"`, ...
    pub label: String,
    /// Start character index of the span.
    pub start: usize,
    /// End character index of the span (exclusive).
    pub end: usize,
    /// Tagger confidence for this span.
    pub confidence: f64,
}

/// Result from [`parse`] and [`parse_with`].
///
/// Created fresh per call; nothing is retained between calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedReminder {
    /// The input text, untouched.
    pub raw_text: String,
    /// Whitespace-collapsed, lowercased input.
    pub normalized_text: String,
    /// What to remind about, with the input's original casing.
    pub action: String,
    /// When to remind.
    pub time_expression: TimeExpression,
    /// Tagged spans, in offset order.
    pub entities: Vec<Entity>,
    /// Detected (or hinted) language.
    pub language: Lang,
    /// Coarse purpose category.
    pub intent: String,
    /// Overall parse confidence in [0.1, 0.95] on the rule path.
    pub confidence: f64,
}

/// Service health report.
#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub healthy: bool,
    pub version: &'static str,
    pub supported_languages: &'static [&'static str],
}

/// Parse `text` with a default [`Context`].
///
/// # Example
/// ```
/// use mnemon::parse;
///
/// let out = parse("remind me to buy milk in 2 hours");
/// assert_eq!(out.action, "buy milk");
/// ```
pub fn parse(text: &str) -> ParsedReminder {
    parse_with(text, &Context::default(), &Options::default())
}

/// Parse `text` with the provided `context`/`options`.
///
/// Use this for deterministic output by supplying a reference time. Total:
/// returns a value for any input string, including empty and garbage text.
pub fn parse_with(text: &str, context: &Context, options: &Options) -> ParsedReminder {
    DEFAULT_PARSER.parse(text, options.language_hint, context)
}

/// Report whether the engine is ready to serve.
///
/// The rule path has no external dependency, so this is always healthy once
/// the process is up.
pub fn health() -> Health {
    Health {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        supported_languages: &["ru", "en"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_expr::TimeKind;
    use chrono::NaiveDate;

    fn reference_context() -> Context {
        let date = NaiveDate::from_ymd_opt(2013, 2, 12).unwrap();
        let time = NaiveTime::from_hms_opt(4, 30, 0).unwrap();
        Context { reference_time: NaiveDateTime::new(date, time) }
    }

    fn at(month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, month, day).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn russian_absolute_reminder() {
        let out = parse_with(
            "напомни купить молоко завтра в 15:00",
            &reference_context(),
            &Options::default(),
        );

        assert_eq!(out.language, Lang::Ru);
        assert_eq!(out.action, "купить молоко");
        assert_eq!(out.intent, "reminder");
        assert_eq!(out.time_expression.kind, TimeKind::Absolute);
        assert_eq!(out.time_expression.datetime, Some(at(2, 13, 15, 0)));
        assert!(out.confidence >= 0.8);
    }

    #[test]
    fn english_absolute_reminder() {
        let out = parse_with(
            "Remind me to call John tomorrow at 3 PM",
            &reference_context(),
            &Options::default(),
        );

        assert_eq!(out.language, Lang::En);
        assert_eq!(out.action, "call John");
        assert_eq!(out.time_expression.kind, TimeKind::Absolute);
        assert_eq!(out.time_expression.datetime, Some(at(2, 13, 15, 0)));
    }

    #[test]
    fn weekday_with_day_part() {
        let out = parse_with(
            "Meeting with team on Monday morning",
            &reference_context(),
            &Options::default(),
        );

        assert_eq!(out.intent, "meeting");
        assert_eq!(out.time_expression.kind, TimeKind::Absolute);
        // Tuesday reference: next Monday is six days out.
        assert_eq!(out.time_expression.datetime, Some(at(2, 18, 9, 0)));
    }

    #[test]
    fn russian_relative_reminder() {
        let out = parse_with(
            "Напомни отправить отчет через 2 часа",
            &reference_context(),
            &Options::default(),
        );

        assert_eq!(out.action, "отправить отчет");
        assert_eq!(out.time_expression.kind, TimeKind::Relative);
        assert_eq!(out.time_expression.relative_seconds, Some(7200));
    }

    #[test]
    fn unstructured_text_hits_every_fallback() {
        let out = parse_with("xyz", &reference_context(), &Options::default());

        assert_eq!(out.time_expression.kind, TimeKind::Relative);
        assert_eq!(out.time_expression.relative_seconds, Some(3600));
        assert!((out.time_expression.confidence - 0.1).abs() < 1e-9);
        assert_eq!(out.action, "reminder");
    }

    #[test]
    fn parse_is_total() {
        let inputs = [
            "",
            "   ",
            "\t\n",
            "xyz",
            "!!!???",
            "日本語のテキスト",
            "a",
            "напомни",
            "🎉🎉🎉",
            "remind me in 9223372036854775807 minutes",
            "in 99999999999999999999999 hours",
        ];

        for input in inputs {
            let out = parse_with(input, &reference_context(), &Options::default());
            assert_eq!(out.raw_text, input);
            assert!((0.1..=0.95).contains(&out.confidence), "input: {input:?}");
            for entity in &out.entities {
                assert!(entity.start < entity.end);
            }
        }
    }

    #[test]
    fn default_context_parse_is_deterministic_in_tests() {
        let out = parse("today at 18:00");
        assert_eq!(out.time_expression.datetime, Some(at(2, 12, 18, 0)));
    }
}
