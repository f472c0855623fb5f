//! Temporal resolver: an ordered fallback chain producing one
//! [`TimeExpression`].
//!
//! The chain is a fixed sequence of stages, each a total function from the
//! input to `Option<TimeExpression>`; the first stage that produces a value
//! wins. The last stage cannot fail, which makes [`resolve`] total:
//!
//! ```text
//! normalized text ── candidates (weekday + locale datetime)   0.7 / 0.8
//!                 ── relative durations ("через 2 часа")       0.85
//!                 ── bare day keywords ("завтра")              0.6
//!                 ── guaranteed 1-hour relative default        0.1
//! ```
//!
//! Stage order is a contract (see `patterns`): candidates are tried in
//! pattern-list order, then occurrence order, and later stages only run when
//! every earlier one declined.

#[path = "resolver/candidates.rs"]
mod candidates;
#[path = "resolver/fallback.rs"]
mod fallback;
#[path = "resolver/keyword.rs"]
mod keyword;
#[path = "resolver/relative.rs"]
mod relative;

use chrono::NaiveDateTime;
use log::debug;

use crate::lang::Lang;
use crate::time_expr::TimeExpression;
use crate::trigger::TriggerInfo;

pub(crate) struct ResolverInput<'a> {
    /// Normalized (lowercased, whitespace-collapsed) text.
    pub text: &'a str,
    pub lang: Lang,
    pub reference: NaiveDateTime,
    pub trigger: TriggerInfo,
}

/// One stage of the fallback chain.
pub(crate) trait ResolveStage: Sync {
    fn name(&self) -> &'static str;
    fn resolve(&self, input: &ResolverInput<'_>) -> Option<TimeExpression>;
}

static STAGES: [&(dyn ResolveStage + Sync); 3] =
    [&candidates::CandidateDates, &relative::RelativeDuration, &keyword::BareKeyword];

/// Resolve the temporal expression of `text`. Total: always returns a value.
pub fn resolve(text: &str, lang: Lang, reference: NaiveDateTime) -> TimeExpression {
    let input = ResolverInput { text, lang, reference, trigger: TriggerInfo::scan(text, lang) };

    for stage in STAGES {
        if let Some(expr) = stage.resolve(&input) {
            debug!("time resolved by {}: {:?} ({:?})", stage.name(), expr.natural_language, expr.kind);
            return expr;
        }
    }

    debug!("no time phrase recognized, using 1-hour fallback");
    fallback::last_resort(lang)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_expr::TimeKind;
    use chrono::{NaiveDate, NaiveDateTime};

    // Tuesday.
    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 2, 12).unwrap().and_hms_opt(4, 30, 0).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, 0).unwrap()
    }

    #[test]
    fn absolute_examples() {
        let cases: Vec<(NaiveDateTime, f64, Lang, &str)> = vec![
            (at(2013, 2, 13, 15, 0), 0.8, Lang::Ru, "напомни купить молоко завтра в 15:00"),
            (at(2013, 2, 13, 15, 0), 0.8, Lang::En, "remind me to call john tomorrow at 3 pm"),
            (at(2013, 2, 12, 15, 0), 0.8, Lang::En, "call john at 3 pm"),
            (at(2013, 2, 18, 9, 0), 0.7, Lang::En, "meeting with team on monday morning"),
            (at(2013, 2, 18, 9, 0), 0.7, Lang::En, "next monday"),
            (at(2013, 2, 15, 18, 0), 0.7, Lang::En, "dinner on friday evening"),
            (at(2013, 2, 15, 18, 0), 0.7, Lang::Ru, "ужин в пятницу вечером"),
            (at(2013, 2, 14, 10, 0), 0.8, Lang::Ru, "послезавтра в 10:00"),
            (at(2013, 3, 15, 9, 0), 0.8, Lang::Ru, "15 марта оплатить счет"),
        ];

        for (expected, confidence, lang, input) in cases {
            let expr = resolve(input, lang, reference());
            assert_eq!(expr.kind, TimeKind::Absolute, "input: {input:?}");
            assert_eq!(expr.datetime, Some(expected), "input: {input:?}");
            assert!((expr.confidence - confidence).abs() < 1e-9, "input: {input:?}");
        }
    }

    #[test]
    fn relative_examples() {
        let cases: Vec<(i64, Lang, &str)> = vec![
            (7200, Lang::Ru, "напомни отправить отчет через 2 часа"),
            (1800, Lang::En, "ping me in 30 minutes"),
            (604800, Lang::En, "in 1 week"),
            (259200, Lang::Ru, "спустя 3 дня"),
        ];

        for (seconds, lang, input) in cases {
            let expr = resolve(input, lang, reference());
            assert_eq!(expr.kind, TimeKind::Relative, "input: {input:?}");
            assert_eq!(expr.relative_seconds, Some(seconds), "input: {input:?}");
            assert!((expr.confidence - 0.85).abs() < 1e-9, "input: {input:?}");
        }
    }

    #[test]
    fn weekday_rollover_is_strictly_future() {
        // Reference is a Tuesday; a bare "tuesday" must resolve one week out.
        let expr = resolve("on tuesday", Lang::En, reference());
        assert_eq!(expr.datetime, Some(at(2013, 2, 19, 9, 0)));

        // Every weekday lands 1..=7 days ahead.
        for input in ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"] {
            let expr = resolve(input, Lang::En, reference());
            let days = (expr.datetime.unwrap().date() - reference().date()).num_days();
            assert!((1..=7).contains(&days), "input: {input:?}, days: {days}");
        }
    }

    #[test]
    fn bare_keyword_maps_to_nine_am() {
        let expr = resolve("не забудь про сегодня", Lang::Ru, reference());
        assert_eq!(expr.kind, TimeKind::Absolute);
        assert_eq!(expr.datetime, Some(at(2013, 2, 12, 9, 0)));
        assert!((expr.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn guaranteed_fallback_for_unstructured_text() {
        for (lang, input, phrase) in [
            (Lang::En, "xyz", "in 1 hour"),
            (Lang::En, "", "in 1 hour"),
            (Lang::Ru, "ничего особенного", "через 1 час"),
        ] {
            let expr = resolve(input, lang, reference());
            assert_eq!(expr.kind, TimeKind::Relative, "input: {input:?}");
            assert_eq!(expr.relative_seconds, Some(3600), "input: {input:?}");
            assert_eq!(expr.natural_language, phrase, "input: {input:?}");
            assert!((expr.confidence - 0.1).abs() < 1e-9, "input: {input:?}");
        }
    }
}
