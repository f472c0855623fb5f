//! Overall parse confidence.
//!
//! Additive scoring over three independent signals, clamped to [0.1, 0.95].
//! The floor keeps downstream consumers from dividing by zero on gibberish;
//! the ceiling leaves headroom for model-backed rescoring.

use crate::lang::Lang;
use crate::patterns;
use crate::time_expr::{TimeExpression, TimeKind};

pub const FLOOR: f64 = 0.1;
pub const CEILING: f64 = 0.95;

/// Score a completed parse.
pub fn score(text: &str, action: &str, time: &TimeExpression) -> f64 {
    let mut confidence: f64 = 0.5;

    if time.kind == TimeKind::Absolute && time.datetime.is_some() {
        confidence += 0.3;
    }
    // Either language's generic noun counts as a fallback action; detection
    // and extraction can disagree on language.
    let generic =
        [Lang::Ru, Lang::En].iter().any(|lang| action == patterns::for_lang(*lang).fallback_action);
    if !generic {
        confidence += 0.1;
    }
    if text.split_whitespace().count() > 3 {
        confidence += 0.1;
    }

    confidence.clamp(FLOOR, CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn absolute() -> TimeExpression {
        let dt = NaiveDate::from_ymd_opt(2013, 2, 13).unwrap().and_hms_opt(15, 0, 0).unwrap();
        TimeExpression::absolute(dt, "завтра в 15:00", 0.8)
    }

    fn relative() -> TimeExpression {
        TimeExpression::relative(3600, "in 1 hour", 0.1)
    }

    #[test]
    fn all_signals_hit_the_ceiling() {
        let c = score("напомни купить молоко завтра в 15:00", "купить молоко", &absolute());
        assert!((c - 0.95).abs() < 1e-9);
    }

    #[test]
    fn generic_nouns_of_either_language_score_lower() {
        // No bonus for a fallback action even when detection picked the
        // other language.
        for action in ["reminder", "напоминание"] {
            let c = score("xyz", action, &relative());
            assert!((c - 0.5).abs() < 1e-9, "action: {action:?}");
        }
    }

    #[test]
    fn short_relative_parse() {
        // Relative time, real action, three tokens.
        let c = score("помыть машину завтра", "помыть машину", &relative());
        assert!((c - 0.6).abs() < 1e-9);
    }
}
