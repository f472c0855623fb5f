//! Stage 5: the guaranteed last resort. Cannot fail.

use crate::lang::Lang;
use crate::patterns;
use crate::time_expr::TimeExpression;

/// One hour from now, minimal confidence. Terminal state of the chain.
pub(crate) fn last_resort(lang: Lang) -> TimeExpression {
    TimeExpression::relative(3600, patterns::for_lang(lang).fallback_phrase, 0.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_expr::TimeKind;

    #[test]
    fn last_resort_is_one_hour() {
        for (lang, phrase) in [(Lang::Ru, "через 1 час"), (Lang::En, "in 1 hour")] {
            let expr = last_resort(lang);
            assert_eq!(expr.kind, TimeKind::Relative);
            assert_eq!(expr.relative_seconds, Some(3600));
            assert_eq!(expr.natural_language, phrase);
            assert!((expr.confidence - 0.1).abs() < 1e-9);
        }
    }
}
