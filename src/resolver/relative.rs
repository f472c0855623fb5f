//! Stage 3: relative-duration phrases ("через 2 часа", "in 30 minutes").

use crate::lang::Lang;
use crate::patterns;
use crate::resolver::{ResolveStage, ResolverInput};
use crate::time_expr::TimeExpression;

pub(crate) struct RelativeDuration;

impl ResolveStage for RelativeDuration {
    fn name(&self) -> &'static str {
        "relative duration"
    }

    fn resolve(&self, input: &ResolverInput<'_>) -> Option<TimeExpression> {
        let table = patterns::for_lang(input.lang);

        for pattern in &table.relative_patterns {
            let Some(captures) = pattern.regex.captures(input.text) else {
                continue;
            };
            let Some(amount) = captures.get(pattern.amount_group).and_then(|m| m.as_str().parse::<i64>().ok())
            else {
                continue;
            };
            let Some(unit) = captures.get(pattern.unit_group).map(|m| m.as_str().to_lowercase()) else {
                continue;
            };
            let Some(multiplier) = table.unit_seconds(&unit) else {
                continue;
            };
            // Absurd amounts overflow the seconds payload; decline instead
            // of panicking so the chain can fall through.
            let Some(seconds) = amount.checked_mul(multiplier) else {
                continue;
            };

            let phrase = match input.lang {
                Lang::Ru => format!("через {amount} {unit}"),
                Lang::En => format!("in {amount} {unit}"),
            };
            return Some(TimeExpression::relative(seconds, phrase, 0.85));
        }

        None
    }
}
