//! Stage 4: bare day keywords ("сегодня", "tomorrow") at the default 09:00.

use chrono::Duration;

use crate::patterns;
use crate::resolver::{ResolveStage, ResolverInput};
use crate::time_expr::TimeExpression;

pub(crate) struct BareKeyword;

impl ResolveStage for BareKeyword {
    fn name(&self) -> &'static str {
        "bare day keyword"
    }

    fn resolve(&self, input: &ResolverInput<'_>) -> Option<TimeExpression> {
        let table = patterns::for_lang(input.lang);

        for (pattern, offset) in &table.day_keywords {
            let Some(m) = pattern.find(input.text) else {
                continue;
            };
            let Some(dt) = (input.reference.date() + Duration::days(*offset)).and_hms_opt(9, 0, 0)
            else {
                continue;
            };
            return Some(TimeExpression::absolute(dt, m.as_str(), 0.6));
        }

        None
    }
}
