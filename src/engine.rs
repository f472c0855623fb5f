//! The rule-based parsing pipeline.
//!
//! Detect language, normalize, analyze, resolve time, extract the action,
//! classify intent, score. Every step is total; the pipeline never fails.

use log::debug;

use crate::analyze::{HeuristicAnalyzer, LinguisticAnalyzer};
use crate::api::{Context, ParsedReminder};
use crate::lang::{self, Lang};
use crate::{action, confidence, intent, resolver};

/// One reminder parser. Implemented by the rule-based pipeline and by the
/// model overlay that wraps it.
pub trait ReminderParser: Send + Sync {
    fn parse(&self, text: &str, language: Option<Lang>, ctx: &Context) -> ParsedReminder;
}

/// The zero-model pipeline. Fully functional on its own.
pub struct RuleBasedParser {
    analyzer: Box<dyn LinguisticAnalyzer>,
}

impl RuleBasedParser {
    pub fn new() -> Self {
        Self { analyzer: Box::new(HeuristicAnalyzer) }
    }

    /// Swap in a real tagger model behind the analyzer seam.
    pub fn with_analyzer(analyzer: Box<dyn LinguisticAnalyzer>) -> Self {
        Self { analyzer }
    }
}

impl Default for RuleBasedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderParser for RuleBasedParser {
    fn parse(&self, text: &str, language: Option<Lang>, ctx: &Context) -> ParsedReminder {
        let lang = language.unwrap_or_else(|| lang::detect(text));
        let normalized = lang::normalize(text);
        debug!("parsing {normalized:?} as {lang}");

        let doc = self.analyzer.analyze(&normalized, lang);
        let time_expression = resolver::resolve(&normalized, lang, ctx.reference_time);
        let action = action::extract(text, &time_expression, lang, &doc);
        let intent = intent::classify(&normalized, lang).to_string();
        let confidence = confidence::score(&normalized, &action, &time_expression);

        ParsedReminder {
            raw_text: text.to_string(),
            normalized_text: normalized,
            action,
            time_expression,
            entities: doc.entities,
            language: lang,
            intent,
            confidence,
        }
    }
}
