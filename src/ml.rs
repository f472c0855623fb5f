//! Learned-model overlay.
//!
//! Wraps any [`ReminderParser`] and selectively overwrites intent, entities
//! and confidence with model output. Every model failure degrades to the
//! already-computed rule-based value; nothing propagates to the caller.

use std::collections::HashMap;

use log::warn;
use thiserror::Error;

use crate::api::{Context, Entity, ParsedReminder};
use crate::engine::ReminderParser;
use crate::lang::Lang;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model not loaded: {0}")]
    NotLoaded(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Output of a learned intent classifier.
#[derive(Debug, Clone)]
pub struct IntentPrediction {
    pub intent: String,
    pub confidence: f64,
    /// Full label -> probability mapping.
    pub probabilities: HashMap<String, f64>,
}

/// Learned intent classifier capability.
pub trait IntentModel: Send + Sync {
    fn predict(&self, text: &str) -> Result<IntentPrediction, ModelError>;
}

/// Learned entity tagger capability.
pub trait EntityTagger: Send + Sync {
    fn tag(&self, text: &str) -> Result<Vec<Entity>, ModelError>;
}

/// Decorator over a base parser. Models are attached once at startup and
/// never toggled per request.
pub struct MlOverlay {
    base: Box<dyn ReminderParser>,
    intent_model: Option<Box<dyn IntentModel>>,
    entity_tagger: Option<Box<dyn EntityTagger>>,
}

impl MlOverlay {
    pub fn new(base: Box<dyn ReminderParser>) -> Self {
        Self { base, intent_model: None, entity_tagger: None }
    }

    pub fn with_intent_model(mut self, model: Box<dyn IntentModel>) -> Self {
        self.intent_model = Some(model);
        self
    }

    pub fn with_entity_tagger(mut self, tagger: Box<dyn EntityTagger>) -> Self {
        self.entity_tagger = Some(tagger);
        self
    }

    /// Whether a learned intent classifier is attached.
    pub fn loaded(&self) -> bool {
        self.intent_model.is_some()
    }

    /// Whether a learned entity tagger is attached.
    pub fn ner_loaded(&self) -> bool {
        self.entity_tagger.is_some()
    }
}

impl ReminderParser for MlOverlay {
    fn parse(&self, text: &str, language: Option<Lang>, ctx: &Context) -> ParsedReminder {
        let mut parsed = self.base.parse(text, language, ctx);

        let Some(model) = &self.intent_model else {
            return parsed;
        };

        // Intent failure means the whole overlay steps aside: the result is
        // exactly the rule-based one.
        let intent_confidence = match model.predict(&parsed.normalized_text) {
            Ok(prediction) => {
                parsed.intent = prediction.intent;
                prediction.confidence
            }
            Err(err) => {
                warn!("intent model failed, keeping rule-based result: {err}");
                return parsed;
            }
        };

        if let Some(tagger) = &self.entity_tagger {
            match tagger.tag(&parsed.normalized_text) {
                Ok(spans) => parsed.entities = spans,
                Err(err) => warn!("entity tagger failed, keeping rule-based entities: {err}"),
            }
        }

        let entity_bonus = (0.05 * parsed.entities.len() as f64).min(0.2);
        parsed.confidence = ((intent_confidence + parsed.time_expression.confidence) / 2.0
            + entity_bonus)
            .clamp(0.1, 0.99);

        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RuleBasedParser;
    use chrono::NaiveDate;

    struct FixedIntent(&'static str, f64);

    impl IntentModel for FixedIntent {
        fn predict(&self, _text: &str) -> Result<IntentPrediction, ModelError> {
            Ok(IntentPrediction {
                intent: self.0.to_string(),
                confidence: self.1,
                probabilities: HashMap::from([(self.0.to_string(), self.1)]),
            })
        }
    }

    struct BrokenIntent;

    impl IntentModel for BrokenIntent {
        fn predict(&self, _text: &str) -> Result<IntentPrediction, ModelError> {
            Err(ModelError::Inference("tensor shape mismatch".into()))
        }
    }

    struct BrokenTagger;

    impl EntityTagger for BrokenTagger {
        fn tag(&self, _text: &str) -> Result<Vec<Entity>, ModelError> {
            Err(ModelError::NotLoaded("ner weights missing".into()))
        }
    }

    fn ctx() -> Context {
        Context {
            reference_time: NaiveDate::from_ymd_opt(2013, 2, 12)
                .unwrap()
                .and_hms_opt(4, 30, 0)
                .unwrap(),
        }
    }

    const TEXT: &str = "напомни купить молоко завтра в 15:00";

    #[test]
    fn without_models_delegates_to_the_base() {
        let overlay = MlOverlay::new(Box::new(RuleBasedParser::new()));
        assert!(!overlay.loaded());
        assert!(!overlay.ner_loaded());

        let base = RuleBasedParser::new().parse(TEXT, None, &ctx());
        assert_eq!(overlay.parse(TEXT, None, &ctx()), base);
    }

    #[test]
    fn intent_model_overwrites_intent_and_rescores() {
        let overlay = MlOverlay::new(Box::new(RuleBasedParser::new()))
            .with_intent_model(Box::new(FixedIntent("task", 0.9)));

        let parsed = overlay.parse(TEXT, None, &ctx());
        assert_eq!(parsed.intent, "task");

        // (0.9 + 0.8) / 2 + 0.05 per retained entity span.
        let expected = (0.9 + 0.8) / 2.0 + 0.05 * parsed.entities.len() as f64;
        assert!((parsed.confidence - expected).abs() < 1e-9);
        assert!(parsed.confidence <= 0.99);
    }

    #[test]
    fn intent_failure_falls_open_to_the_rule_based_result() {
        let overlay = MlOverlay::new(Box::new(RuleBasedParser::new()))
            .with_intent_model(Box::new(BrokenIntent))
            .with_entity_tagger(Box::new(BrokenTagger));

        let base = RuleBasedParser::new().parse(TEXT, None, &ctx());
        assert_eq!(overlay.parse(TEXT, None, &ctx()), base);
    }

    #[test]
    fn tagger_failure_keeps_rule_based_entities() {
        let overlay = MlOverlay::new(Box::new(RuleBasedParser::new()))
            .with_intent_model(Box::new(FixedIntent("reminder", 0.7)))
            .with_entity_tagger(Box::new(BrokenTagger));

        let base = RuleBasedParser::new().parse(TEXT, None, &ctx());
        let parsed = overlay.parse(TEXT, None, &ctx());
        assert_eq!(parsed.entities, base.entities);
        assert_eq!(parsed.intent, "reminder");
    }
}
