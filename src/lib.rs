extern crate self as mnemon;

#[macro_use]
mod macros;

mod action;
mod analyze;
mod api;
mod confidence;
mod engine;
mod intent;
mod lang;
mod ml;
mod patterns;
mod resolver;
mod time_expr;
mod trigger;

pub use analyze::{AnalyzedDoc, AnalyzedToken, HeuristicAnalyzer, LinguisticAnalyzer, Pos};
pub use api::{Context, Entity, Health, Options, ParsedReminder, health, parse, parse_with};
pub use engine::{ReminderParser, RuleBasedParser};
pub use lang::Lang;
pub use ml::{EntityTagger, IntentModel, IntentPrediction, MlOverlay, ModelError};
pub use time_expr::{TimeExpression, TimeKind};
