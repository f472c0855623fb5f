//! Linguistic analyzer capability.
//!
//! The engine consumes tokenization, part-of-speech tags and named-entity
//! spans through [`LinguisticAnalyzer`]; real tagger models plug in behind
//! the same trait. [`HeuristicAnalyzer`] is the built-in "blank pipeline":
//! degraded tag quality, never a hard failure.

use crate::api::Entity;
use crate::lang::Lang;
use crate::patterns;

/// Coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pos {
    Verb,
    Noun,
    Propn,
    Num,
    Other,
}

impl Pos {
    /// Tags the salient-token action fallback accepts.
    pub fn is_content_word(self) -> bool {
        matches!(self, Pos::Verb | Pos::Noun | Pos::Propn)
    }
}

/// One analyzed token. `start`/`end` are character offsets.
#[derive(Debug, Clone)]
pub struct AnalyzedToken {
    pub text: String,
    pub pos: Pos,
    pub start: usize,
    pub end: usize,
}

/// Tokenized/tagged view of one input text.
#[derive(Debug, Clone, Default)]
pub struct AnalyzedDoc {
    pub tokens: Vec<AnalyzedToken>,
    pub entities: Vec<Entity>,
}

/// External linguistic analyzer contract.
///
/// Implementations must be read-only per call and safe for unsynchronized
/// concurrent use.
pub trait LinguisticAnalyzer: Send + Sync {
    fn analyze(&self, text: &str, lang: Lang) -> AnalyzedDoc;
}

/// Rule-of-thumb analyzer used when no language model is available.
///
/// Tokenizes on non-alphanumeric boundaries, guesses POS from the language's
/// command-verb stems and vowel structure, and tags TIME/DATE spans with the
/// shared pattern vocabulary. Tokens without a recognizable vowel (for
/// example bare consonant gibberish) get [`Pos::Other`].
#[derive(Debug, Default)]
pub struct HeuristicAnalyzer;

const RU_VOWELS: &str = "аеёиоуыэюя";
const EN_VOWELS: &str = "aeiou";

impl LinguisticAnalyzer for HeuristicAnalyzer {
    fn analyze(&self, text: &str, lang: Lang) -> AnalyzedDoc {
        let tokens = tokenize(text)
            .into_iter()
            .map(|(tok, start, end)| {
                let pos = guess_pos(&tok, lang);
                AnalyzedToken { text: tok, pos, start, end }
            })
            .collect();

        AnalyzedDoc { tokens, entities: tag_entities(text, lang) }
    }
}

fn tokenize(text: &str) -> Vec<(String, usize, usize)> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut start = 0usize;

    for (idx, c) in text.chars().enumerate() {
        if c.is_alphanumeric() || c == '\'' {
            if current.is_empty() {
                start = idx;
            }
            current.push(c);
        } else if !current.is_empty() {
            out.push((std::mem::take(&mut current), start, idx));
        }
    }
    if !current.is_empty() {
        let end = start + current.chars().count();
        out.push((current, start, end));
    }
    out
}

fn guess_pos(token: &str, lang: Lang) -> Pos {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return Pos::Num;
    }

    let lower = token.to_lowercase();
    let table = patterns::for_lang(lang);
    if table.command_verbs.iter().any(|stem| lower.starts_with(stem)) {
        return Pos::Verb;
    }

    if token.chars().next().is_some_and(|c| c.is_uppercase()) {
        return Pos::Propn;
    }

    let vowels = match lang {
        Lang::Ru => RU_VOWELS,
        Lang::En => EN_VOWELS,
    };
    if lower.chars().any(|c| vowels.contains(c)) { Pos::Noun } else { Pos::Other }
}

fn tag_entities(text: &str, lang: Lang) -> Vec<Entity> {
    let mut entities = Vec::new();

    for m in regex!(r"\d{1,2}[:.]\d{2}(?:\s*(?:am|pm))?|\b\d{1,2}\s*(?:am|pm)\b").find_iter(text) {
        entities.push(span_entity(text, m.start(), m.end(), "TIME"));
    }

    let table = patterns::for_lang(lang);
    let date_names =
        table.weekdays.iter().map(|(name, _)| *name).chain(table.months.iter().map(|(name, _)| *name));
    for name in date_names {
        if let Some(byte_start) = text.find(name) {
            entities.push(span_entity(text, byte_start, byte_start + name.len(), "DATE"));
        }
    }

    entities.sort_by_key(|e| (e.start, e.end));
    entities
}

fn span_entity(text: &str, byte_start: usize, byte_end: usize, label: &str) -> Entity {
    let start = text[..byte_start].chars().count();
    let end = text[..byte_end].chars().count();
    Entity {
        text: text[byte_start..byte_end].to_string(),
        label: label.to_string(),
        start,
        end,
        confidence: 1.0,
    }
}
