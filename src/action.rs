//! Action extraction: what the reminder is about.
//!
//! Works on a whitespace-collapsed, case-preserved copy of the raw text so
//! the returned action keeps the caller's casing; all stripping is
//! case-insensitive.

use log::debug;

use crate::analyze::AnalyzedDoc;
use crate::lang::{self, Lang};
use crate::patterns;
use crate::time_expr::TimeExpression;

/// Extract the action phrase. Total: always returns a non-empty string.
pub fn extract(raw_text: &str, time: &TimeExpression, lang: Lang, doc: &AnalyzedDoc) -> String {
    let table = patterns::for_lang(lang);

    let collapsed = lang::collapse_whitespace(raw_text);
    let mut text = remove_phrase(&collapsed, &time.natural_language);
    debug!("action text without time phrase: {text:?}");

    for prefix in &table.command_prefixes {
        text = prefix.replace_all(&text, "").into_owned();
    }
    for filler in &table.filler_patterns {
        text = filler.replace_all(&text, "").into_owned();
    }

    let cleaned = lang::collapse_whitespace(&text);
    let cleaned = cleaned
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | ':' | ';'))
        .to_string();
    debug!("action text after stripping: {cleaned:?}");

    let lower = cleaned.to_lowercase();
    let acceptable = cleaned.chars().count() >= 3
        && !table.bare_action_blacklist.contains(&lower.as_str())
        && has_content_word(&cleaned, doc);
    if acceptable {
        return cleaned;
    }

    debug!("action heuristics exhausted, falling back to salient tokens");
    salient_tokens(doc, lang).unwrap_or_else(|| table.fallback_action.to_string())
}

/// Remove the first case-insensitive occurrence of `phrase` from `text`.
fn remove_phrase(text: &str, phrase: &str) -> String {
    if phrase.is_empty() {
        return text.to_string();
    }

    let folded = lang::fold_for_search(text);
    let Some(byte_start) = folded.find(phrase) else {
        return text.to_string();
    };

    let char_start = folded[..byte_start].chars().count();
    let char_len = phrase.chars().count();

    text.chars()
        .enumerate()
        .filter(|(idx, _)| *idx < char_start || *idx >= char_start + char_len)
        .map(|(_, c)| c)
        .collect()
}

/// True when at least one whitespace token of `text` is a content word
/// according to the analyzed document.
fn has_content_word(text: &str, doc: &AnalyzedDoc) -> bool {
    text.split_whitespace().any(|word| {
        let word = word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
        !word.is_empty()
            && doc.tokens.iter().any(|tok| tok.pos.is_content_word() && tok.text == word)
    })
}

/// First three content-word tokens (excluding bare trigger verbs), joined in
/// original order.
fn salient_tokens(doc: &AnalyzedDoc, lang: Lang) -> Option<String> {
    let table = patterns::for_lang(lang);

    let words: Vec<&str> = doc
        .tokens
        .iter()
        .filter(|tok| !table.trigger_words.contains(&tok.text.as_str()))
        .filter(|tok| tok.pos.is_content_word() && tok.text.chars().count() > 2)
        .take(3)
        .map(|tok| tok.text.as_str())
        .collect();

    if words.is_empty() { None } else { Some(words.join(" ")) }
}
