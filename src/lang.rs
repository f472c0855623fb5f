//! Language detection and text normalization.

use serde::Serialize;

/// Supported languages.
///
/// Detection is a best-effort hint, not authoritative; callers may override
/// it via [`crate::Options::language_hint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ru,
    En,
}

impl Lang {
    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Lang> {
        match code.trim().to_lowercase().as_str() {
            "ru" => Some(Lang::Ru),
            "en" => Some(Lang::En),
            _ => None,
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guess the language of `text` by comparing Cyrillic vs Latin letter counts.
///
/// Anything that is not clearly Russian (including empty or non-alphabetic
/// input) defaults to English.
pub fn detect(text: &str) -> Lang {
    let cyrillic = text.chars().filter(|c| is_cyrillic(*c)).count();
    let latin = text.chars().filter(|c| c.is_ascii_alphabetic()).count();

    if cyrillic > latin { Lang::Ru } else { Lang::En }
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{04FF}')
}

/// Collapse whitespace runs to single spaces, trim, lowercase.
///
/// Total over any input, including empty strings.
pub fn normalize(text: &str) -> String {
    collapse_whitespace(text).to_lowercase()
}

/// Whitespace collapse + trim without case folding.
///
/// The action extractor works on this form so the returned action keeps the
/// caller's original casing.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase `text` while guaranteeing the result has the same char count.
///
/// Multi-char lowercase expansions (rare outside ru/en) keep the original
/// char, so char offsets computed against the folded string remain valid for
/// the unfolded one.
pub fn fold_for_search(text: &str) -> String {
    text.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_examples() {
        let cases: Vec<(Lang, &str)> = vec![
            (Lang::Ru, "напомни купить молоко завтра"),
            (Lang::Ru, "Привет world"),
            (Lang::En, "remind me to call john"),
            (Lang::En, "xyz"),
            (Lang::En, ""),
            (Lang::En, "1234 !!"),
        ];

        for (expected, input) in cases {
            assert_eq!(detect(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn normalize_collapses_and_folds() {
        assert_eq!(normalize("  Remind\t me \n NOW  "), "remind me now");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
        assert_eq!(normalize("НапОмни Мне"), "напомни мне");
    }

    #[test]
    fn fold_preserves_char_count() {
        let raw = "Remind me to call John";
        let folded = fold_for_search(raw);
        assert_eq!(folded, "remind me to call john");
        assert_eq!(folded.chars().count(), raw.chars().count());
    }
}
