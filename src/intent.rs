//! Intent classification over normalized text.
//!
//! Keyword containment, first matching category wins.

use crate::lang::Lang;

/// `(category, ru keywords, en keywords)` in fixed priority order.
const CATEGORIES: &[(&str, &[&str], &[&str])] = &[
    ("reminder", &["напомни", "напоминание", "не забудь"], &["remind", "reminder", "don't forget"]),
    ("task", &["запиши", "выполни", "задание"], &["do", "complete", "task"]),
    ("meeting", &["встреча", "собрание", "совещание"], &["meeting", "call", "appointment"]),
    ("birthday", &["день рождения", "др"], &["birthday", "bday"]),
];

pub const DEFAULT_INTENT: &str = "reminder";

/// Classify normalized (lowercased) text into an intent category.
pub fn classify(normalized: &str, lang: Lang) -> &'static str {
    for (category, ru, en) in CATEGORIES {
        let keywords = match lang {
            Lang::Ru => ru,
            Lang::En => en,
        };
        if keywords.iter().any(|kw| contains_keyword(normalized, kw)) {
            return category;
        }
    }
    DEFAULT_INTENT
}

/// Whole-word containment. Substring matching alone would let "до" trip the
/// "do" keyword inside transliterated text, and "др" fire inside "другой".
fn contains_keyword(text: &str, keyword: &str) -> bool {
    let mut start = 0;
    while let Some(idx) = text[start..].find(keyword) {
        let begin = start + idx;
        let end = begin + keyword.len();
        let before_ok = text[..begin].chars().next_back().is_none_or(|c| !c.is_alphanumeric());
        let after_ok = text[end..].chars().next().is_none_or(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        start = end;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_examples() {
        let cases: Vec<(&str, &str, Lang)> = vec![
            ("reminder", "напомни купить молоко завтра в 15:00", Lang::Ru),
            ("reminder", "remind me to call mom", Lang::En),
            ("meeting", "встреча с командой в понедельник", Lang::Ru),
            ("meeting", "meeting with team on monday morning", Lang::En),
            ("task", "запиши задание на завтра", Lang::Ru),
            ("task", "complete the report by friday", Lang::En),
            ("birthday", "др у маши 15 марта", Lang::Ru),
            ("birthday", "anna's birthday next week", Lang::En),
        ];

        for (expected, text, lang) in cases {
            assert_eq!(classify(text, lang), expected, "text: {text:?}");
        }
    }

    #[test]
    fn earlier_categories_outrank_later_ones() {
        // "напомни" (reminder) and "встреча" (meeting) both present.
        assert_eq!(classify("напомни что завтра встреча", Lang::Ru), "reminder");
        assert_eq!(classify("remind me about the birthday party", Lang::En), "reminder");
    }

    #[test]
    fn defaults_to_reminder() {
        assert_eq!(classify("купить молоко", Lang::Ru), "reminder");
        assert_eq!(classify("buy milk", Lang::En), "reminder");
    }

    #[test]
    fn keywords_only_match_whole_words() {
        assert_eq!(classify("другой вариант", Lang::Ru), "reminder");
        assert_eq!(classify("доделать завтра", Lang::Ru), "reminder");
    }
}
