//! Per-language pattern tables.
//!
//! One read-only [`LanguagePatterns`] per supported language, compiled lazily
//! on first use and shared by reference afterwards. Nothing here is mutated
//! after construction, so concurrent readers need no synchronization.
//!
//! Pattern order is part of the contract: the temporal resolver walks
//! `time_patterns` in declaration order and returns on the first candidate a
//! stage accepts.

use chrono::Weekday;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::lang::Lang;
use crate::trigger::BucketMask;

/// One candidate time-phrase pattern with its trigger requirement.
pub struct TimePattern {
    pub regex: &'static Regex,
    pub buckets: BucketMask,
}

/// Relative-duration pattern triple: regex plus capture-group indexes for the
/// integer amount and the unit token.
pub struct RelativePattern {
    pub regex: &'static Regex,
    pub amount_group: usize,
    pub unit_group: usize,
}

pub struct LanguagePatterns {
    /// Ordered candidate time-phrase patterns (stage 1 of the resolver).
    pub time_patterns: Vec<TimePattern>,
    /// Ordered relative-duration triples (stage 3).
    pub relative_patterns: Vec<RelativePattern>,
    /// Command prefixes stripped from the action text, in order.
    pub command_prefixes: Vec<&'static Regex>,
    /// Filler words removed from the action text as whole words, in order.
    pub filler_patterns: Vec<Regex>,
    /// Unit prefix -> seconds. Longest matching prefix wins.
    pub time_units: &'static [(&'static str, i64)],
    /// Weekday name forms (including oblique cases for ru).
    pub weekdays: &'static [(&'static str, Weekday)],
    /// Day-part keyword -> (hour, minute) override.
    pub day_parts: &'static [(&'static str, (u32, u32))],
    /// Bare day keywords (stage 4): whole-word regex -> day offset.
    /// Longer forms come first so "послезавтра" wins over "завтра".
    pub day_keywords: Vec<(&'static Regex, i64)>,
    /// Month name -> month number.
    pub months: &'static [(&'static str, u32)],
    /// Command-verb stems, used by the heuristic analyzer's POS guess.
    pub command_verbs: &'static [&'static str],
    /// Tokens excluded from the salient-token action fallback.
    pub trigger_words: &'static [&'static str],
    /// Bare trigger words that never count as an action on their own.
    pub bare_action_blacklist: &'static [&'static str],
    /// Generic action noun returned when every heuristic fails.
    pub fallback_action: &'static str,
    /// Natural-language phrase of the guaranteed 1-hour fallback.
    pub fallback_phrase: &'static str,
}

impl LanguagePatterns {
    /// Seconds multiplier for a unit token, longest-prefix match.
    pub fn unit_seconds(&self, unit: &str) -> Option<i64> {
        self.time_units
            .iter()
            .filter(|(prefix, _)| unit.starts_with(prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, seconds)| *seconds)
    }

    /// First weekday whose name form occurs in `phrase` (already lowercased).
    pub fn weekday_in(&self, phrase: &str) -> Option<Weekday> {
        self.weekdays.iter().find(|(name, _)| phrase.contains(name)).map(|(_, day)| *day)
    }

    /// Day-part override present in `phrase`, if any.
    pub fn day_part_in(&self, phrase: &str) -> Option<(u32, u32)> {
        self.day_parts.iter().find(|(name, _)| phrase.contains(name)).map(|(_, hm)| *hm)
    }

    /// Month number for a month name occurring in `phrase`.
    pub fn month_in(&self, phrase: &str) -> Option<u32> {
        self.months.iter().find(|(name, _)| phrase.contains(name)).map(|(_, m)| *m)
    }
}

fn word_patterns(words: &[&str]) -> Vec<Regex> {
    words
        .iter()
        .map(|word| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word))).unwrap())
        .collect()
}

static RU: Lazy<LanguagePatterns> = Lazy::new(|| LanguagePatterns {
    time_patterns: vec![
        // "послезавтра" first: the bare "завтра" patterns use a word
        // boundary, but ordering keeps the longer phrase authoritative.
        TimePattern {
            regex: regex!(r"послезавтра в \d{1,2}[:.]\d{2}"),
            buckets: BucketMask::DAYWORDISH.union(BucketMask::HAS_DIGITS),
        },
        TimePattern {
            regex: regex!(r"\bзавтра в \d{1,2}[:.]\d{2}"),
            buckets: BucketMask::DAYWORDISH.union(BucketMask::HAS_DIGITS),
        },
        TimePattern {
            regex: regex!(r"\bсегодня в \d{1,2}[:.]\d{2}"),
            buckets: BucketMask::DAYWORDISH.union(BucketMask::HAS_DIGITS),
        },
        TimePattern { regex: regex!(r"в \d{1,2}[:.]\d{2}"), buckets: BucketMask::HAS_DIGITS },
        TimePattern { regex: regex!(r"\bпослезавтра\b"), buckets: BucketMask::DAYWORDISH },
        TimePattern { regex: regex!(r"\bзавтра\b"), buckets: BucketMask::DAYWORDISH },
        TimePattern { regex: regex!(r"\bсегодня\b"), buckets: BucketMask::DAYWORDISH },
        TimePattern {
            regex: regex!(
                r"\d{1,2}\s+(января|февраля|марта|апреля|мая|июня|июля|августа|сентября|октября|ноября|декабря)"
            ),
            buckets: BucketMask::MONTHISH.union(BucketMask::HAS_DIGITS),
        },
        TimePattern {
            regex: regex!(
                r"в\s+(понедельник|вторник|среду|четверг|пятницу|субботу|воскресенье)(?:\s+(утром|днем|днём|вечером|ночью))?"
            ),
            buckets: BucketMask::WEEKDAYISH,
        },
        TimePattern {
            regex: regex!(
                r"\b(понедельник|вторник|среда|четверг|пятница|суббота|воскресенье)\b(?:\s+(утром|днем|днём|вечером|ночью))?"
            ),
            buckets: BucketMask::WEEKDAYISH,
        },
        TimePattern {
            regex: regex!(r"через\s+\d+\s+(минут\w*|час\w*|день|дня|дней|недел\w*|месяц\w*)"),
            buckets: BucketMask::HAS_DIGITS,
        },
    ],
    relative_patterns: vec![
        RelativePattern {
            regex: regex!(r"через\s+(\d+)\s+(минут\w*|час\w*|день|дня|дней|недел\w*|месяц\w*)"),
            amount_group: 1,
            unit_group: 2,
        },
        RelativePattern {
            regex: regex!(r"(\d+)\s+(минут\w*|час\w*|день|дня|дней)\s+(?:спустя|позже)"),
            amount_group: 1,
            unit_group: 2,
        },
        RelativePattern {
            regex: regex!(r"спустя\s+(\d+)\s+(минут\w*|час\w*|день|дня|дней)"),
            amount_group: 1,
            unit_group: 2,
        },
    ],
    command_prefixes: vec![
        regex!(r"(?i)напомни\s+(?:мне\s+)?(?:о\s+)?(?:в\s+)?"),
        regex!(r"(?i)не\s+забудь\s+(?:о\s+)?(?:в\s+)?"),
        regex!(r"(?i)скажи\s+(?:мне\s+)?(?:о\s+)?"),
        regex!(r"(?i)доведи\s+(?:до\s+)?"),
        regex!(r"(?i)посмотри\s+(?:мне\s+)?"),
    ],
    filler_patterns: word_patterns(&[
        "пожалуйста",
        "нужно",
        "надо",
        "чтобы",
        "мне",
        "должен",
        "следовало",
    ]),
    time_units: &[
        ("минут", 60),
        ("час", 3600),
        ("день", 86400),
        ("дня", 86400),
        ("дней", 86400),
        ("недел", 604800),
        ("месяц", 2592000),
    ],
    weekdays: &[
        ("понедельник", Weekday::Mon),
        ("вторник", Weekday::Tue),
        ("среду", Weekday::Wed),
        ("среда", Weekday::Wed),
        ("четверг", Weekday::Thu),
        ("пятницу", Weekday::Fri),
        ("пятница", Weekday::Fri),
        ("субботу", Weekday::Sat),
        ("суббота", Weekday::Sat),
        ("воскресенье", Weekday::Sun),
    ],
    day_parts: &[
        ("утром", (9, 0)),
        ("днем", (14, 0)),
        ("днём", (14, 0)),
        ("вечером", (18, 0)),
        ("ночью", (20, 0)),
    ],
    day_keywords: vec![
        (regex!(r"\bпослезавтра\b"), 2),
        (regex!(r"\bзавтра\b"), 1),
        (regex!(r"\bсегодня\b"), 0),
    ],
    months: &[
        ("января", 1),
        ("февраля", 2),
        ("марта", 3),
        ("апреля", 4),
        ("мая", 5),
        ("июня", 6),
        ("июля", 7),
        ("августа", 8),
        ("сентября", 9),
        ("октября", 10),
        ("ноября", 11),
        ("декабря", 12),
    ],
    command_verbs: &[
        "напомни",
        "напомнить",
        "скажи",
        "посмотри",
        "позвони",
        "сделай",
        "запиши",
        "купи",
        "отправь",
        "проверь",
    ],
    trigger_words: &["напомни", "скажи"],
    bare_action_blacklist: &["напомни"],
    fallback_action: "напоминание",
    fallback_phrase: "через 1 час",
});

static EN: Lazy<LanguagePatterns> = Lazy::new(|| LanguagePatterns {
    time_patterns: vec![
        TimePattern {
            regex: regex!(r"day after tomorrow at \d{1,2}(?:[:.]\d{2})?\s*(?:am|pm)?"),
            buckets: BucketMask::DAYWORDISH.union(BucketMask::HAS_DIGITS),
        },
        TimePattern {
            regex: regex!(r"tomorrow at \d{1,2}(?:[:.]\d{2})?\s*(?:am|pm)?"),
            buckets: BucketMask::DAYWORDISH.union(BucketMask::HAS_DIGITS),
        },
        TimePattern {
            regex: regex!(r"today at \d{1,2}(?:[:.]\d{2})?\s*(?:am|pm)?"),
            buckets: BucketMask::DAYWORDISH.union(BucketMask::HAS_DIGITS),
        },
        TimePattern {
            regex: regex!(r"at \d{1,2}(?:[:.]\d{2})?\s*(?:am|pm)?"),
            buckets: BucketMask::HAS_DIGITS,
        },
        TimePattern { regex: regex!(r"\bday after tomorrow\b"), buckets: BucketMask::DAYWORDISH },
        TimePattern { regex: regex!(r"\btomorrow\b"), buckets: BucketMask::DAYWORDISH },
        TimePattern { regex: regex!(r"\btoday\b"), buckets: BucketMask::DAYWORDISH },
        TimePattern {
            regex: regex!(
                r"\d{1,2}\s+(january|february|march|april|may|june|july|august|september|october|november|december)"
            ),
            buckets: BucketMask::MONTHISH.union(BucketMask::HAS_DIGITS),
        },
        // Slash dates resolve through the general English parser, month-first.
        TimePattern {
            regex: regex!(r"\b\d{1,2}/\d{1,2}(?:/\d{2,4})?\b"),
            buckets: BucketMask::HAS_DIGITS,
        },
        TimePattern {
            regex: regex!(
                r"on\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)(?:\s+(morning|afternoon|evening|night))?"
            ),
            buckets: BucketMask::WEEKDAYISH,
        },
        TimePattern {
            regex: regex!(
                r"\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b(?:\s+(morning|afternoon|evening|night))?"
            ),
            buckets: BucketMask::WEEKDAYISH,
        },
        TimePattern {
            regex: regex!(r"this\s+(morning|afternoon|evening|night)"),
            buckets: BucketMask::empty(),
        },
        TimePattern { regex: regex!(r"\btonight\b"), buckets: BucketMask::empty() },
        TimePattern {
            regex: regex!(r"in\s+\d+\s+(minutes?|hours?|days?|weeks?|months?)"),
            buckets: BucketMask::HAS_DIGITS,
        },
        TimePattern {
            regex: regex!(r"next\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)"),
            buckets: BucketMask::WEEKDAYISH,
        },
    ],
    relative_patterns: vec![
        RelativePattern {
            regex: regex!(r"in\s+(\d+)\s+(minutes?|hours?|days?|weeks?|months?)"),
            amount_group: 1,
            unit_group: 2,
        },
        RelativePattern {
            regex: regex!(r"(\d+)\s+(minutes?|hours?|days?|weeks?)\s+(?:from now|later)"),
            amount_group: 1,
            unit_group: 2,
        },
        RelativePattern {
            regex: regex!(r"after\s+(\d+)\s+(minutes?|hours?|days?)"),
            amount_group: 1,
            unit_group: 2,
        },
    ],
    command_prefixes: vec![
        regex!(r"(?i)remind\s+(?:me\s+)?(?:to\s+)?(?:about\s+)?"),
        regex!(r"(?i)don'?t\s+forget\s+(?:to\s+)?(?:about\s+)?"),
        regex!(r"(?i)tell\s+(?:me\s+)?(?:to\s+)?"),
        regex!(r"(?i)notify\s+(?:me\s+)?"),
        regex!(r"(?i)alert\s+(?:me\s+)?"),
    ],
    filler_patterns: word_patterns(&["please", "need", "to", "that", "me", "should", "would"]),
    time_units: &[
        ("minute", 60),
        ("hour", 3600),
        ("day", 86400),
        ("week", 604800),
        ("month", 2592000),
    ],
    weekdays: &[
        ("monday", Weekday::Mon),
        ("tuesday", Weekday::Tue),
        ("wednesday", Weekday::Wed),
        ("thursday", Weekday::Thu),
        ("friday", Weekday::Fri),
        ("saturday", Weekday::Sat),
        ("sunday", Weekday::Sun),
    ],
    day_parts: &[("morning", (9, 0)), ("afternoon", (14, 0)), ("evening", (18, 0)), ("night", (20, 0))],
    day_keywords: vec![
        (regex!(r"\bday after tomorrow\b"), 2),
        (regex!(r"\btomorrow\b"), 1),
        (regex!(r"\btoday\b"), 0),
    ],
    months: &[
        ("january", 1),
        ("february", 2),
        ("march", 3),
        ("april", 4),
        ("may", 5),
        ("june", 6),
        ("july", 7),
        ("august", 8),
        ("september", 9),
        ("october", 10),
        ("november", 11),
        ("december", 12),
    ],
    command_verbs: &[
        "remind", "tell", "call", "send", "buy", "do", "check", "watch", "meet", "finish",
    ],
    trigger_words: &["remind", "tell"],
    bare_action_blacklist: &["remind"],
    fallback_action: "reminder",
    fallback_phrase: "in 1 hour",
});

pub fn for_lang(lang: Lang) -> &'static LanguagePatterns {
    match lang {
        Lang::Ru => &RU,
        Lang::En => &EN,
    }
}
