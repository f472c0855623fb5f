//! Coarse input scan used to gate candidate patterns.
//!
//! A single cheap pass over the normalized text computes which "buckets" of
//! vocabulary are present; each candidate pattern declares the buckets it
//! needs and is skipped when the input cannot possibly match. Purely an
//! optimization: skipping never changes results because every bucket scan is
//! a superset of the pattern vocabulary it covers.

use bitflags::bitflags;

use crate::lang::Lang;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BucketMask: u32 {
        const HAS_DIGITS = 1;
        const WEEKDAYISH = 1 << 1;
        const MONTHISH = 1 << 2;
        const DAYWORDISH = 1 << 3;
    }
}

const RU_WEEKDAY_STEMS: &[&str] =
    &["понедельник", "вторник", "сред", "четверг", "пятниц", "суббот", "воскрес"];
const EN_WEEKDAY_STEMS: &[&str] =
    &["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];

const RU_MONTH_STEMS: &[&str] = &[
    "янв", "февр", "март", "апрел", "мая", "июн", "июл", "август", "сентябр", "октябр", "ноябр",
    "декабр",
];
const EN_MONTH_STEMS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

const RU_DAYWORD_STEMS: &[&str] = &["сегодня", "завтра"];
const EN_DAYWORD_STEMS: &[&str] = &["today", "tomorrow"];

#[derive(Debug, Clone, Copy)]
pub struct TriggerInfo {
    pub buckets: BucketMask,
}

impl TriggerInfo {
    /// Scan normalized (lowercased) text.
    pub fn scan(text: &str, lang: Lang) -> TriggerInfo {
        let mut buckets = BucketMask::empty();

        if text.chars().any(|c| c.is_ascii_digit()) {
            buckets |= BucketMask::HAS_DIGITS;
        }

        let (weekdays, months, daywords) = match lang {
            Lang::Ru => (RU_WEEKDAY_STEMS, RU_MONTH_STEMS, RU_DAYWORD_STEMS),
            Lang::En => (EN_WEEKDAY_STEMS, EN_MONTH_STEMS, EN_DAYWORD_STEMS),
        };

        if weekdays.iter().any(|stem| text.contains(stem)) {
            buckets |= BucketMask::WEEKDAYISH;
        }
        if months.iter().any(|stem| text.contains(stem)) {
            buckets |= BucketMask::MONTHISH;
        }
        if daywords.iter().any(|stem| text.contains(stem)) {
            buckets |= BucketMask::DAYWORDISH;
        }

        TriggerInfo { buckets }
    }

    /// True when every bucket `required` names is present in the input.
    pub fn admits(&self, required: BucketMask) -> bool {
        self.buckets.contains(required)
    }
}
