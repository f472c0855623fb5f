//! Stage 1+2: phrase candidate extraction, weekday resolution and locale
//! date/time parsing.

use chrono::{Datelike, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_english::{Dialect, parse_date_string};
use log::debug;

use crate::lang::Lang;
use crate::patterns::{self, LanguagePatterns};
use crate::resolver::{ResolveStage, ResolverInput};
use crate::time_expr::TimeExpression;

pub(crate) struct CandidateDates;

impl ResolveStage for CandidateDates {
    fn name(&self) -> &'static str {
        "candidate dates"
    }

    fn resolve(&self, input: &ResolverInput<'_>) -> Option<TimeExpression> {
        let table = patterns::for_lang(input.lang);

        for phrase in extract_candidates(input, table) {
            debug!("time candidate: {phrase:?}");

            // Weekday phrases resolve by rollover, never through the
            // date parser: "monday" on a Monday means next week.
            if table.weekday_in(&phrase).is_some() {
                if let Some(dt) = resolve_weekday(&phrase, table, input.reference) {
                    return Some(TimeExpression::absolute(dt, phrase, 0.7));
                }
            }

            match parse_locale_datetime(&phrase, input.lang, input.reference) {
                Some(dt) if dt > input.reference => {
                    return Some(TimeExpression::absolute(dt, phrase, 0.8));
                }
                Some(past) => {
                    debug!("candidate {phrase:?} resolved into the past: {past}");
                    if let Some(dt) = resolve_weekday(&phrase, table, input.reference) {
                        return Some(TimeExpression::absolute(dt, phrase, 0.7));
                    }
                }
                None => {}
            }
        }

        None
    }
}

/// All candidate phrases, in pattern-list order, then occurrence order.
fn extract_candidates(input: &ResolverInput<'_>, table: &LanguagePatterns) -> Vec<String> {
    let mut phrases = Vec::new();
    for pattern in &table.time_patterns {
        if !input.trigger.admits(pattern.buckets) {
            continue;
        }
        for m in pattern.regex.find_iter(input.text) {
            phrases.push(m.as_str().to_string());
        }
    }
    phrases
}

/// Next occurrence of the weekday named in `phrase`, strictly after the
/// reference date. Defaults to 09:00; a day-part keyword in the phrase
/// overrides the time of day.
fn resolve_weekday(
    phrase: &str,
    table: &LanguagePatterns,
    reference: NaiveDateTime,
) -> Option<NaiveDateTime> {
    let weekday = table.weekday_in(phrase)?;

    let mut days_ahead = weekday.num_days_from_monday() as i64
        - reference.weekday().num_days_from_monday() as i64;
    if days_ahead <= 0 {
        days_ahead += 7;
    }

    let (hour, minute) = table.day_part_in(phrase).unwrap_or((9, 0));
    (reference.date() + Duration::days(days_ahead)).and_hms_opt(hour, minute, 0)
}

/// Full date/time parse of one candidate phrase under locale rules, biased
/// towards the future for time-of-day-only phrases. Relative-duration
/// phrases are declined here; the relative stage owns them.
fn parse_locale_datetime(phrase: &str, lang: Lang, reference: NaiveDateTime) -> Option<NaiveDateTime> {
    if regex!(r"^(?:через|in|after)\s+\d").is_match(phrase) {
        return None;
    }

    match lang {
        Lang::Ru => parse_ru(phrase, reference),
        Lang::En => parse_en(phrase, reference),
    }
}

fn parse_ru(phrase: &str, reference: NaiveDateTime) -> Option<NaiveDateTime> {
    // "завтра в 15:00"
    if let Some(c) = regex!(r"^(сегодня|завтра|послезавтра)\s+в\s+(\d{1,2})[:.](\d{2})$").captures(phrase)
    {
        let days = ru_day_offset(c.get(1)?.as_str());
        let hour: u32 = c.get(2)?.as_str().parse().ok()?;
        let minute: u32 = c.get(3)?.as_str().parse().ok()?;
        return (reference.date() + Duration::days(days)).and_hms_opt(hour, minute, 0);
    }

    // "в 15:00" — today, rolled to tomorrow when already past.
    if let Some(c) = regex!(r"^в\s+(\d{1,2})[:.](\d{2})$").captures(phrase) {
        let hour: u32 = c.get(1)?.as_str().parse().ok()?;
        let minute: u32 = c.get(2)?.as_str().parse().ok()?;
        let today = reference.date().and_hms_opt(hour, minute, 0)?;
        return Some(if today > reference { today } else { today + Duration::days(1) });
    }

    // "15 марта" — next occurrence at 09:00 (day-month order).
    if let Some(c) = regex!(r"^(\d{1,2})\s+([а-яё]+)$").captures(phrase) {
        let day: u32 = c.get(1)?.as_str().parse().ok()?;
        let month = patterns::for_lang(Lang::Ru).month_in(c.get(2)?.as_str())?;
        return next_month_day(reference, month, day);
    }

    // Bare day keyword: the reference instant shifted by whole days, the way
    // a relative-base date parser reads it. "сегодня" lands exactly on the
    // reference and is rejected upstream as not strictly future.
    if let Some(c) = regex!(r"^(сегодня|завтра|послезавтра)$").captures(phrase) {
        return Some(reference + Duration::days(ru_day_offset(c.get(1)?.as_str())));
    }

    None
}

fn ru_day_offset(keyword: &str) -> i64 {
    match keyword {
        "послезавтра" => 2,
        "завтра" => 1,
        _ => 0,
    }
}

fn parse_en(phrase: &str, reference: NaiveDateTime) -> Option<NaiveDateTime> {
    // "tomorrow at 3 pm", "day after tomorrow at 9:30"
    if let Some(c) = regex!(
        r"^(today|tomorrow|day after tomorrow)\s+at\s+(\d{1,2})(?:[:.](\d{2}))?\s*(am|pm)?$"
    )
    .captures(phrase)
    {
        let days = en_day_offset(c.get(1)?.as_str());
        let hour = meridiem_hour(c.get(2)?.as_str().parse().ok()?, c.get(4).map(|m| m.as_str()))?;
        let minute: u32 = c.get(3).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
        return (reference.date() + Duration::days(days)).and_hms_opt(hour, minute, 0);
    }

    // "at 3 pm" — today, rolled to tomorrow when already past.
    if let Some(c) = regex!(r"^at\s+(\d{1,2})(?:[:.](\d{2}))?\s*(am|pm)?$").captures(phrase) {
        let hour = meridiem_hour(c.get(1)?.as_str().parse().ok()?, c.get(3).map(|m| m.as_str()))?;
        let minute: u32 = c.get(2).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
        let today = reference.date().and_hms_opt(hour, minute, 0)?;
        return Some(if today > reference { today } else { today + Duration::days(1) });
    }

    // "15 january" — next occurrence at 09:00 (month names disambiguate the
    // order, so MDY vs DMY does not arise here).
    if let Some(c) = regex!(r"^(\d{1,2})\s+([a-z]+)$").captures(phrase) {
        let day: u32 = c.get(1)?.as_str().parse().ok()?;
        let month = patterns::for_lang(Lang::En).month_in(c.get(2)?.as_str())?;
        return next_month_day(reference, month, day);
    }

    // "this evening", "tonight" — today at the day part's hour.
    if let Some(c) = regex!(r"^this\s+(morning|afternoon|evening|night)$").captures(phrase) {
        let (hour, minute) = patterns::for_lang(Lang::En).day_part_in(c.get(1)?.as_str())?;
        return reference.date().and_hms_opt(hour, minute, 0);
    }
    if phrase == "tonight" {
        return reference.date().and_hms_opt(20, 0, 0);
    }

    // Bare day keyword, relative-base semantics (see parse_ru).
    if let Some(c) = regex!(r"^(today|tomorrow|day after tomorrow)$").captures(phrase) {
        return Some(reference + Duration::days(en_day_offset(c.get(1)?.as_str())));
    }

    // Everything else goes to the general English date parser (month-day-year
    // order), anchored at the reference time.
    parse_date_string(phrase, Utc.from_utc_datetime(&reference), Dialect::Us)
        .ok()
        .map(|dt| dt.naive_utc())
}

fn en_day_offset(keyword: &str) -> i64 {
    match keyword {
        "day after tomorrow" => 2,
        "tomorrow" => 1,
        _ => 0,
    }
}

/// 12-hour clock to 24-hour. Hours without a meridiem pass through.
fn meridiem_hour(hour: u32, meridiem: Option<&str>) -> Option<u32> {
    let hour = match meridiem {
        Some("pm") if hour < 12 => hour + 12,
        Some("am") if hour == 12 => 0,
        _ => hour,
    };
    (hour <= 23).then_some(hour)
}

/// Next calendar occurrence of `month`/`day` at 09:00: this year if still
/// ahead, otherwise next year.
fn next_month_day(reference: NaiveDateTime, month: u32, day: u32) -> Option<NaiveDateTime> {
    let this_year = chrono::NaiveDate::from_ymd_opt(reference.year(), month, day)?.and_hms_opt(9, 0, 0)?;
    if this_year > reference {
        return Some(this_year);
    }
    chrono::NaiveDate::from_ymd_opt(reference.year() + 1, month, day)?.and_hms_opt(9, 0, 0)
}
