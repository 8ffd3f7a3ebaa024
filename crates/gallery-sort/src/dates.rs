//! Date extraction from a card's `sub` line.
//!
//! The sub lines are free-form ("Shot on 2024-08-02", "September 3, 2023",
//! "3/7/2024"...), so this scans for the first recognizable date rather than
//! parsing the whole string.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2})").unwrap());
static MONTH_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z]{3,9}\s+\d{1,2},\s*\d{4})").unwrap());
static DAY_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4})").unwrap());
static SLASH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2}/\d{1,2}/\d{4})").unwrap());

/// Find a date in free-form text. Tries ISO, "Month D, YYYY", "D Month YYYY"
/// and "M/D/YYYY" in that order; returns `None` when nothing parses.
pub fn parse_card_date(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    // Typography sneaks non-ASCII hyphens into hand-edited dates.
    let norm: String = text
        .chars()
        .map(|c| match c {
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' => '-',
            other => other,
        })
        .collect();

    if let Some(caps) = ISO_RE.captures(&norm) {
        if let Ok(date) = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d") {
            return Some(date);
        }
    }
    // chrono's %B accepts abbreviated month names as well as full ones.
    if let Some(caps) = MONTH_DAY_RE.captures(&norm) {
        if let Ok(date) = NaiveDate::parse_from_str(&caps[1], "%B %d, %Y") {
            return Some(date);
        }
    }
    if let Some(caps) = DAY_MONTH_RE.captures(&norm) {
        if let Ok(date) = NaiveDate::parse_from_str(&caps[1], "%d %B %Y") {
            return Some(date);
        }
    }
    if let Some(caps) = SLASH_RE.captures(&norm) {
        if let Ok(date) = NaiveDate::parse_from_str(&caps[1], "%m/%d/%Y") {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_iso() {
        assert_eq!(parse_card_date("Shot on 2024-08-02"), Some(d(2024, 8, 2)));
    }

    #[test]
    fn test_iso_with_typographic_hyphens() {
        assert_eq!(parse_card_date("2024\u{2013}08\u{2013}02"), Some(d(2024, 8, 2)));
    }

    #[test]
    fn test_month_name_formats() {
        assert_eq!(parse_card_date("September 3, 2023"), Some(d(2023, 9, 3)));
        assert_eq!(parse_card_date("Sep 3, 2023"), Some(d(2023, 9, 3)));
        assert_eq!(parse_card_date("3 September 2023"), Some(d(2023, 9, 3)));
        assert_eq!(parse_card_date("3 Sep 2023"), Some(d(2023, 9, 3)));
    }

    #[test]
    fn test_slash_format() {
        assert_eq!(parse_card_date("3/7/2024"), Some(d(2024, 3, 7)));
    }

    #[test]
    fn test_no_date() {
        assert_eq!(parse_card_date(""), None);
        assert_eq!(parse_card_date("No date here"), None);
        assert_eq!(parse_card_date("exposure 120x30s"), None);
    }
}
