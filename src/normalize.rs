//! Token normaliser — rewrites date-shaped tokens into speakable words.
//!
//! Handles `DD/MM/YYYY`, `DD/MM/YY`, and `DD/MM` (separators `/`, `.`, `-`):
//! the day becomes an ordinal, the month its name, and a four-digit year is
//! read as two two-digit groups (`1914` → "Nineteen Fourteen", `2023` →
//! "Twenty Twenty Three").  Non-matching tokens pass through unchanged.
//!
//! Other numeric shapes (money, times, percentages, bare integers) are not
//! normalised; they fall through to the dictionary lookup and fail there.

use once_cell::sync::Lazy;
use regex::Regex;

// ─────────────────────────────────────────────────────────────────────────────
// Date patterns
// ─────────────────────────────────────────────────────────────────────────────

/// `DD sep MM sep YY|YYYY` — day 1–31 (optional leading zero), month 1–12.
static RE_DMY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<day>0?[1-9]|[12][0-9]|3[01])[/.\-](?P<month>[1-9]|1[012])[/.\-](?P<year>\d{4}|\d{2})$")
        .unwrap()
});

/// `DD sep MM` — same day/month ranges, no year.
static RE_DM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<day>0?[1-9]|[12][0-9]|3[01])[/.\-](?P<month>[1-9]|1[012])$").unwrap()
});

// ─────────────────────────────────────────────────────────────────────────────
// Word tables
// ─────────────────────────────────────────────────────────────────────────────

/// Ordinal names indexed by day; valid for 1–19 directly.  Days 21–29 are
/// composed as "Twenty" plus the ordinal of the unit digit.
const DAY_ORDINALS: &[&str] = &[
    "Zeroth", "First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh", "Eighth",
    "Ninth", "Tenth", "Eleventh", "Twelfth", "Thirteenth", "Fourteenth", "Fifteenth",
    "Sixteenth", "Seventeenth", "Eighteenth", "Nineteenth",
];

const MONTH_NAMES: &[&str] = &[
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Number names 0–19 as used when reading year groups; index 0 is the filler
/// "Oh" ("2005" → "Twenty Oh Five").
const UNDER_TWENTY: &[&str] = &[
    "Oh", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
    "Nineteen",
];

/// Decade names indexed by `tens_digit - 2`.
const TENS: &[&str] = &["Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety"];

// ─────────────────────────────────────────────────────────────────────────────
// Expansion
// ─────────────────────────────────────────────────────────────────────────────

fn push_day(day: u32, out: &mut Vec<String>) {
    match day {
        1..=19 => out.push(DAY_ORDINALS[day as usize].to_string()),
        20 => out.push("Twentieth".to_string()),
        21..=29 => {
            out.push("Twenty".to_string());
            out.push(DAY_ORDINALS[(day % 10) as usize].to_string());
        }
        30 => out.push("Thirtieth".to_string()),
        _ => {
            // 31 is the only value the pattern still admits here
            out.push("Thirty".to_string());
            out.push("First".to_string());
        }
    }
}

/// Speak a year as two two-digit groups.  Century words exist only for
/// 1000–2099; outside that range the final two digits are still spoken.
fn push_year(year: u32, out: &mut Vec<String>) {
    match year {
        1000..=1999 => out.push(UNDER_TWENTY[(year / 100) as usize].to_string()),
        2000..=2099 => out.push("Twenty".to_string()),
        _ => {}
    }

    let rem = year % 100;
    match rem {
        0 => {}
        1..=9 => {
            out.push("Oh".to_string());
            out.push(UNDER_TWENTY[rem as usize].to_string());
        }
        10..=19 => out.push(UNDER_TWENTY[rem as usize].to_string()),
        _ => {
            out.push(TENS[(rem / 10 - 2) as usize].to_string());
            out.push(UNDER_TWENTY[(rem % 10) as usize].to_string());
        }
    }

    // "Twenty Thirty Oh" → "Twenty Thirty"
    if out.last().map(String::as_str) == Some("Oh") {
        out.pop();
    }
}

/// Expand a single date-shaped token, or `None` if it is not a date.
pub fn expand_date(token: &str) -> Option<Vec<String>> {
    if let Some(caps) = RE_DMY.captures(token) {
        let day: u32 = caps["day"].parse().ok()?;
        let month: usize = caps["month"].parse().ok()?;
        let year: u32 = caps["year"].parse().ok()?;

        let mut words = Vec::new();
        push_day(day, &mut words);
        words.push(MONTH_NAMES[month - 1].to_string());
        words.push(",".to_string());
        push_year(year, &mut words);
        return Some(words);
    }

    if let Some(caps) = RE_DM.captures(token) {
        let day: u32 = caps["day"].parse().ok()?;
        let month: usize = caps["month"].parse().ok()?;

        let mut words = Vec::new();
        push_day(day, &mut words);
        words.push(MONTH_NAMES[month - 1].to_string());
        return Some(words);
    }

    None
}

/// Normalise a token sequence: date tokens are expanded in place, everything
/// else is carried over unchanged.
pub fn normalize(tokens: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        match expand_date(token) {
            Some(words) => out.extend(words),
            None => out.push(token.clone()),
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
