//! Locale-aware date and time formatting
//!
//! Locale tables keep their display patterns (`MM/DD/YYYY`, `h:mm A`);
//! they are translated to `chrono` format strings on use.

use chrono::NaiveDateTime;

use crate::locale::{locale_config, DEFAULT_LOCALE};

/// Translate a `YYYY MM DD HH h mm A` pattern into a `chrono` format string.
/// Other characters are kept literally.
pub fn to_chrono_format(pattern: &str) -> String {
    const TOKENS: [(&str, &str); 7] = [
        ("YYYY", "%Y"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("h", "%-I"),
        ("A", "%p"),
    ];

    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;
    while let Some(ch) = rest.chars().next() {
        match TOKENS.iter().find(|(token, _)| rest.starts_with(token)) {
            Some((token, spec)) => {
                out.push_str(spec);
                rest = &rest[token.len()..];
            }
            None => {
                if ch == '%' {
                    out.push('%');
                }
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }
    out
}

/// Render `value` with a display pattern such as `DD.MM.YYYY`
pub fn format_pattern(pattern: &str, value: &NaiveDateTime) -> String {
    value.format(&to_chrono_format(pattern)).to_string()
}

fn patterns(locale: &str) -> (&'static str, &'static str) {
    locale_config(locale)
        .or_else(|| locale_config(DEFAULT_LOCALE))
        .map(|c| (c.date_format, c.time_format))
        .unwrap_or(("MM/DD/YYYY", "h:mm A"))
}

/// Date in the locale's pattern; unsupported locales use `en-US`
pub fn format_date(value: &NaiveDateTime, locale: &str) -> String {
    format_pattern(patterns(locale).0, value)
}

/// Time in the locale's pattern; unsupported locales use `en-US`
pub fn format_time(value: &NaiveDateTime, locale: &str) -> String {
    format_pattern(patterns(locale).1, value)
}
