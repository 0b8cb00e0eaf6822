use flex_platform::TextDirection;
use flex_theme::Theme;

pub const DEFAULT_LOCALE: &str = "en-US";

/// Locales with built-in messages and formatting rules
pub const SUPPORTED_LOCALES: [&str; 6] = ["en-US", "es-ES", "fr-FR", "de-DE", "ja-JP", "ar-SA"];

/// Per-locale presentation rules
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocaleConfig {
    pub text_direction: TextDirection,
    /// Pattern using `YYYY`, `MM`, `DD`
    pub date_format: &'static str,
    /// Pattern using `HH`, `h`, `mm`, `A`
    pub time_format: &'static str,
    /// Theme preferred for this locale, if any
    pub default_theme: Option<Theme>,
}

/// Rules for a supported locale
pub fn locale_config(locale: &str) -> Option<LocaleConfig> {
    let ltr = |date_format, time_format| LocaleConfig {
        text_direction: TextDirection::Ltr,
        date_format,
        time_format,
        default_theme: None,
    };

    let config = match locale {
        "en-US" => ltr("MM/DD/YYYY", "h:mm A"),
        "es-ES" | "fr-FR" => ltr("DD/MM/YYYY", "HH:mm"),
        "de-DE" => ltr("DD.MM.YYYY", "HH:mm"),
        "ja-JP" => ltr("YYYY/MM/DD", "HH:mm"),
        "ar-SA" => LocaleConfig {
            text_direction: TextDirection::Rtl,
            date_format: "DD/MM/YYYY",
            time_format: "h:mm A",
            default_theme: Some(Theme::Light),
        },
        _ => return None,
    };
    Some(config)
}

pub fn is_supported(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// Normalize locale identifiers for lookup.
///
/// - Converts `_` to `-` (`en_US` from POSIX environments).
/// - Trims whitespace and drops `.UTF-8`-style encoding suffixes.
pub fn normalize_locale(s: &str) -> String {
    let s = s.trim();
    let s = s.split('.').next().unwrap_or(s);
    s.replace('_', "-")
}

/// Best supported locale for a requested one: exact match, then the first
/// supported locale with the same language.
pub fn match_supported_locale(requested: &str) -> Option<&'static str> {
    let requested = normalize_locale(requested);
    if let Some(exact) = SUPPORTED_LOCALES.iter().find(|l| **l == requested) {
        return Some(exact);
    }
    let language = requested.split('-').next().filter(|l| !l.is_empty())?;
    SUPPORTED_LOCALES
        .iter()
        .find(|l| l.strip_prefix(language).is_some_and(|rest| rest.starts_with('-')))
        .copied()
}

/// Lookup order for a locale.
///
/// Example:
/// - `es-MX` -> `["es-MX", "es-ES", "en-US"]`
/// - `en-US` -> `["en-US"]`
pub fn locale_fallback_chain(locale: &str) -> Vec<String> {
    let l = normalize_locale(locale);
    let mut chain = Vec::new();

    if !l.is_empty() {
        chain.push(l.clone());
        if let Some(matched) = match_supported_locale(&l) {
            chain.push(matched.to_string());
        }
    }
    chain.push(DEFAULT_LOCALE.to_string());

    // Dedup, preserve order.
    let mut out: Vec<String> = Vec::with_capacity(chain.len());
    for x in chain {
        if !out.contains(&x) {
            out.push(x);
        }
    }
    out
}
