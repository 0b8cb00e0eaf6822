use flex_i18n::{get_message, SUPPORTED_LOCALES};
use pretty_assertions::assert_eq;

#[test]
fn english_lookups() {
    assert_eq!(get_message("en-US", "themes.light", &[]), "Light");
    assert_eq!(get_message("en-US", "actions.toggleTheme", &[]), "Toggle theme");
}

#[test]
fn translated_lookups() {
    assert_eq!(get_message("es-ES", "themes.light", &[]), "Claro");
    assert_eq!(get_message("de-DE", "themes.dark", &[]), "Dunkel");
}

#[test]
fn missing_paths_return_the_path() {
    assert_eq!(get_message("en-US", "no.such.path", &[]), "no.such.path");
    assert_eq!(get_message("en-US", "themes", &[]), "themes");
    assert_eq!(get_message("en-US", "themes.light.deeper", &[]), "themes.light.deeper");
}

#[test]
fn unsupported_locale_uses_english() {
    assert_eq!(get_message("ko-KR", "themes.dark", &[]), "Dark");
}

#[test]
fn switch_to_substitutes_the_theme() {
    assert_eq!(
        get_message("en-US", "actions.switchTo", &[("theme", "dark")]),
        "Switch to dark theme"
    );
    assert_eq!(
        get_message("en-US", "actions.switchTo", &[]),
        "Switch to {theme} theme"
    );
}

#[test]
fn every_locale_translates_switch_to() {
    for locale in SUPPORTED_LOCALES {
        let message = get_message(locale, "actions.switchTo", &[("theme", "X")]);
        assert!(message.contains('X'), "{locale}: {message}");
        assert!(!message.contains("{theme}"), "{locale}: {message}");
    }
}
