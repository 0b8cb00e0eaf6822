mod common;

use common::{new_log, take, Recorder};
use flex_app::{AnalyticsEvent, AnalyticsPlugin, FlexConfig, FlexTheme, SystemThemePlugin};
use flex_platform::{ColorScheme, MemoryHost, NoopHost, TextDirection};
use flex_theme::Theme;
use pretty_assertions::assert_eq;
use std::rc::Rc;

#[test]
fn initialize_applies_everything() {
    let host = MemoryHost::with_system_scheme(ColorScheme::Dark);
    let flex = FlexTheme::with_defaults(host.shared());
    flex.initialize();

    assert_eq!(host.attribute("data-theme").as_deref(), Some("dark"));
    assert!(host.style_sheet(flex_theme::css::VARIABLES_STYLE_ID).is_some());
    assert!(host.style_sheet(flex_animation::KEYFRAMES_STYLE_ID).is_some());
    assert!(host.has_class("device-desktop"));
    assert_eq!(host.language(), Some(("en-US".to_string(), TextDirection::Ltr)));
    // No preset chosen yet, so its attribute is left alone
    assert_eq!(host.attribute("data-theme-preset"), None);
}

#[test]
fn mobile_optimizations_can_be_turned_off() {
    let host = MemoryHost::new();
    let config = FlexConfig {
        enable_mobile_optimizations: false,
        ..FlexConfig::default()
    };
    let flex = FlexTheme::new(host.shared(), config);
    flex.initialize();
    assert!(!host.has_class("device-desktop"));
}

#[test]
fn analytics_sees_theme_changes() {
    let host = MemoryHost::new();
    let flex = FlexTheme::with_defaults(host.shared());
    flex.initialize();

    let analytics = AnalyticsPlugin::new();
    flex.plugins().register(analytics.clone()).unwrap();
    flex.plugins().enable("analytics").unwrap();
    flex.set_theme(Theme::Dark);

    assert_eq!(
        analytics.events(),
        vec![
            AnalyticsEvent {
                event: "theme_change",
                theme: Theme::Auto,
                resolved: ColorScheme::Light,
            },
            AnalyticsEvent {
                event: "theme_change",
                theme: Theme::Dark,
                resolved: ColorScheme::Dark,
            },
        ]
    );
}

#[test]
fn system_theme_plugin_switches_to_auto() {
    let host = MemoryHost::with_system_scheme(ColorScheme::Dark);
    host.simulate_external_write("flex-theme", Some("light"));
    let flex = FlexTheme::with_defaults(host.shared());
    flex.initialize();
    assert_eq!(flex.get_theme(), Theme::Light);

    flex.plugins()
        .register(SystemThemePlugin::new(flex.store().clone()))
        .unwrap();
    flex.plugins().enable("system-theme").unwrap();

    assert_eq!(flex.get_theme(), Theme::Auto);
    assert_eq!(host.attribute("data-theme").as_deref(), Some("dark"));
}

#[test]
fn arabic_users_get_rtl_and_light() {
    let host = MemoryHost::with_system_scheme(ColorScheme::Dark);
    host.set_preferred_languages(["ar-SA"]);
    let flex = FlexTheme::with_defaults(host.shared());
    flex.initialize();

    assert_eq!(flex.locale(), "ar-SA");
    assert_eq!(flex.get_theme(), Theme::Light);
    assert_eq!(host.language(), Some(("ar-SA".to_string(), TextDirection::Rtl)));
    assert_eq!(flex.message("themes.light", &[]), "فاتح");
}

#[test]
fn persisted_theme_beats_the_locale_default() {
    let host = MemoryHost::new();
    host.set_preferred_languages(["ar-SA"]);
    host.simulate_external_write("flex-theme", Some("dark"));
    let flex = FlexTheme::with_defaults(host.shared());
    flex.initialize();

    assert_eq!(flex.get_theme(), Theme::Dark);
}

#[test]
fn events_are_forwarded_to_plugins() {
    let host = MemoryHost::new();
    let flex = FlexTheme::with_defaults(host.shared());
    let log = new_log();
    flex.plugins().register(Recorder::new("rec", &log)).unwrap();
    flex.plugins().enable("rec").unwrap();
    flex.initialize();
    take(&log);

    flex.set_locale("ja-JP").unwrap();
    flex.presets().set_active("sepia").unwrap();
    flex.toggle_theme();

    assert_eq!(
        take(&log),
        vec!["locale:rec:ja-JP", "preset:rec:sepia", "theme:rec:dark/dark"]
    );
}

#[test]
fn configure_reapplies_and_notifies() {
    let host = MemoryHost::new();
    let flex = FlexTheme::with_defaults(host.shared());
    let log = new_log();
    flex.plugins().register(Recorder::new("rec", &log)).unwrap();
    flex.plugins().enable("rec").unwrap();
    flex.initialize();
    flex.set_theme(Theme::Dark);
    take(&log);

    flex.configure(FlexConfig {
        attribute: "data-mode".to_string(),
        ..FlexConfig::default()
    });

    assert_eq!(host.attribute("data-mode").as_deref(), Some("dark"));
    assert!(take(&log).contains(&"config:rec:data-mode".to_string()));

    // Forwarding is still wired after re-initialization
    flex.set_theme(Theme::Light);
    assert_eq!(take(&log), vec!["theme:rec:light/light"]);
}

#[test]
fn unsupported_locale_is_an_error() {
    let host = MemoryHost::new();
    let flex = FlexTheme::with_defaults(host.shared());
    assert!(flex.set_locale("xx-XX").is_err());
    assert_eq!(flex.locale(), "en-US");
}

#[test]
fn works_without_an_environment() {
    let flex = FlexTheme::with_defaults(Rc::new(NoopHost));
    flex.initialize();
    assert_eq!(flex.get_theme(), Theme::Auto);
    assert_eq!(flex.get_resolved_theme(), ColorScheme::Light);
    flex.set_theme(Theme::Dark);
    assert_eq!(flex.get_resolved_theme(), ColorScheme::Dark);
    assert_eq!(flex.toggle_theme(), Theme::Light);
}
