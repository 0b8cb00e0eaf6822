mod common;

use common::{new_log, take, Recorder};
use flex_app::{PluginConfig, PluginError, PluginManager};
use flex_platform::{ColorScheme, MemoryHost};
use flex_theme::Theme;
use pretty_assertions::assert_eq;

fn manager(host: &MemoryHost) -> PluginManager {
    PluginManager::with_defaults(host.shared())
}

#[test]
fn registration_is_validated() {
    let host = MemoryHost::new();
    let plugins = manager(&host);
    let log = new_log();

    assert_eq!(plugins.register(Recorder::new("", &log)), Err(PluginError::Invalid));
    plugins.register(Recorder::new("a", &log)).unwrap();
    assert_eq!(
        plugins.register(Recorder::new("a", &log)),
        Err(PluginError::AlreadyRegistered("a".into()))
    );
    assert_eq!(
        plugins.register(Recorder::new("b", &log).depends_on(&["missing"])),
        Err(PluginError::MissingDependency {
            plugin: "b".into(),
            dependency: "missing".into()
        })
    );
    assert_eq!(plugins.plugins().len(), 1);
}

#[test]
fn enable_initializes_and_persists() {
    let host = MemoryHost::new();
    let plugins = manager(&host);
    let log = new_log();
    plugins.register(Recorder::new("a", &log)).unwrap();
    assert!(!plugins.is_initialized("a"));

    plugins.enable("a").unwrap();

    assert!(plugins.is_enabled("a"));
    assert!(plugins.is_initialized("a"));
    assert_eq!(take(&log), vec!["init:a"]);
    assert_eq!(host.stored("flex-theme-plugins").as_deref(), Some(r#"["a"]"#));

    // Enabling twice is harmless
    plugins.enable("a").unwrap();
    assert_eq!(take(&log), Vec::<String>::new());
}

#[test]
fn dependencies_initialize_first() {
    let host = MemoryHost::new();
    let plugins = manager(&host);
    let log = new_log();
    plugins.register(Recorder::new("a", &log)).unwrap();
    plugins.register(Recorder::new("b", &log).depends_on(&["a"])).unwrap();

    plugins.enable("b").unwrap();

    assert_eq!(take(&log), vec!["init:a", "init:b"]);
    assert!(plugins.is_initialized("a"));
    assert!(plugins.is_enabled("a"));
    assert_eq!(host.stored("flex-theme-plugins").as_deref(), Some(r#"["a","b"]"#));
}

#[test]
fn dependencies_pulled_in_by_enable_are_notified() {
    let host = MemoryHost::new();
    let plugins = manager(&host);
    let log = new_log();
    plugins.register(Recorder::new("a", &log)).unwrap();
    plugins.register(Recorder::new("b", &log).depends_on(&["a"])).unwrap();
    plugins.enable("b").unwrap();
    take(&log);

    plugins.notify_theme_change(Theme::Light, ColorScheme::Light);

    assert_eq!(take(&log), vec!["theme:a:light/light", "theme:b:light/light"]);
}

#[test]
fn restored_dependents_enable_their_dependencies() {
    let host = MemoryHost::new();
    host.simulate_external_write("flex-theme-plugins", Some(r#"["b"]"#));
    let plugins = manager(&host);
    let log = new_log();
    plugins.register(Recorder::new("a", &log)).unwrap();
    plugins.register(Recorder::new("b", &log).depends_on(&["a"])).unwrap();
    plugins.initialize();
    take(&log);

    assert!(plugins.is_enabled("a"));
    plugins.notify_locale_change("ja-JP");
    assert_eq!(take(&log), vec!["locale:b:ja-JP", "locale:a:ja-JP"]);
}

#[test]
fn dependents_block_unregister_and_disable() {
    let host = MemoryHost::new();
    let plugins = manager(&host);
    let log = new_log();
    plugins.register(Recorder::new("a", &log)).unwrap();
    plugins.register(Recorder::new("b", &log).depends_on(&["a"])).unwrap();
    plugins.enable("a").unwrap();
    plugins.enable("b").unwrap();
    take(&log);

    let required = PluginError::RequiredBy {
        plugin: "a".into(),
        dependent: "b".into(),
    };
    assert_eq!(plugins.unregister("a"), Err(required.clone()));
    assert_eq!(plugins.disable("a"), Err(required));

    plugins.disable("b").unwrap();
    plugins.disable("a").unwrap();
    assert_eq!(take(&log), vec!["disable:b", "disable:a"]);
    assert_eq!(host.stored("flex-theme-plugins").as_deref(), Some("[]"));

    // Still registered, so unregistering `a` stays refused
    assert!(plugins.unregister("a").is_err());
    plugins.unregister("b").unwrap();
    plugins.unregister("a").unwrap();
    assert_eq!(
        plugins.unregister("a"),
        Err(PluginError::NotRegistered("a".into()))
    );
}

#[test]
fn only_enabled_plugins_are_notified() {
    let host = MemoryHost::new();
    let plugins = manager(&host);
    let log = new_log();
    plugins.register(Recorder::new("a", &log)).unwrap();
    plugins.register(Recorder::new("b", &log)).unwrap();
    plugins.enable("a").unwrap();
    take(&log);

    plugins.notify_theme_change(Theme::Auto, ColorScheme::Dark);
    plugins.notify_locale_change("de-DE");

    assert_eq!(take(&log), vec!["theme:a:auto/dark", "locale:a:de-DE"]);
}

#[test]
fn late_plugins_receive_the_current_state() {
    let host = MemoryHost::new();
    let plugins = manager(&host);
    let log = new_log();
    plugins.notify_theme_change(Theme::Dark, ColorScheme::Dark);
    plugins.notify_locale_change("fr-FR");

    plugins.register(Recorder::new("a", &log)).unwrap();
    plugins.enable("a").unwrap();

    assert_eq!(
        take(&log),
        vec!["init:a", "theme:a:dark/dark", "locale:a:fr-FR"]
    );
}

#[test]
fn failing_init_is_contained() {
    let host = MemoryHost::new();
    let plugins = manager(&host);
    let log = new_log();
    plugins.register(Recorder::new("bad", &log).failing_init()).unwrap();
    plugins.register(Recorder::new("good", &log)).unwrap();

    assert_eq!(plugins.enable("bad"), Ok(()));
    plugins.enable("good").unwrap();
    assert!(!plugins.is_initialized("bad"));
    assert!(plugins.is_initialized("good"));

    plugins.notify_locale_change("es-ES");
    assert_eq!(take(&log), vec!["init:good", "locale:good:es-ES"]);
}

#[test]
fn enabled_ids_survive_a_restart() {
    let host = MemoryHost::new();
    let log = new_log();
    {
        let plugins = manager(&host);
        plugins.register(Recorder::new("a", &log)).unwrap();
        plugins.enable("a").unwrap();
    }
    take(&log);

    let plugins = manager(&host);
    assert!(plugins.is_enabled("a"));
    plugins.register(Recorder::new("a", &log)).unwrap();
    assert!(plugins.is_initialized("a"));
    assert_eq!(take(&log), vec!["init:a"]);
}

#[test]
fn malformed_enabled_list_is_ignored() {
    let host = MemoryHost::new();
    host.simulate_external_write("flex-theme-plugins", Some("{not json"));
    let plugins = manager(&host);
    assert_eq!(plugins.enabled_ids(), Vec::<String>::new());
}

#[test]
fn disabled_plugin_system_refuses_enable() {
    let host = MemoryHost::new();
    let plugins = PluginManager::new(
        host.shared(),
        PluginConfig {
            enable_plugins: false,
            ..PluginConfig::default()
        },
    );
    let log = new_log();
    plugins.register(Recorder::new("a", &log)).unwrap();
    assert_eq!(plugins.enable("a"), Err(PluginError::Disabled));
}

#[test]
fn plugin_config_requires_registration() {
    let host = MemoryHost::new();
    let plugins = manager(&host);
    let log = new_log();
    let settings = serde_json::json!({ "lightStart": 6, "darkStart": 18 });

    assert_eq!(
        plugins.set_config("a", settings.clone()),
        Err(PluginError::NotRegistered("a".into()))
    );
    plugins.register(Recorder::new("a", &log)).unwrap();
    plugins.set_config("a", settings.clone()).unwrap();
    assert_eq!(plugins.plugin_config("a"), Some(settings));
}
