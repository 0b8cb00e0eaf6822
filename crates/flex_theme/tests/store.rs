use std::cell::RefCell;
use std::rc::Rc;

use flex_platform::{ColorScheme, MemoryHost, NoopHost};
use flex_theme::{Theme, ThemeConfig, ThemeError, ThemeOptions, ThemeStore};
use pretty_assertions::assert_eq;

fn store_on(host: &MemoryHost) -> ThemeStore {
    let store = ThemeStore::new(host.shared(), ThemeConfig::default());
    store.initialize();
    store
}

fn record(store: &ThemeStore) -> (Rc<RefCell<Vec<(Theme, ColorScheme)>>>, flex_core::Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    let sub = store.on_theme_change(move |theme, resolved| s.borrow_mut().push((theme, resolved)));
    (seen, sub)
}

#[test]
fn set_then_get_returns_each_token() {
    let host = MemoryHost::new();
    let store = store_on(&host);
    for theme in Theme::ALL {
        store.set_theme(theme);
        assert_eq!(store.get_theme(), theme);
        assert_eq!(host.stored("flex-theme").as_deref(), Some(theme.as_str()));
    }
}

#[test]
fn invalid_token_leaves_theme_unchanged() {
    let host = MemoryHost::new();
    let store = store_on(&host);
    store.set_theme(Theme::Dark);

    let (seen, _sub) = record(&store);
    let err = store.set_theme_str("purple").unwrap_err();
    assert_eq!(err, ThemeError::InvalidTheme("purple".into()));
    assert_eq!(store.get_theme(), Theme::Dark);
    assert!(seen.borrow().is_empty());
}

#[test]
fn system_alias_sets_auto() {
    let host = MemoryHost::new();
    let store = store_on(&host);
    store.set_theme_str("system").unwrap();
    assert_eq!(store.get_theme(), Theme::Auto);
    assert_eq!(host.stored("flex-theme").as_deref(), Some("auto"));
}

#[test]
fn auto_follows_system_scheme_after_notification() {
    let host = MemoryHost::with_system_scheme(ColorScheme::Light);
    let store = store_on(&host);
    store.set_theme(Theme::Auto);
    assert_eq!(store.get_resolved_theme(), ColorScheme::Light);

    let (seen, _sub) = record(&store);
    host.set_system_scheme(ColorScheme::Dark);

    assert_eq!(store.get_resolved_theme(), ColorScheme::Dark);
    assert_eq!(host.attribute("data-theme").as_deref(), Some("dark"));
    assert_eq!(*seen.borrow(), vec![(Theme::Auto, ColorScheme::Dark)]);
}

#[test]
fn explicit_theme_ignores_system_scheme() {
    let host = MemoryHost::with_system_scheme(ColorScheme::Light);
    let store = store_on(&host);
    store.set_theme(Theme::Light);

    let (seen, _sub) = record(&store);
    host.set_system_scheme(ColorScheme::Dark);
    assert!(seen.borrow().is_empty());
    assert_eq!(host.attribute("data-theme").as_deref(), Some("light"));
}

#[test]
fn toggle_uses_resolved_value() {
    let host = MemoryHost::with_system_scheme(ColorScheme::Dark);
    let store = store_on(&host);
    assert_eq!(store.get_theme(), Theme::Auto);

    assert_eq!(store.toggle_theme(), Theme::Light);
    assert_eq!(store.toggle_theme(), Theme::Dark);
    assert_eq!(store.get_resolved_theme(), ColorScheme::Dark);

    store.set_theme(Theme::Light);
    store.toggle_theme();
    assert_eq!(store.get_theme(), Theme::Dark);
}

#[test]
fn listener_called_once_per_set_until_unsubscribed() {
    let host = MemoryHost::with_system_scheme(ColorScheme::Dark);
    let store = store_on(&host);
    let (seen, sub) = record(&store);

    store.set_theme(Theme::Light);
    store.set_theme(Theme::Auto);
    assert_eq!(
        *seen.borrow(),
        vec![(Theme::Light, ColorScheme::Light), (Theme::Auto, ColorScheme::Dark)]
    );

    sub.unsubscribe();
    sub.unsubscribe();
    store.set_theme(Theme::Dark);
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn listener_may_unsubscribe_during_notification() {
    let host = MemoryHost::new();
    let store = store_on(&host);
    let calls = Rc::new(RefCell::new(0));
    let slot: Rc<RefCell<Option<flex_core::Subscription>>> = Rc::new(RefCell::new(None));

    let (c, s) = (calls.clone(), slot.clone());
    let sub = store.on_theme_change(move |_, _| {
        *c.borrow_mut() += 1;
        if let Some(sub) = s.borrow().as_ref() {
            sub.unsubscribe();
        }
    });
    *slot.borrow_mut() = Some(sub);

    store.set_theme(Theme::Dark);
    store.set_theme(Theme::Light);
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn initialize_reads_persisted_value_and_applies_it() {
    let host = MemoryHost::with_system_scheme(ColorScheme::Light);
    host.simulate_external_write("flex-theme", Some("dark"));
    let store = store_on(&host);

    assert_eq!(store.get_theme(), Theme::Dark);
    assert_eq!(host.attribute("data-theme").as_deref(), Some("dark"));
}

#[test]
fn invalid_persisted_value_falls_back_to_default() {
    let host = MemoryHost::new();
    host.simulate_external_write("flex-theme", Some("midnight"));
    let store = ThemeStore::new(
        host.shared(),
        ThemeConfig {
            default_theme: Theme::Light,
            ..ThemeConfig::default()
        },
    );
    store.initialize();
    assert_eq!(store.get_theme(), Theme::Light);
}

#[test]
fn initialize_is_idempotent() {
    let host = MemoryHost::new();
    let store = store_on(&host);
    store.initialize();
    store.initialize();
    assert_eq!(host.scheme_subscriber_count(), 1);
    assert_eq!(host.storage_subscriber_count(), 1);
}

#[test]
fn external_storage_write_is_adopted() {
    let host = MemoryHost::with_system_scheme(ColorScheme::Light);
    let store = store_on(&host);
    let (seen, _sub) = record(&store);

    host.simulate_external_write("flex-theme", Some("dark"));
    assert_eq!(store.get_theme(), Theme::Dark);
    assert_eq!(host.attribute("data-theme").as_deref(), Some("dark"));

    host.simulate_external_write("flex-theme", None);
    assert_eq!(store.get_theme(), Theme::Auto);

    host.simulate_external_write("unrelated", Some("light"));
    assert_eq!(
        *seen.borrow(),
        vec![(Theme::Dark, ColorScheme::Dark), (Theme::Auto, ColorScheme::Light)]
    );
}

#[test]
fn configure_reinitializes_under_new_key() {
    let host = MemoryHost::new();
    host.simulate_external_write("app-theme", Some("dark"));
    let store = store_on(&host);
    store.set_theme(Theme::Light);

    store.configure(
        ThemeOptions::new()
            .storage_key("app-theme")
            .attribute("data-mode"),
    );

    assert_eq!(store.get_theme(), Theme::Dark);
    assert_eq!(host.attribute("data-mode").as_deref(), Some("dark"));
    assert_eq!(host.scheme_subscriber_count(), 1);

    store.set_theme(Theme::Auto);
    assert_eq!(host.stored("app-theme").as_deref(), Some("auto"));
    assert_eq!(host.stored("flex-theme").as_deref(), Some("light"));
}

#[test]
fn configure_before_initialize_touches_nothing() {
    let host = MemoryHost::new();
    let store = ThemeStore::with_defaults(host.shared());
    store.configure(ThemeOptions::new().default_theme(Theme::Dark));
    assert_eq!(host.attribute("data-theme"), None);
    assert_eq!(store.get_theme(), Theme::Dark);
}

#[test]
fn class_names_follow_resolved_theme() {
    let host = MemoryHost::new();
    let store = ThemeStore::new(
        host.shared(),
        ThemeConfig {
            apply_class_names: true,
            ..ThemeConfig::default()
        },
    );
    store.initialize();
    store.set_theme(Theme::Dark);
    assert!(host.has_class("dark"));
    assert!(!host.has_class("light"));
    store.toggle_theme();
    assert!(host.has_class("light"));
    assert!(!host.has_class("dark"));
}

#[test]
fn storage_failure_keeps_in_memory_state() {
    let host = MemoryHost::new();
    let store = store_on(&host);
    host.set_storage_failure(true);

    store.set_theme(Theme::Dark);
    assert_eq!(store.get_theme(), Theme::Dark);
    assert_eq!(host.attribute("data-theme").as_deref(), Some("dark"));
    assert_eq!(host.stored("flex-theme"), None);
}

#[test]
fn noop_host_returns_defaults_and_never_panics() {
    let store = ThemeStore::with_defaults(Rc::new(NoopHost));
    store.initialize();
    assert_eq!(store.get_theme(), Theme::Auto);
    assert_eq!(store.get_resolved_theme(), ColorScheme::Light);

    store.set_theme(Theme::Dark);
    assert_eq!(store.get_theme(), Theme::Dark);
    assert_eq!(store.toggle_theme(), Theme::Light);
}

#[test]
fn dropping_the_store_releases_host_subscriptions() {
    let host = MemoryHost::new();
    let store = store_on(&host);
    let clone = store.clone();
    drop(store);
    assert_eq!(host.scheme_subscriber_count(), 1);
    drop(clone);
    assert_eq!(host.scheme_subscriber_count(), 0);
    assert_eq!(host.storage_subscriber_count(), 0);
}

#[test]
fn independent_stores_do_not_share_listeners() {
    let host = MemoryHost::new();
    let a = store_on(&host);
    let b = ThemeStore::new(
        host.shared(),
        ThemeConfig {
            storage_key: "other".into(),
            ..ThemeConfig::default()
        },
    );
    let (seen, _sub) = record(&b);
    a.set_theme(Theme::Dark);
    assert!(seen.borrow().is_empty());
}
