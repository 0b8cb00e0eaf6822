//! Browser host backed by `web-sys`
//!
//! Every call re-resolves `window`/`document` so a missing global degrades
//! to the same defaults as [`NoopHost`](crate::NoopHost) instead of failing.

use flex_core::Subscription;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::error::{HostError, Result};
use crate::host::{Host, StorageChange};
use crate::scheme::{ColorScheme, TextDirection};

const PORTRAIT_QUERY: &str = "(orientation: portrait)";
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Host for `wasm32` builds running in a browser
#[derive(Debug, Clone, Copy, Default)]
pub struct WebHost;

impl WebHost {
    fn storage(key: &str) -> Result<web_sys::Storage> {
        web_sys::window()
            .ok_or(HostError::Unavailable("window"))?
            .local_storage()
            .map_err(|e| HostError::storage(key, format!("{e:?}")))?
            .ok_or(HostError::Unavailable("localStorage"))
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    fn root() -> Result<web_sys::Element> {
        Self::document()
            .and_then(|d| d.document_element())
            .ok_or(HostError::Unavailable("document.documentElement"))
    }

    fn media_matches(query: &str) -> Option<bool> {
        web_sys::window()?
            .match_media(query)
            .ok()
            .flatten()
            .map(|mql| mql.matches())
    }

    /// Attach `handler` for `event` on `target`; the subscription detaches it.
    fn listen<E>(
        target: web_sys::EventTarget,
        event: &'static str,
        handler: impl Fn(E) + 'static,
    ) -> Subscription
    where
        E: wasm_bindgen::convert::FromWasmAbi + 'static,
    {
        let closure = Closure::<dyn Fn(E)>::new(handler);
        if let Err(e) =
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            warn!("WebHost: failed to listen for `{}`: {:?}", event, e);
            return Subscription::noop();
        }

        Subscription::new(move || {
            let _ = target
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            drop(closure);
        })
    }
}

impl Host for WebHost {
    fn get_stored_value(&self, key: &str) -> Result<Option<String>> {
        Self::storage(key)?
            .get_item(key)
            .map_err(|e| HostError::storage(key, format!("getItem failed: {e:?}")))
    }

    fn set_stored_value(&self, key: &str, value: &str) -> Result<()> {
        Self::storage(key)?
            .set_item(key, value)
            .map_err(|e| HostError::storage(key, format!("setItem failed: {e:?}")))
    }

    fn remove_stored_value(&self, key: &str) -> Result<()> {
        Self::storage(key)?
            .remove_item(key)
            .map_err(|e| HostError::storage(key, format!("removeItem failed: {e:?}")))
    }

    fn system_color_scheme(&self) -> Option<ColorScheme> {
        Self::media_matches(ColorScheme::DARK_QUERY).map(ColorScheme::from_dark)
    }

    fn apply_attribute(&self, name: &str, value: &str) -> Result<()> {
        Self::root()?
            .set_attribute(name, value)
            .map_err(|e| HostError::Dom(format!("setAttribute({name}) failed: {e:?}")))
    }

    fn subscribe_system_scheme_change(&self, callback: Box<dyn Fn(ColorScheme)>) -> Subscription {
        let Some(mql) = web_sys::window()
            .and_then(|w| w.match_media(ColorScheme::DARK_QUERY).ok().flatten())
        else {
            return Subscription::noop();
        };

        Self::listen(
            mql.unchecked_into(),
            "change",
            move |event: web_sys::MediaQueryListEvent| {
                callback(ColorScheme::from_dark(event.matches()));
            },
        )
    }

    fn subscribe_storage_change(&self, callback: Box<dyn Fn(&StorageChange)>) -> Subscription {
        let Some(window) = web_sys::window() else {
            return Subscription::noop();
        };

        Self::listen(
            window.unchecked_into(),
            "storage",
            move |event: web_sys::StorageEvent| {
                // `key` is null when another tab called `localStorage.clear()`
                if let Some(key) = event.key() {
                    callback(&StorageChange {
                        key,
                        new_value: event.new_value(),
                    });
                }
            },
        )
    }

    fn prefers_reduced_motion(&self) -> bool {
        Self::media_matches(REDUCED_MOTION_QUERY).unwrap_or(false)
    }

    fn set_css_variable(&self, name: &str, value: &str) -> Result<()> {
        let root: web_sys::HtmlElement = Self::root()?
            .dyn_into()
            .map_err(|_| HostError::Dom("root is not an HTML element".into()))?;
        root.style()
            .set_property(&format!("--{name}"), value)
            .map_err(|e| HostError::Dom(format!("setProperty(--{name}) failed: {e:?}")))
    }

    fn css_variable(&self, name: &str) -> Option<String> {
        let window = web_sys::window()?;
        let root = Self::root().ok()?;
        let style = window.get_computed_style(&root).ok().flatten()?;
        let value = style.get_property_value(&format!("--{name}")).ok()?;
        Some(value.trim().to_string())
    }

    fn set_root_class(&self, class: &str, enabled: bool) -> Result<()> {
        let list = Self::root()?.class_list();
        let result = if enabled {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };
        result.map_err(|e| HostError::Dom(format!("classList update failed: {e:?}")))
    }

    fn set_document_language(&self, lang: &str, direction: TextDirection) -> Result<()> {
        let root = Self::root()?;
        root.set_attribute("lang", lang)
            .and_then(|_| root.set_attribute("dir", direction.as_str()))
            .map_err(|e| HostError::Dom(format!("lang/dir update failed: {e:?}")))
    }

    fn preferred_languages(&self) -> Vec<String> {
        let Some(navigator) = web_sys::window().map(|w| w.navigator()) else {
            return Vec::new();
        };
        let languages: Vec<String> = navigator
            .languages()
            .iter()
            .filter_map(|v| v.as_string())
            .collect();
        if languages.is_empty() {
            navigator.language().into_iter().collect()
        } else {
            languages
        }
    }

    fn install_style_sheet(&self, id: &str, css: &str) -> Result<()> {
        let document = Self::document().ok_or(HostError::Unavailable("document"))?;
        let element = match document.get_element_by_id(id) {
            Some(existing) => existing,
            None => {
                let style = document
                    .create_element("style")
                    .map_err(|e| HostError::Dom(format!("createElement failed: {e:?}")))?;
                style.set_id(id);
                let head = document.head().ok_or(HostError::Unavailable("document.head"))?;
                head.append_child(&style)
                    .map_err(|e| HostError::Dom(format!("appendChild failed: {e:?}")))?;
                style
            }
        };
        element.set_text_content(Some(css));
        Ok(())
    }

    fn viewport_width(&self) -> Option<u32> {
        web_sys::window()?
            .inner_width()
            .ok()?
            .as_f64()
            .map(|w| w.max(0.0) as u32)
    }

    fn is_touch_device(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let has_ontouchstart = js_sys::Reflect::has(&window, &"ontouchstart".into()).unwrap_or(false);
        has_ontouchstart || window.navigator().max_touch_points() > 0
    }

    fn is_portrait(&self) -> Option<bool> {
        Self::media_matches(PORTRAIT_QUERY)
    }

    fn subscribe_orientation_change(&self, callback: Box<dyn Fn(bool)>) -> Subscription {
        let Some(window) = web_sys::window() else {
            return Subscription::noop();
        };

        Self::listen(
            window.unchecked_into(),
            "orientationchange",
            move |_event: web_sys::Event| {
                callback(Self::media_matches(PORTRAIT_QUERY).unwrap_or(false));
            },
        )
    }
}
