use std::sync::OnceLock;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::catalog::{apply_params, MessageCatalog};
use crate::locale::{normalize_locale, DEFAULT_LOCALE};
use crate::I18nError;

const BUILT_IN_CATALOGS: [(&str, &str); 6] = [
    ("en-US", include_str!("../catalogs/en-US.yaml")),
    ("es-ES", include_str!("../catalogs/es-ES.yaml")),
    ("fr-FR", include_str!("../catalogs/fr-FR.yaml")),
    ("de-DE", include_str!("../catalogs/de-DE.yaml")),
    ("ja-JP", include_str!("../catalogs/ja-JP.yaml")),
    ("ar-SA", include_str!("../catalogs/ar-SA.yaml")),
];

static BUILT_IN: OnceLock<Messages> = OnceLock::new();

/// Message catalogs keyed by locale
#[derive(Clone, Debug, Default)]
pub struct Messages {
    catalogs: IndexMap<String, MessageCatalog>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// The six catalogs shipped with flex-theme
    pub fn built_in() -> Self {
        let mut messages = Self::new();
        for (locale, src) in BUILT_IN_CATALOGS {
            match MessageCatalog::from_yaml(src) {
                Ok(catalog) => messages.insert(locale, catalog),
                Err(e) => warn!("built-in catalog {} failed to parse: {}", locale, e),
            }
        }
        messages
    }

    /// Shared copy of [`Messages::built_in`]
    pub fn global() -> &'static Messages {
        BUILT_IN.get_or_init(Self::built_in)
    }

    pub fn insert(&mut self, locale: &str, catalog: MessageCatalog) {
        self.catalogs.insert(normalize_locale(locale), catalog);
    }

    /// Parse and add a YAML catalog
    pub fn load_yaml(&mut self, locale: &str, src: &str) -> Result<(), I18nError> {
        let catalog = MessageCatalog::from_yaml(src)?;
        debug!("Messages::load_yaml: {} ({} entries)", locale, catalog.entries().len());
        self.insert(locale, catalog);
        Ok(())
    }

    pub fn catalog(&self, locale: &str) -> Option<&MessageCatalog> {
        self.catalogs.get(&normalize_locale(locale))
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    /// Look up `path` for `locale` and substitute `params`.
    ///
    /// An unknown locale uses `en-US`. A missing path (or a path that does
    /// not end at a string) yields the path itself.
    pub fn get_message(&self, locale: &str, path: &str, params: &[(&str, &str)]) -> String {
        let catalog = self
            .catalog(locale)
            .or_else(|| self.catalog(DEFAULT_LOCALE));
        match catalog.and_then(|c| c.lookup(path)) {
            Some(template) => apply_params(template, params),
            None => path.to_string(),
        }
    }
}

/// [`Messages::get_message`] against the built-in catalogs
pub fn get_message(locale: &str, path: &str, params: &[(&str, &str)]) -> String {
    Messages::global().get_message(locale, path, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn built_ins_all_parse() {
        let messages = Messages::built_in();
        assert_eq!(messages.locales().count(), BUILT_IN_CATALOGS.len());
    }

    #[test]
    fn every_locale_has_the_english_keys() {
        let messages = Messages::built_in();
        let english: Vec<String> = messages
            .catalog("en-US")
            .unwrap()
            .entries()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        for locale in messages.locales() {
            let catalog = messages.catalog(locale).unwrap();
            for key in &english {
                assert!(catalog.lookup(key).is_some(), "{locale} lacks {key}");
            }
        }
    }

    #[test]
    fn custom_catalogs_override_lookups() {
        let mut messages = Messages::built_in();
        messages
            .load_yaml("pt_BR", "themes:\n  light: \"Claro\"\n")
            .unwrap();
        assert_eq!(messages.get_message("pt-BR", "themes.light", &[]), "Claro");
        assert_eq!(messages.get_message("pt-BR", "themes.dark", &[]), "themes.dark");
    }
}
