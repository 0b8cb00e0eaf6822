use thiserror::Error;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("yaml catalog error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("unsupported locale `{0}`")]
    UnsupportedLocale(String),
}
