use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnimationError {
    #[error("unknown transition preset `{0}`")]
    UnknownTransition(String),

    #[error("unknown animation `{0}`")]
    UnknownAnimation(String),
}
