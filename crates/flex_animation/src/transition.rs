//! Transition presets

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::AnimationError;

/// A `transition` shorthand value
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub property: String,
    /// Seconds
    pub duration: f32,
    pub easing: Easing,
}

impl Transition {
    pub fn new(property: impl Into<String>, duration: f32, easing: Easing) -> Self {
        Self {
            property: property.into(),
            duration,
            easing,
        }
    }

    /// `all <duration>s <easing>`
    pub fn all(duration: f32, easing: Easing) -> Self {
        Self::new("all", duration, easing)
    }

    pub fn to_css(&self) -> String {
        format!("{} {}s {}", self.property, self.duration, self.easing.to_css())
    }
}

/// Named transitions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionPreset {
    #[default]
    Default,
    Fast,
    Slow,
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Bounce,
    Spring,
    /// No transition; what reduced-motion users get
    None,
}

impl TransitionPreset {
    pub const ALL: [TransitionPreset; 10] = [
        Self::Default,
        Self::Fast,
        Self::Slow,
        Self::Linear,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::Bounce,
        Self::Spring,
        Self::None,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Fast => "fast",
            Self::Slow => "slow",
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
            Self::Bounce => "bounce",
            Self::Spring => "spring",
            Self::None => "none",
        }
    }

    /// The preset as a transition; `None` for [`TransitionPreset::None`]
    pub fn transition(self) -> Option<Transition> {
        let t = match self {
            Self::Default => Transition::all(0.3, Easing::Ease),
            Self::Fast => Transition::all(0.15, Easing::Ease),
            Self::Slow => Transition::all(0.5, Easing::Ease),
            Self::Linear => Transition::all(0.3, Easing::Linear),
            Self::EaseIn => Transition::all(0.3, Easing::EaseIn),
            Self::EaseOut => Transition::all(0.3, Easing::EaseOut),
            Self::EaseInOut => Transition::all(0.3, Easing::EaseInOut),
            Self::Bounce => Transition::all(0.3, Easing::BOUNCE),
            Self::Spring => Transition::all(0.3, Easing::SPRING),
            Self::None => return None,
        };
        Some(t)
    }

    pub fn to_css(self) -> String {
        self.transition()
            .map(|t| t.to_css())
            .unwrap_or_else(|| "none".to_string())
    }
}

impl Display for TransitionPreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TransitionPreset {
    type Err = AnimationError;

    /// Accepts kebab-case (`ease-in`) and camelCase (`easeIn`) keys
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let camel = |p: &TransitionPreset| p.key().replace("-i", "I").replace("-o", "O");
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.key() == s || camel(p) == s)
            .ok_or_else(|| AnimationError::UnknownTransition(s.to_string()))
    }
}
