//! Theme preference and its resolution

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use flex_platform::ColorScheme;
use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// Concrete theme actually applied to the document
pub type ResolvedTheme = ColorScheme;

/// The user's theme preference
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the host's color scheme
    #[default]
    #[serde(alias = "system")]
    Auto,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Auto];

    /// Canonical token, also the persisted form
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }

    /// Resolve against the host's scheme; `auto` falls back to light when
    /// the host cannot tell.
    pub fn resolve(self, system: Option<ColorScheme>) -> ResolvedTheme {
        match self {
            Self::Light => ColorScheme::Light,
            Self::Dark => ColorScheme::Dark,
            Self::Auto => system.unwrap_or_default(),
        }
    }

    pub fn is_auto(self) -> bool {
        self == Self::Auto
    }
}

impl From<ColorScheme> for Theme {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::Light,
            ColorScheme::Dark => Self::Dark,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" | "system" => Ok(Self::Auto),
            other => Err(ThemeError::InvalidTheme(other.to_string())),
        }
    }
}

/// Payload delivered to theme listeners
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeChange {
    pub theme: Theme,
    pub resolved: ResolvedTheme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_system_alias() {
        assert_eq!("system".parse::<Theme>(), Ok(Theme::Auto));
        assert_eq!("auto".parse::<Theme>(), Ok(Theme::Auto));
        assert_eq!(Theme::Auto.to_string(), "auto");
        assert_eq!(
            "sepia".parse::<Theme>(),
            Err(ThemeError::InvalidTheme("sepia".into()))
        );
    }

    #[test]
    fn serde_alias() {
        let theme: Theme = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(theme, Theme::Auto);
        assert_eq!(serde_json::to_string(&Theme::Auto).unwrap(), "\"auto\"");
    }

    #[test]
    fn resolve() {
        assert_eq!(Theme::Auto.resolve(None), ColorScheme::Light);
        assert_eq!(Theme::Auto.resolve(Some(ColorScheme::Dark)), ColorScheme::Dark);
        assert_eq!(Theme::Light.resolve(Some(ColorScheme::Dark)), ColorScheme::Light);
    }
}
