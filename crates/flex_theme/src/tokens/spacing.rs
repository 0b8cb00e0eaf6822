//! Spacing scale

use super::{CssTokens, Length};

/// Spacing token keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum SpacingToken {
    Xxs,
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
    Xxxl,
}

impl SpacingToken {
    pub const ALL: [SpacingToken; 8] = [
        SpacingToken::Xxs,
        SpacingToken::Xs,
        SpacingToken::Sm,
        SpacingToken::Md,
        SpacingToken::Lg,
        SpacingToken::Xl,
        SpacingToken::Xxl,
        SpacingToken::Xxxl,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Xxs => "xxs",
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xxl => "xxl",
            Self::Xxxl => "xxxl",
        }
    }
}

/// Complete spacing scale
#[derive(Clone, Debug, PartialEq)]
pub struct SpacingTokens {
    pub xxs: Length,
    pub xs: Length,
    pub sm: Length,
    pub md: Length,
    pub lg: Length,
    pub xl: Length,
    pub xxl: Length,
    pub xxxl: Length,
}

impl SpacingTokens {
    /// Get spacing by token key
    pub fn get(&self, token: SpacingToken) -> Length {
        match token {
            SpacingToken::Xxs => self.xxs,
            SpacingToken::Xs => self.xs,
            SpacingToken::Sm => self.sm,
            SpacingToken::Md => self.md,
            SpacingToken::Lg => self.lg,
            SpacingToken::Xl => self.xl,
            SpacingToken::Xxl => self.xxl,
            SpacingToken::Xxxl => self.xxxl,
        }
    }

    /// Scale built from a base unit in rem (`md` equals `base`)
    pub fn with_base(base: f32) -> Self {
        Self {
            xxs: Length::Rem(base * 0.25),
            xs: Length::Rem(base * 0.5),
            sm: Length::Rem(base * 0.75),
            md: Length::Rem(base),
            lg: Length::Rem(base * 1.5),
            xl: Length::Rem(base * 2.0),
            xxl: Length::Rem(base * 3.0),
            xxxl: Length::Rem(base * 4.0),
        }
    }
}

impl Default for SpacingTokens {
    fn default() -> Self {
        Self::with_base(1.0)
    }
}

impl CssTokens for SpacingTokens {
    fn css_variables(&self) -> Vec<(String, String)> {
        SpacingToken::ALL
            .iter()
            .map(|&t| (format!("spacing-{}", t.key()), self.get(t).to_css()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale() {
        let spacing = SpacingTokens::default();
        assert_eq!(spacing.xxs.to_css(), "0.25rem");
        assert_eq!(spacing.md.to_css(), "1rem");
        assert_eq!(spacing.xxxl.to_css(), "4rem");
        assert_eq!(spacing.lg.to_px(), 24.0);
    }
}
