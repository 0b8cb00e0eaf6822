//! CSS custom property generation and injection

use flex_platform::{Host, HostError};
use tracing::{debug, warn};

use crate::tokens::{
    ColorTokens, CssTokens, RadiusTokens, ShadowTokens, SpacingTokens, TypographyTokens,
};

/// Id of the `<style>` element holding the generated variables
pub const VARIABLES_STYLE_ID: &str = "flex-theme-variables";

/// Token tables published as CSS variables
#[derive(Clone, Debug, PartialEq)]
pub struct TokenSet {
    pub light_colors: ColorTokens,
    pub dark_colors: ColorTokens,
    pub spacing: SpacingTokens,
    pub typography: TypographyTokens,
    pub radii: RadiusTokens,
    pub light_shadows: ShadowTokens,
    pub dark_shadows: ShadowTokens,
}

impl TokenSet {
    pub fn new() -> Self {
        Self {
            light_colors: ColorTokens::light(),
            dark_colors: ColorTokens::dark(),
            spacing: SpacingTokens::default(),
            typography: TypographyTokens::default(),
            radii: RadiusTokens::default(),
            light_shadows: ShadowTokens::light(),
            dark_shadows: ShadowTokens::dark(),
        }
    }

    /// Stylesheet with a `:root` block (light colors plus every scale) and a
    /// `[attribute="dark"]` block overriding colors and shadows
    pub fn to_css(&self, attribute: &str) -> String {
        let mut css = String::from(":root {\n");
        write_group(&mut css, "Colors", &self.light_colors);
        write_group(&mut css, "Spacing", &self.spacing);
        write_group(&mut css, "Typography", &self.typography);
        write_group(&mut css, "Radius", &self.radii);
        write_group(&mut css, "Shadows", &self.light_shadows);
        css.push_str("}\n\n");

        css.push_str(&format!("[{attribute}=\"dark\"] {{\n"));
        write_group(&mut css, "Colors", &self.dark_colors);
        write_group(&mut css, "Shadows", &self.dark_shadows);
        css.push('}');
        css
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

fn write_group(css: &mut String, title: &str, tokens: &dyn CssTokens) {
    css.push_str(&format!("  /* {title} */\n"));
    for (name, value) in tokens.css_variables() {
        css.push_str(&format!("  --{name}: {value};\n"));
    }
}

/// CSS variables for the default token tables
pub fn generate_css_variables(attribute: &str) -> String {
    TokenSet::new().to_css(attribute)
}

/// Install the default variables as the `flex-theme-variables` stylesheet
pub fn inject_css_variables(host: &dyn Host, attribute: &str) -> Result<(), HostError> {
    inject_token_set(host, &TokenSet::new(), attribute)
}

/// Install `tokens` as the `flex-theme-variables` stylesheet, replacing any
/// previous content
pub fn inject_token_set(host: &dyn Host, tokens: &TokenSet, attribute: &str) -> Result<(), HostError> {
    if !host.is_available() {
        debug!("inject_css_variables: host unavailable, skipping");
        return Ok(());
    }
    host.install_style_sheet(VARIABLES_STYLE_ID, &tokens.to_css(attribute))
}

/// Set a custom property on the root element (`name` without `--`)
pub fn set_css_variable(host: &dyn Host, name: &str, value: &str) {
    if let Err(e) = host.set_css_variable(name, value) {
        warn!("set_css_variable(--{}): {}", name, e);
    }
}

/// Current value of a root custom property, empty when unset or unknown
pub fn get_css_variable(host: &dyn Host, name: &str) -> String {
    host.css_variable(name).unwrap_or_default()
}
