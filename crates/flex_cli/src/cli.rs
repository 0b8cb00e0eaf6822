use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use flex_platform::ColorScheme;

#[derive(Parser, Debug)]
#[command(name = "flex-theme", version, about = "Theme state, CSS and messages for flex-theme")]
pub struct Cli {
    /// Configuration file (defaults to ./flex-theme.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON file standing in for browser storage
    #[arg(long, global = true, default_value = ".flex-theme/state.json")]
    pub state: PathBuf,

    /// System color scheme to report when resolving `auto`
    #[arg(long, global = true, value_enum)]
    pub system: Option<SystemScheme>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemScheme {
    Light,
    Dark,
}

impl From<SystemScheme> for ColorScheme {
    fn from(scheme: SystemScheme) -> Self {
        match scheme {
            SystemScheme::Light => ColorScheme::Light,
            SystemScheme::Dark => ColorScheme::Dark,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the CSS custom properties for both palettes
    Css {
        /// Attribute selecting the dark palette (defaults to the configured one)
        #[arg(long)]
        attribute: Option<String>,
    },

    /// Print the `@keyframes` stylesheet
    Keyframes,

    /// Read or change the persisted theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Read or change the persisted locale
    Locale {
        #[command(subcommand)]
        action: LocaleAction,
    },

    /// Look up a message
    Message(MessageArgs),

    /// Manage presets
    Presets {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// Write or show configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThemeAction {
    /// Print the preference and the resolved theme
    Get,
    /// Set `light`, `dark` or `auto`
    Set { theme: String },
    /// Switch to the opposite of the resolved theme
    Toggle,
}

#[derive(Subcommand, Debug)]
pub enum LocaleAction {
    Get,
    Set { locale: String },
    /// List supported locales
    List,
}

#[derive(Args, Debug)]
pub struct MessageArgs {
    /// Dotted path, e.g. `actions.switchTo`
    pub path: String,

    /// Locale to use instead of the active one
    #[arg(short, long)]
    pub locale: Option<String>,

    /// `key=value` substitution, repeatable
    #[arg(short, long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{s}`"))
}

#[derive(Subcommand, Debug)]
pub enum PresetAction {
    List,
    /// Print presets as JSON
    Export {
        /// Ids to export (all when omitted)
        ids: Vec<String>,
    },
    /// Add custom presets from a JSON file
    Import { file: PathBuf },
    /// Make a preset active
    Activate { id: String },
    /// Remove a custom preset
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init {
        #[arg(default_value = "flex-theme.toml")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_message_params() {
        let cli = Cli::try_parse_from([
            "flex-theme",
            "message",
            "actions.switchTo",
            "-p",
            "theme=dark",
            "--locale",
            "fr-FR",
        ])
        .unwrap();
        let Command::Message(args) = cli.command else {
            panic!("expected message command");
        };
        assert_eq!(args.params, vec![("theme".to_string(), "dark".to_string())]);
        assert_eq!(args.locale.as_deref(), Some("fr-FR"));
    }

    #[test]
    fn rejects_malformed_params() {
        assert!(Cli::try_parse_from(["flex-theme", "message", "x", "-p", "novalue"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["flex-theme", "theme", "get", "--system", "dark", "-vv"]).unwrap();
        assert_eq!(cli.system, Some(SystemScheme::Dark));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
