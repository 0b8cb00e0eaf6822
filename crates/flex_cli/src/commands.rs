use std::fs;
use std::io::Write;

use anyhow::{bail, Context, Result};
use flex_animation::keyframes_stylesheet;
use flex_app::{FlexConfig, FlexTheme};
use flex_i18n::{get_message, SUPPORTED_LOCALES};
use flex_theme::generate_css_variables;
use tracing::debug;

use crate::cli::{Command, ConfigAction, LocaleAction, MessageArgs, PresetAction, ThemeAction};

pub fn run(command: Command, flex: &FlexTheme, out: &mut dyn Write) -> Result<()> {
    debug!("running {:?}", command);
    match command {
        Command::Css { attribute } => {
            let attribute = attribute.unwrap_or_else(|| flex.config().attribute);
            write!(out, "{}", generate_css_variables(&attribute))?;
        }
        Command::Keyframes => write!(out, "{}", keyframes_stylesheet())?,
        Command::Theme { action } => theme(action, flex, out)?,
        Command::Locale { action } => locale(action, flex, out)?,
        Command::Message(args) => message(args, flex, out)?,
        Command::Presets { action } => presets(action, flex, out)?,
        Command::Config { action } => config(action, flex, out)?,
    }
    Ok(())
}

fn theme(action: ThemeAction, flex: &FlexTheme, out: &mut dyn Write) -> Result<()> {
    match action {
        ThemeAction::Get => {}
        ThemeAction::Set { theme } => flex
            .store()
            .set_theme_str(&theme)
            .with_context(|| format!("cannot set theme `{theme}`"))?,
        ThemeAction::Toggle => {
            flex.toggle_theme();
        }
    }
    writeln!(out, "{} ({})", flex.get_theme(), flex.get_resolved_theme())?;
    Ok(())
}

fn locale(action: LocaleAction, flex: &FlexTheme, out: &mut dyn Write) -> Result<()> {
    match action {
        LocaleAction::Get => writeln!(out, "{}", flex.locale())?,
        LocaleAction::Set { locale } => {
            flex.set_locale(&locale)
                .with_context(|| format!("cannot switch to `{locale}`"))?;
            writeln!(out, "{}", flex.locale())?;
        }
        LocaleAction::List => {
            for locale in SUPPORTED_LOCALES {
                writeln!(out, "{locale}")?;
            }
        }
    }
    Ok(())
}

fn message(args: MessageArgs, flex: &FlexTheme, out: &mut dyn Write) -> Result<()> {
    let locale = args.locale.unwrap_or_else(|| flex.locale());
    let params: Vec<(&str, &str)> = args
        .params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    writeln!(out, "{}", get_message(&locale, &args.path, &params))?;
    Ok(())
}

fn presets(action: PresetAction, flex: &FlexTheme, out: &mut dyn Write) -> Result<()> {
    let registry = flex.presets();
    match action {
        PresetAction::List => {
            let active = registry.active_id();
            for preset in registry.all() {
                let marker = if preset.id == active { "*" } else { " " };
                let origin = if preset.built_in { "built-in" } else { "custom" };
                writeln!(
                    out,
                    "{marker} {:<20} {:<24} {:<6} {origin}",
                    preset.id,
                    preset.name,
                    preset.kind.as_str()
                )?;
            }
        }
        PresetAction::Export { ids } => {
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            let selection = if ids.is_empty() { None } else { Some(ids.as_slice()) };
            writeln!(out, "{}", registry.export(selection))?;
        }
        PresetAction::Import { file } => {
            let json = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let imported = registry.import(&json);
            writeln!(out, "imported {} preset(s)", imported.len())?;
            for preset in imported {
                writeln!(out, "  {}", preset.id)?;
            }
        }
        PresetAction::Activate { id } => {
            registry
                .set_active(&id)
                .with_context(|| format!("cannot activate `{id}`"))?;
            writeln!(out, "{id}")?;
        }
        PresetAction::Remove { id } => {
            if !registry.remove_custom(&id) {
                bail!("`{id}` is not a custom preset");
            }
            writeln!(out, "removed {id}")?;
        }
    }
    Ok(())
}

fn config(action: ConfigAction, flex: &FlexTheme, out: &mut dyn Write) -> Result<()> {
    match action {
        ConfigAction::Init { path, force } => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            FlexConfig::default()
                .save(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            writeln!(out, "wrote {}", path.display())?;
        }
        ConfigAction::Show => write!(out, "{}", flex.config().to_toml_string()?)?,
    }
    Ok(())
}
