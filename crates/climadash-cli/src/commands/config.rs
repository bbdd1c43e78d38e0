//! Config command implementation.

use std::path::Path;

use anyhow::{Context, Result};

use climadash_cli::config::{
    Config, parse_api_url, parse_bool, parse_format, parse_page_size, parse_timeout,
    parse_utc_offset_hours, parse_year,
};

use crate::cli::{ConfigAction, ConfigKey};
use crate::style;

/// Validate `value` for `key` and store it in `config`.
pub fn apply_set(config: &mut Config, key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::ApiUrl => config.api_url = Some(parse_api_url(value)?),
        ConfigKey::PageSize => config.page_size = Some(parse_page_size(value)?),
        ConfigKey::Year => config.year = Some(parse_year(value)?),
        ConfigKey::UtcOffsetHours => config.utc_offset_hours = Some(parse_utc_offset_hours(value)?),
        ConfigKey::Timeout => config.timeout = Some(parse_timeout(value)?),
        ConfigKey::Format => config.format = Some(parse_format(value)?),
        ConfigKey::NoColor => config.no_color = parse_bool(value)?,
        ConfigKey::Fahrenheit => config.fahrenheit = parse_bool(value)?,
    }
    Ok(())
}

pub fn cmd_config(action: ConfigAction, path: &Path, no_color: bool) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            let config = Config::load_from(path);
            let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            if !path.exists() {
                eprintln!(
                    "{}",
                    style::format_info(
                        &format!("No config file at {}; showing defaults", path.display()),
                        no_color
                    )
                );
            }
            print!("{}", content);
        }
        ConfigAction::Init => {
            if path.exists() {
                eprintln!(
                    "{}",
                    style::format_warning(
                        &format!("Config already exists at {}", path.display()),
                        no_color
                    )
                );
                return Ok(());
            }
            Config::default().save_to(path)?;
            eprintln!(
                "{}",
                style::format_success(
                    &format!("Created config at {}", path.display()),
                    no_color
                )
            );
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(path);
            apply_set(&mut config, key, &value)
                .with_context(|| format!("Invalid value for {:?}", key))?;
            config.save_to(path)?;
            tracing::debug!(?key, path = %path.display(), "Config updated");
            eprintln!(
                "{}",
                style::format_success(&format!("Set {:?} = {}", key, value.trim()), no_color)
            );
        }
    }
    Ok(())
}
