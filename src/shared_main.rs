use std::{env, path::Path};

use anyhow::{Context, Result};
use regex_lite::Regex;
use static_init::dynamic;

use crate::data_types::LocalFile;
use crate::errors::FormError;

pub fn logger_init(module_path: &str) {
    let level = if env::var(pretty_env_logger::env_logger::DEFAULT_FILTER_ENV).unwrap_or_default()
        == "debug"
    {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module(module_path, level)
        .filter_module("kitchen_dash", level)
        .init();
}

/// Splits `Rice=2` (or `Rice:2`) into name and the raw quantity text.
pub fn parse_ingredient_arg(txt: &str) -> Result<(String, String), FormError> {
    #[dynamic]
    static RE: Regex = Regex::new(r"^\s*([^=:]*?)\s*[=:]\s*(\S*)\s*$").unwrap();

    let caps = RE
        .captures(txt)
        .ok_or_else(|| FormError::InvalidIngredientArg(txt.to_string()))?;
    let name = caps.get(1).map_or("", |m| m.as_str());
    let quantity = caps.get(2).map_or("", |m| m.as_str());

    Ok((name.to_string(), quantity.to_string()))
}

pub async fn read_local_file(path: &Path) -> Result<LocalFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("could not read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(LocalFile { file_name, bytes })
}
