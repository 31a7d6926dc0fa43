use std::{fs, path::Path};

use anyhow::{Context, Result};
use cursendus_core::GameConfig;

/// Loads the game configuration, falling back to the defaults without a file.
///
/// Fields missing from the file keep their default values.
pub(crate) fn load(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid config file {}", path.display()))
}

fn parse(text: &str) -> Result<GameConfig> {
    Ok(toml::from_str(text)?)
}
