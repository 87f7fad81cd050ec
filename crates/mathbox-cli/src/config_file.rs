use std::{fs, io, path::Path};

use mathbox::MathboxConfig;
use serde::Deserialize;

/// The contents of a `--config` file.
///
/// Besides `block`, the file takes every renderer option at the top level: `font-size`
/// (1 to 10), `letter-shape-style` (`tex`, `iso`, `french` or `upright`), `atom-ids`
/// (`off`, `counter` or `random`), `small-operators` (the big operators that stay small in
/// display style) and a `[registers]` table of TeX register overrides. Keys left out keep
/// their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Lay formulas out in display style unless `--inline` is given.
    pub block: bool,
    #[serde(flatten)]
    pub mathbox: MathboxConfig,
}

/// Why a config file could not be loaded.
///
/// Register values are only checked later, by [`mathbox::Renderer::new`].
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Read(io::Error),
    /// The file is not valid TOML, or a key has a value of the wrong type.
    Syntax(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read(err) => write!(f, "could not read the file: {err}"),
            ConfigError::Syntax(err) => write!(f, "{}", err.message()),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read(err) => Some(err),
            ConfigError::Syntax(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Read(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Syntax(err)
    }
}

/// Reads the settings for the CLI from a TOML file.
///
/// ```toml
/// block = true
/// font-size = 7
/// letter-shape-style = "upright"
/// small-operators = ["\\smallint", "\\oint"]
///
/// [registers]
/// thinmuskip = "4mu"
/// ```
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let config = parse_config(&fs::read_to_string(path)?)?;
    log::info!("loaded configuration from {}", path.display());
    log::debug!("{config:?}");
    Ok(config)
}

#[inline]
fn parse_config(s: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(s)?)
}
