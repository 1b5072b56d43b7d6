use crate::{ConfigError, DashboardConfig};
use std::{fs, io, path::Path};

/// Parse and validate a TOML document.
pub fn from_toml_str(contents: &str) -> Result<DashboardConfig, ConfigError> {
    let config: DashboardConfig = toml::from_str(contents)?;
    config.validate()?;

    Ok(config)
}

/// Read, parse and validate the config file at `path`.
pub fn load(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    from_toml_str(&contents)
}

/// Like [`load`], but a missing file yields the defaults. Any other
/// failure is still reported.
pub fn load_or_default(path: &Path) -> Result<DashboardConfig, ConfigError> {
    match load(path) {
        Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Ok(DashboardConfig::default())
        }
        other => other,
    }
}

/// Render a config back to TOML.
pub fn to_toml_string(config: &DashboardConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}
