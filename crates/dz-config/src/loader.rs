//! YAML configuration file loading

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::{ConfigError, ConfigResult};

/// Load a generator configuration file
///
/// Every key is optional; anything missing keeps its built-in default.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<GeneratorConfig> {
    let path = path.as_ref();
    debug!("Loading configuration file: {:?}", path);

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_str(&content, path)
}

/// Parse a generator configuration from YAML text
pub fn load_config_str(content: &str, source_path: &Path) -> ConfigResult<GeneratorConfig> {
    // An empty file is a valid, all-defaults configuration
    if content.trim().is_empty() {
        return Ok(GeneratorConfig::default());
    }

    let config: GeneratorConfig =
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
            path: source_path.to_path_buf(),
            source: e,
        })?;

    config.validate()?;
    Ok(config)
}
