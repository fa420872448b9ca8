//! Configuration file loading

use std::path::Path;

use super::{
    CatalogSettings,
    ConfigError,
};

/// Name of the configuration file looked up in a catalog directory.
pub const CONFIG_FILE_NAME: &str = ".ts-catalog.json";

/// Loads settings from `.ts-catalog.json` in `catalog_dir`.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and parses
/// - `Ok(None)`: no configuration file
///
/// # Errors
/// - File read error
/// - JSON parse error
pub(super) fn load_from_dir(catalog_dir: &Path) -> Result<Option<CatalogSettings>, ConfigError> {
    let config_path = catalog_dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: CatalogSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn test_load_from_dir_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"filePattern": "i18n/*.ts"}"#)
            .unwrap();

        let settings = load_from_dir(temp_dir.path()).unwrap();

        assert_eq!(settings.unwrap().file_pattern, "i18n/*.ts");
    }

    #[rstest]
    fn test_load_from_dir_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_dir(temp_dir.path());

        assert!(result.unwrap().is_none());
    }

    #[rstest]
    fn test_load_from_dir_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "invalid json").unwrap();

        let result = load_from_dir(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
