//! Holds the active settings

use std::path::PathBuf;

use super::{
    CatalogSettings,
    ConfigError,
    loader,
};

#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    current_settings: CatalogSettings,

    /// Directory the settings were loaded from
    catalog_dir: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: CatalogSettings::default(), catalog_dir: None }
    }

    /// Loads and validates the settings of `catalog_dir`, or the defaults.
    ///
    /// The current settings are left untouched on error.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation errors
    pub fn load_settings(&mut self, catalog_dir: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for catalog directory: {:?}", catalog_dir);

        let settings = if let Some(dir) = &catalog_dir {
            loader::load_from_dir(dir)?.unwrap_or_default()
        } else {
            CatalogSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.catalog_dir = catalog_dir;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replaces the settings after validating them.
    ///
    /// # Errors
    /// Returns [`ConfigError::ValidationErrors`] for invalid settings.
    pub fn update_settings(&mut self, new_settings: CatalogSettings) -> Result<(), ConfigError> {
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;
        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");
        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &CatalogSettings {
        &self.current_settings
    }

    #[must_use]
    pub const fn catalog_dir(&self) -> Option<&PathBuf> {
        self.catalog_dir.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::CONFIG_FILE_NAME;

    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert_eq!(manager.get_settings().file_pattern, "**/*.ts");
        assert!(manager.catalog_dir().is_none());
    }

    #[rstest]
    fn test_load_settings_without_dir() {
        let mut manager = ConfigManager::new();

        manager.load_settings(None).unwrap();

        assert_eq!(manager.get_settings().fallback_locales, vec!["en"]);
        assert!(manager.catalog_dir().is_none());
    }

    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"fallbackLocales": ["fr", "en"]}"#)
            .unwrap();

        let mut manager = ConfigManager::new();
        manager.load_settings(Some(temp_dir.path().to_path_buf())).unwrap();

        assert_eq!(manager.get_settings().fallback_locales, vec!["fr", "en"]);
        assert!(manager.catalog_dir().is_some());
    }

    #[rstest]
    fn test_load_settings_invalid_config_keeps_previous() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"filePattern": ""}"#).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert_eq!(manager.get_settings().file_pattern, "**/*.ts");
        assert!(manager.catalog_dir().is_none());
    }

    #[rstest]
    fn test_update_settings() {
        let mut manager = ConfigManager::new();

        let valid = CatalogSettings { file_pattern: "*.ts".to_string(), ..CatalogSettings::default() };
        manager.update_settings(valid).unwrap();
        assert_eq!(manager.get_settings().file_pattern, "*.ts");

        let invalid = CatalogSettings { file_pattern: String::new(), ..CatalogSettings::default() };
        assert!(manager.update_settings(invalid).is_err());
        assert_eq!(manager.get_settings().file_pattern, "*.ts");
    }
}
