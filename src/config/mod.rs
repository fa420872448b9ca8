//! Settings read from `.ts-catalog.json`
mod loader;
mod manager;
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    CatalogSettings,
    ConfigError,
    LoadErrorPolicy,
    LoadingConfig,
    ValidationError,
};
