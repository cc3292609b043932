//! Persistence plumbing shared by the client config and the score file.

mod config_content_provider;
mod config_manager;
mod config_serializer;

pub use config_content_provider::{ConfigContentProvider, FileContentConfigProvider};
pub use config_manager::ConfigManager;
pub use config_serializer::{ConfigSerializer, YamlConfigSerializer};

/// Checked after every load and before every save.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
