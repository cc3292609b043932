mod config;

pub(crate) use common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

pub use config::{Config, ensure_device_id, get_config_manager, get_config_path, resolve_scores_path};
