use std::path::{Path, PathBuf};

use common::config::Validate;
use common::games::tictactoe::{Difficulty, FirstPlayerMode};
use common::id_generator::generate_device_id;
use common::{DeviceId, log};
use serde::{Deserialize, Serialize};

use super::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

const CONFIG_FILE_NAME: &str = "tictactoe_config.yaml";
const DEFAULT_SCORES_FILE_NAME: &str = "tictactoe_scores.yaml";

pub fn get_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    config_path: &Path,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(config_path)
}

/// Relative score file paths are taken relative to the config file.
pub fn resolve_scores_path(config_path: &Path, scores_file: &str) -> PathBuf {
    let scores_path = Path::new(scores_file);
    if scores_path.is_absolute() {
        return scores_path.to_path_buf();
    }
    match config_path.parent() {
        Some(dir) => dir.join(scores_path),
        None => scores_path.to_path_buf(),
    }
}

/// Returns the config together with this device's identifier, generating and
/// persisting one the first time the client runs.
pub fn ensure_device_id(
    manager: &ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>,
) -> Result<(Config, DeviceId), String> {
    let config = manager.get_config()?;
    if let Some(device_id) = config.device_id.clone() {
        return Ok((config, device_id));
    }

    let device_id = generate_device_id();
    let config = manager.update_config(|config| config.device_id = Some(device_id.clone()))?;
    log!("Generated new device id {}", device_id);
    Ok((config, device_id))
}

/// Missing fields fall back to `Config::default()`.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub device_id: Option<DeviceId>,
    pub scores_file: String,
    pub difficulty: Difficulty,
    pub first_player: FirstPlayerMode,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.scores_file.trim().is_empty() {
            return Err("scores_file must not be empty".to_string());
        }
        if let Some(device_id) = &self.device_id
            && device_id.as_str().trim().is_empty()
        {
            return Err("device_id must not be blank".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_id: None,
            scores_file: DEFAULT_SCORES_FILE_NAME.to_string(),
            difficulty: Difficulty::Medium,
            first_player: FirstPlayerMode::Player,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_client_config_{}.yaml", random_number));
        path
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();

        let serialized_string = serializer.serialize(&default_config).unwrap();
        let deserialized_config: Config = serializer.deserialize(&serialized_string).unwrap();

        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_config_can_be_saved_and_loaded_through_manager() {
        let config = Config {
            device_id: Some(generate_device_id()),
            difficulty: Difficulty::Hard,
            first_player: FirstPlayerMode::Random,
            ..Config::default()
        };
        let file_path = get_temp_file_path();
        let manager = get_config_manager(&file_path);

        manager.set_config(&config).unwrap();

        assert_eq!(manager.get_config().unwrap(), config);
        let fresh_manager = get_config_manager(&file_path);
        assert_eq!(fresh_manager.get_config().unwrap(), config);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager = get_config_manager(Path::new("this_file_does_not_exist.yaml"));

        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.as_path());
        content_provider
            .set_config_content("device_id: abc\nscores_file: \"  \"\n")
            .unwrap();

        let manager = get_config_manager(&file_path);

        assert!(manager.get_config().is_err());
    }

    #[test]
    fn test_unknown_difficulty_cant_be_read() {
        let file_path = get_temp_file_path();
        std::fs::write(&file_path, "scores_file: s.yaml\ndifficulty: Impossible\n").unwrap();

        let manager = get_config_manager(&file_path);

        assert!(manager.get_config().is_err());
    }

    #[test]
    fn test_partial_and_empty_config_fall_back_to_defaults() {
        let partial_path = get_temp_file_path();
        std::fs::write(&partial_path, "difficulty: Hard\n").unwrap();

        let partial = get_config_manager(&partial_path).get_config().unwrap();

        assert_eq!(partial.difficulty, Difficulty::Hard);
        assert_eq!(partial.scores_file, DEFAULT_SCORES_FILE_NAME);

        let empty_path = get_temp_file_path();
        std::fs::write(&empty_path, "").unwrap();

        let (config, device_id) = ensure_device_id(&get_config_manager(&empty_path)).unwrap();

        assert_eq!(config.scores_file, DEFAULT_SCORES_FILE_NAME);
        assert_eq!(config.device_id, Some(device_id));
    }

    #[test]
    fn test_device_id_generated_once_and_persisted() {
        let file_path = get_temp_file_path();

        let (_, first) = ensure_device_id(&get_config_manager(&file_path)).unwrap();
        let (config, second) = ensure_device_id(&get_config_manager(&file_path)).unwrap();

        assert_eq!(first, second);
        assert_eq!(config.device_id, Some(first));
    }

    #[test]
    fn test_scores_path_relative_to_config() {
        let config_path = Path::new("/tmp/tictactoe/tictactoe_config.yaml");

        assert_eq!(
            resolve_scores_path(config_path, "scores.yaml"),
            PathBuf::from("/tmp/tictactoe/scores.yaml")
        );
        assert_eq!(
            resolve_scores_path(config_path, "/var/lib/scores.yaml"),
            PathBuf::from("/var/lib/scores.yaml")
        );
    }
}
