use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::DeviceId;
use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, YamlConfigSerializer,
};
use crate::debug_log;
use super::store::ScoreStore;
use super::tally::Scores;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreFile {
    #[serde(default)]
    pub devices: BTreeMap<DeviceId, Scores>,
}

/// Score store backed by a single document holding every device's tallies.
/// Each operation re-reads the document so external edits are picked up.
pub struct FileScoreStore<TContentProvider = FileContentConfigProvider, TSerializer = YamlConfigSerializer>
where
    TContentProvider: ConfigContentProvider,
    TSerializer: ConfigSerializer<ScoreFile>,
{
    content_provider: TContentProvider,
    serializer: TSerializer,
    write_lock: Mutex<()>,
}

impl FileScoreStore<FileContentConfigProvider, YamlConfigSerializer> {
    pub fn from_yaml_file(file_path: impl AsRef<Path>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path.as_ref()),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TContentProvider, TSerializer> FileScoreStore<TContentProvider, TSerializer>
where
    TContentProvider: ConfigContentProvider,
    TSerializer: ConfigSerializer<ScoreFile>,
{
    pub fn new(content_provider: TContentProvider, serializer: TSerializer) -> Self {
        Self {
            content_provider,
            serializer,
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<ScoreFile, String> {
        match self.content_provider.get_config_content()? {
            Some(content) if !content.trim().is_empty() => self.serializer.deserialize(&content),
            _ => Ok(ScoreFile::default()),
        }
    }

    fn save(&self, file: &ScoreFile) -> Result<(), String> {
        let content = self.serializer.serialize(file)?;
        self.content_provider.set_config_content(&content)
    }

    fn modify<R>(&self, change: impl FnOnce(&mut ScoreFile) -> R) -> Result<R, String> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| "Score file lock poisoned".to_string())?;
        let mut file = self.load()?;
        let result = change(&mut file);
        self.save(&file)?;
        Ok(result)
    }
}

impl<TContentProvider, TSerializer> ScoreStore for FileScoreStore<TContentProvider, TSerializer>
where
    TContentProvider: ConfigContentProvider,
    TSerializer: ConfigSerializer<ScoreFile>,
{
    fn fetch_or_create(&self, device_id: &DeviceId) -> Result<Scores, String> {
        if let Some(scores) = self.load()?.devices.get(device_id) {
            return Ok(scores.clone());
        }

        debug_log!("Creating zeroed scores for device {}", device_id);
        self.modify(|file| file.devices.entry(device_id.clone()).or_default().clone())
    }

    fn replace(&self, device_id: &DeviceId, scores: &Scores) -> Result<(), String> {
        self.modify(|file| {
            file.devices.insert(device_id.clone(), scores.clone());
        })
    }
}
