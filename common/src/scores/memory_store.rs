use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::DeviceId;
use super::store::ScoreStore;
use super::tally::Scores;

#[derive(Default)]
pub struct InMemoryScoreStore {
    scores: Mutex<HashMap<DeviceId, Scores>>,
}

impl InMemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<DeviceId, Scores>>, String> {
        self.scores
            .lock()
            .map_err(|_| "Score store lock poisoned".to_string())
    }

    pub fn device_count(&self) -> usize {
        self.entries().map(|entries| entries.len()).unwrap_or(0)
    }
}

impl ScoreStore for InMemoryScoreStore {
    fn fetch_or_create(&self, device_id: &DeviceId) -> Result<Scores, String> {
        let mut entries = self.entries()?;
        Ok(entries.entry(device_id.clone()).or_default().clone())
    }

    fn replace(&self, device_id: &DeviceId, scores: &Scores) -> Result<(), String> {
        self.entries()?.insert(device_id.clone(), scores.clone());
        Ok(())
    }
}
