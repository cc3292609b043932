use crate::DeviceId;
use crate::games::tictactoe::{GameMode, Outcome};
use super::tally::Scores;

/// Persistence boundary for score tallies, keyed by device identifier.
pub trait ScoreStore {
    /// Returns the stored tallies, storing an all-zero set first if this device
    /// has never been seen.
    fn fetch_or_create(&self, device_id: &DeviceId) -> Result<Scores, String>;

    /// Overwrites every tally of the device with `scores`.
    fn replace(&self, device_id: &DeviceId, scores: &Scores) -> Result<(), String>;
}

/// Loads, bumps one counter, and writes the whole tally set back.
pub fn record_game(
    store: &impl ScoreStore,
    device_id: &DeviceId,
    mode: GameMode,
    outcome: Outcome,
) -> Result<Scores, String> {
    let mut scores = store.fetch_or_create(device_id)?;
    scores
        .record(mode, outcome)
        .map_err(|e| format!("{} for {}", e, device_id))?;
    store.replace(device_id, &scores)?;
    Ok(scores)
}
