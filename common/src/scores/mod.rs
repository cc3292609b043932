mod file_store;
mod memory_store;
mod store;
mod tally;

pub use file_store::{FileScoreStore, ScoreFile};
pub use memory_store::InMemoryScoreStore;
pub use store::{ScoreStore, record_game};
pub use tally::{ScoreSet, Scores};
