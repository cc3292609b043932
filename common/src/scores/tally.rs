use serde::{Deserialize, Serialize};

use crate::games::tictactoe::{Difficulty, GameMode, Outcome};

/// Win/loss/draw counters for one mode, from the human's point of view.
/// In player-vs-player games wins count X victories and losses count O victories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl ScoreSet {
    /// Saturates at `u32::MAX`; counters come from an editable file.
    pub fn total(&self) -> u32 {
        self.wins.saturating_add(self.losses).saturating_add(self.draws)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    #[serde(rename = "PvP", default)]
    pub player_vs_player: ScoreSet,
    #[serde(rename = "PvAI-Easy", default)]
    pub vs_computer_easy: ScoreSet,
    #[serde(rename = "PvAI-Med", default)]
    pub vs_computer_medium: ScoreSet,
    #[serde(rename = "PvAI-Hard", default)]
    pub vs_computer_hard: ScoreSet,
}

impl Scores {
    pub fn tally(&self, mode: GameMode) -> &ScoreSet {
        match mode {
            GameMode::PlayerVsPlayer => &self.player_vs_player,
            GameMode::PlayerVsComputer(Difficulty::Easy) => &self.vs_computer_easy,
            GameMode::PlayerVsComputer(Difficulty::Medium) => &self.vs_computer_medium,
            GameMode::PlayerVsComputer(Difficulty::Hard) => &self.vs_computer_hard,
        }
    }

    pub fn tally_mut(&mut self, mode: GameMode) -> &mut ScoreSet {
        match mode {
            GameMode::PlayerVsPlayer => &mut self.player_vs_player,
            GameMode::PlayerVsComputer(Difficulty::Easy) => &mut self.vs_computer_easy,
            GameMode::PlayerVsComputer(Difficulty::Medium) => &mut self.vs_computer_medium,
            GameMode::PlayerVsComputer(Difficulty::Hard) => &mut self.vs_computer_hard,
        }
    }

    /// Bumps exactly one counter of the tally for `mode`. Fails without
    /// touching anything for an unfinished game or a counter at `u32::MAX`.
    pub fn record(&mut self, mode: GameMode, outcome: Outcome) -> Result<(), String> {
        let tally = self.tally_mut(mode);
        let (name, counter) = match outcome {
            Outcome::PlayerWins => ("wins", &mut tally.wins),
            Outcome::ComputerWins => ("losses", &mut tally.losses),
            Outcome::Draw => ("draws", &mut tally.draws),
            Outcome::Ongoing => return Err("Cannot record unfinished game".to_string()),
        };
        *counter = counter
            .checked_add(1)
            .ok_or_else(|| format!("{:?} {} counter is already at its maximum", mode, name))?;
        Ok(())
    }

    fn all(&self) -> [ScoreSet; 4] {
        [
            self.player_vs_player,
            self.vs_computer_easy,
            self.vs_computer_medium,
            self.vs_computer_hard,
        ]
    }

    pub fn games_played(&self) -> u32 {
        self.all()
            .iter()
            .map(ScoreSet::total)
            .fold(0, u32::saturating_add)
    }
}
