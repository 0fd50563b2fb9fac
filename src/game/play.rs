//! Playing cards and resolving the penalty sweep

use crate::core::{Card, UserId};
use crate::game::{GameEngine, Phase, TableView};
use crate::{ItoError, Result};
use serde::{Deserialize, Serialize};

/// How a play ended, in resolution priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The player had nothing left to play; nothing changed
    NoCard,
    /// Life ran out. The round has been reset.
    GameOver,
    /// Every dealt card has been played. The round has been reset.
    GameClear,
    /// Someone held a smaller card; life was lost and play continues
    Failure,
    /// The card was the lowest one left
    Success,
}

impl Outcome {
    /// Game over and game clear end the round
    pub fn ends_round(&self) -> bool {
        matches!(self, Outcome::GameOver | Outcome::GameClear)
    }
}

/// A card forced out of a hand because it was below the played card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Penalty {
    pub player: UserId,
    pub card: Card,
}

/// Result of one `play_from` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayReport {
    pub player: UserId,
    /// The card played, or `None` for an exhausted hand
    pub card: Option<Card>,
    /// Cards forced out by the sweep, in roster order
    pub penalties: Vec<Penalty>,
    pub outcome: Outcome,
    /// The table after the sweep, before any round reset
    pub table: TableView,
}

impl PlayReport {
    pub fn penalty_count(&self) -> usize {
        self.penalties.len()
    }
}

impl GameEngine {
    /// Play the lowest concealed card of `id`, then force out every smaller card
    ///
    /// Each forced card costs one life. The comparison baseline for the sweep
    /// is the card `id` played, not the forced cards. When the round ends in
    /// game over or game clear, it is reset before returning.
    pub fn play_from(&mut self, id: UserId) -> Result<PlayReport> {
        self.require_phase(Phase::Ongoing)?;
        let idx = self.player_idx(id).ok_or(ItoError::NotRegistered(id))?;

        let Some(card) = self.players[idx].play_lowest() else {
            return Ok(PlayReport {
                player: id,
                card: None,
                penalties: Vec::new(),
                outcome: Outcome::NoCard,
                table: self.table(),
            });
        };
        self.mark_played(card);

        let penalties = self.penalty_sweep(card);
        let outcome = if self.is_game_over() {
            Outcome::GameOver
        } else if self.is_cleared() {
            Outcome::GameClear
        } else if !penalties.is_empty() {
            Outcome::Failure
        } else {
            Outcome::Success
        };

        let report = PlayReport {
            player: id,
            card: Some(card),
            penalties,
            outcome,
            table: self.table(),
        };
        if outcome.ends_round() {
            self.reset_round();
        }
        Ok(report)
    }

    fn penalty_sweep(&mut self, played: Card) -> Vec<Penalty> {
        let mut penalties = Vec::new();
        for idx in 0..self.players.len() {
            while self.players[idx].has_smaller_concealed_than(played) {
                let Some(forced) = self.players[idx].play_lowest() else {
                    break;
                };
                self.mark_played(forced);
                self.life = self.life.saturating_sub(1);
                penalties.push(Penalty {
                    player: self.players[idx].id(),
                    card: forced,
                });
            }
        }
        penalties
    }
}
