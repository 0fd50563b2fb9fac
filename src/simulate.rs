//! Simulation mode: play many automated rounds in parallel and collect statistics
//!
//! Every round runs on its own engine, so rounds share nothing and rayon can
//! spread them across threads.

use crate::core::{UserHandle, UserId};
use crate::game::{GameEngine, Outcome};
use crate::{ItoError, Result};
use clap::ValueEnum;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the next player to put a card is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Strategy {
    /// Any player still holding cards, uniformly at random
    Random,
    /// Always the player holding the lowest card (never fails)
    Ordered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub games: usize,
    pub players: usize,
    pub level: i64,
    pub life: i64,
    pub strategy: Strategy,
    pub seed: Option<u64>,
}

/// How one simulated round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub outcome: Outcome,
    pub plays: usize,
    pub penalties: usize,
    pub life_left: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub games: usize,
    pub clears: usize,
    pub game_overs: usize,
    pub penalties: usize,
    /// Sum of life remaining at the end of each cleared round
    pub life_left: usize,
}

impl SimulationStats {
    fn record(mut self, round: &RoundResult) -> Self {
        self.games += 1;
        self.penalties += round.penalties;
        match round.outcome {
            Outcome::GameClear => {
                self.clears += 1;
                self.life_left += round.life_left as usize;
            }
            Outcome::GameOver => self.game_overs += 1,
            _ => {}
        }
        self
    }

    pub fn clear_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.clears as f64 / self.games as f64
        }
    }

    pub fn avg_penalties(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.penalties as f64 / self.games as f64
        }
    }

    pub fn avg_life_left(&self) -> f64 {
        if self.clears == 0 {
            0.0
        } else {
            self.life_left as f64 / self.clears as f64
        }
    }
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games:          {}", self.games)?;
        writeln!(f, "Clears:         {} ({:.1}%)", self.clears, self.clear_rate() * 100.0)?;
        writeln!(f, "Game overs:     {}", self.game_overs)?;
        writeln!(f, "Avg penalties:  {:.2}", self.avg_penalties())?;
        write!(f, "Avg life left:  {:.2} (cleared rounds)", self.avg_life_left())
    }
}

/// Play one round from deal to game over or clear
pub fn play_round(config: &SimulationConfig, game_idx: u64) -> Result<RoundResult> {
    let (mut engine, mut picker) = match config.seed {
        Some(seed) => {
            let seed = seed.wrapping_add(game_idx);
            (GameEngine::with_seed(seed), ChaCha12Rng::seed_from_u64(seed.rotate_left(32)))
        }
        None => (GameEngine::new(), ChaCha12Rng::from_entropy()),
    };

    engine.set_life(config.life)?;
    engine.set_level(config.level)?;
    for id in 1..=config.players as u64 {
        engine.register_player(UserHandle::new(UserId::new(id), format!("bot{id}")))?;
    }
    engine.deal_and_start()?;

    // Every play reveals at least one card
    let max_plays = engine.cards_needed();
    let mut penalties = 0;
    for plays in 1..=max_plays {
        let next = pick_player(&engine, config.strategy, &mut picker)
            .ok_or_else(|| ItoError::InvalidDeal("round still running with no cards left".to_string()))?;
        let report = engine.play_from(next)?;
        penalties += report.penalty_count();
        if report.outcome.ends_round() {
            return Ok(RoundResult {
                outcome: report.outcome,
                plays,
                penalties,
                life_left: report.table.life,
            });
        }
    }
    Err(ItoError::InvalidDeal(format!("round did not end after {max_plays} plays")))
}

fn pick_player(engine: &GameEngine, strategy: Strategy, rng: &mut impl Rng) -> Option<UserId> {
    let holding = engine.players().iter().filter(|p| p.has_concealed_cards());
    match strategy {
        Strategy::Random => holding.map(|p| p.id()).choose(rng),
        Strategy::Ordered => holding
            .min_by_key(|p| p.hand.lowest_concealed())
            .map(|p| p.id()),
    }
}

/// Run `config.games` rounds in parallel
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationStats> {
    let rounds = (0..config.games as u64)
        .into_par_iter()
        .map(|idx| play_round(config, idx))
        .collect::<Result<Vec<_>>>()?;

    Ok(rounds
        .iter()
        .fold(SimulationStats::default(), |stats, round| stats.record(round)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(strategy: Strategy) -> SimulationConfig {
        SimulationConfig {
            games: 50,
            players: 4,
            level: 2,
            life: 3,
            strategy,
            seed: Some(11),
        }
    }

    #[test]
    fn test_ordered_always_clears() {
        let stats = run_simulation(&config(Strategy::Ordered)).unwrap();
        assert_eq!(stats.games, 50);
        assert_eq!(stats.clears, 50);
        assert_eq!(stats.penalties, 0);
        assert_eq!(stats.avg_life_left(), 3.0);
    }

    #[test]
    fn test_random_rounds_all_end() {
        let stats = run_simulation(&config(Strategy::Random)).unwrap();
        assert_eq!(stats.games, 50);
        assert_eq!(stats.clears + stats.game_overs, 50);
        // Random order with eight cards almost never avoids every penalty
        assert!(stats.penalties > 0);
    }

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let a = run_simulation(&config(Strategy::Random)).unwrap();
        let b = run_simulation(&config(Strategy::Random)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_config() {
        let mut bad = config(Strategy::Ordered);
        bad.players = 1;
        assert!(matches!(run_simulation(&bad), Err(ItoError::NotEnoughPlayers { .. })));

        let mut bad = config(Strategy::Ordered);
        bad.level = 0;
        assert!(matches!(run_simulation(&bad), Err(ItoError::OutOfRange { .. })));
    }
}
