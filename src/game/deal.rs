//! Dealing cards at the start of a round

use crate::core::Card;
use crate::game::state::MIN_PLAYERS;
use crate::game::{GameEngine, Phase};
use crate::{ItoError, Result};
use rand::seq::index;
use rustc_hash::FxHashSet;

impl GameEngine {
    /// Number of cards a deal needs with the current roster and level
    pub fn cards_needed(&self) -> usize {
        self.players.len() * self.level as usize
    }

    /// Draw `level` distinct cards per player and start the round
    pub fn deal_and_start(&mut self) -> Result<()> {
        self.check_can_deal()?;
        let cards = self.draw_cards(self.cards_needed())?;
        self.start_with_cards(cards)
    }

    /// Start the round with a predetermined list of cards
    ///
    /// Cards are popped from the end of `cards`: for each of `level` rounds,
    /// every player in join order receives the next one.
    pub fn start_with_cards(&mut self, mut cards: Vec<Card>) -> Result<()> {
        self.check_can_deal()?;

        let needed = self.cards_needed();
        if cards.len() != needed {
            return Err(ItoError::InvalidDeal(format!(
                "expected {needed} cards, got {}",
                cards.len()
            )));
        }
        let mut seen = FxHashSet::default();
        if let Some(dup) = cards.iter().find(|&&card| !seen.insert(card)) {
            return Err(ItoError::InvalidDeal(format!("card {dup} dealt twice")));
        }

        self.deck.clear();
        for _ in 0..self.level {
            for player in &mut self.players {
                // Length was checked above
                if let Some(card) = cards.pop() {
                    player.receive_card(card);
                    self.deck.insert(card, false);
                }
            }
        }
        self.ongoing = true;
        Ok(())
    }

    fn check_can_deal(&self) -> Result<()> {
        self.require_phase(Phase::Idle)?;
        if self.players.len() < MIN_PLAYERS {
            return Err(ItoError::NotEnoughPlayers {
                required: MIN_PLAYERS,
                actual: self.players.len(),
            });
        }
        let needed = self.cards_needed();
        if needed > Card::DECK_SIZE {
            return Err(ItoError::DeckExhausted {
                needed,
                available: Card::DECK_SIZE,
            });
        }
        Ok(())
    }

    /// Sample `count` distinct cards without replacement
    fn draw_cards(&mut self, count: usize) -> Result<Vec<Card>> {
        index::sample(&mut self.rng, Card::DECK_SIZE, count)
            .into_iter()
            .map(|i| {
                u8::try_from(i + Card::MIN as usize)
                    .ok()
                    .and_then(Card::new)
                    .ok_or_else(|| ItoError::InvalidDeal(format!("sampled index {i} outside the deck")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{UserHandle, UserId};

    fn engine_with_players(n: u64, seed: u64) -> GameEngine {
        let mut engine = GameEngine::with_seed(seed);
        for id in 1..=n {
            engine
                .register_player(UserHandle::new(UserId::new(id), format!("p{id}")))
                .unwrap();
        }
        engine
    }

    fn cards(values: &[u8]) -> Vec<Card> {
        values.iter().map(|&v| Card::new(v).unwrap()).collect()
    }

    #[test]
    fn test_deal_sizes_per_level() {
        for level in 1..=3 {
            let mut engine = engine_with_players(4, level as u64);
            engine.set_level(level).unwrap();
            engine.deal_and_start().unwrap();

            assert_eq!(engine.deck().len(), 4 * level as usize);
            for player in engine.players() {
                assert_eq!(player.hand.len(), level as usize);
            }
            assert!(engine.deck().values().all(|&played| !played));
            assert!(engine.is_ongoing());
        }
    }

    #[test]
    fn test_deal_requires_two_players() {
        let mut engine = engine_with_players(1, 0);
        assert!(matches!(
            engine.deal_and_start(),
            Err(ItoError::NotEnoughPlayers { required: 2, actual: 1 })
        ));
        assert!(!engine.is_ongoing());
    }

    #[test]
    fn test_deal_rejects_oversized_roster() {
        let mut engine = engine_with_players(34, 0);
        engine.set_level(3).unwrap();
        assert!(matches!(
            engine.deal_and_start(),
            Err(ItoError::DeckExhausted { needed: 102, available: 100 })
        ));
    }

    #[test]
    fn test_deal_twice_is_wrong_phase() {
        let mut engine = engine_with_players(2, 0);
        engine.deal_and_start().unwrap();
        assert!(matches!(engine.deal_and_start(), Err(ItoError::WrongPhase(Phase::Ongoing))));
    }

    #[test]
    fn test_fixed_deal_is_round_by_round() {
        let mut engine = engine_with_players(2, 0);
        engine.set_level(2).unwrap();
        engine.start_with_cards(cards(&[1, 2, 3, 4])).unwrap();

        // Pops 4, 3 for round one, then 2, 1 for round two
        assert_eq!(engine.players()[0].hand.render_open(), "4 2");
        assert_eq!(engine.players()[1].hand.render_open(), "3 1");
        assert_eq!(engine.dealt_cards(), cards(&[1, 2, 3, 4]));
    }

    #[test]
    fn test_fixed_deal_validation() {
        let mut engine = engine_with_players(2, 0);
        assert!(matches!(
            engine.start_with_cards(cards(&[5])),
            Err(ItoError::InvalidDeal(_))
        ));
        assert!(matches!(
            engine.start_with_cards(cards(&[5, 5])),
            Err(ItoError::InvalidDeal(_))
        ));
        assert!(!engine.is_ongoing());
        assert!(engine.players().iter().all(|p| p.hand.is_empty()));
    }

    #[test]
    fn test_same_seed_same_deal() {
        let mut a = engine_with_players(3, 99);
        let mut b = engine_with_players(3, 99);
        a.deal_and_start().unwrap();
        b.deal_and_start().unwrap();
        assert_eq!(a.table().seats, b.table().seats);
    }
}
