//! A player's secret hand of numbered cards

use crate::core::Card;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Placeholder shown for a card that has not been played yet
pub const MASK: &str = "?";

/// A card held in a hand, with whether it is still concealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldCard {
    pub card: Card,
    pub concealed: bool,
}

/// Cards dealt to one player this round, in deal order
///
/// Played cards stay in the hand (revealed) so the table view can show them.
/// At most `level` cards are held, so the inline capacity covers every level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hand {
    cards: SmallVec<[HeldCard; 3]>,
}

impl Hand {
    pub fn new() -> Self {
        Hand::default()
    }

    /// Add a concealed card. The dealer guarantees uniqueness.
    pub fn receive_card(&mut self, card: Card) {
        self.cards.push(HeldCard { card, concealed: true });
    }

    /// Cards not yet played, in deal order
    pub fn concealed_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().filter(|held| held.concealed).map(|held| held.card)
    }

    /// Cards already played, in deal order
    pub fn revealed_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().filter(|held| !held.concealed).map(|held| held.card)
    }

    pub fn lowest_concealed(&self) -> Option<Card> {
        self.concealed_cards().min()
    }

    /// Reveal and return the lowest concealed card
    pub fn play_lowest(&mut self) -> Option<Card> {
        let held = self
            .cards
            .iter_mut()
            .filter(|held| held.concealed)
            .min_by_key(|held| held.card)?;
        held.concealed = false;
        Some(held.card)
    }

    /// An empty hand is never "smaller" than anything.
    pub fn has_smaller_concealed_than(&self, card: Card) -> bool {
        self.lowest_concealed().is_some_and(|lowest| lowest < card)
    }

    /// Every card value, revealed or not
    pub fn render_open(&self) -> String {
        self.cards
            .iter()
            .map(|held| held.card.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Concealed cards masked, played cards shown
    pub fn render_closed(&self) -> String {
        self.cards
            .iter()
            .map(|held| {
                if held.concealed {
                    MASK.to_string()
                } else {
                    held.card.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeldCard> {
        self.cards.iter()
    }

    pub fn reset(&mut self) {
        self.cards.clear();
    }
}
