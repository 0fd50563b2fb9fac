//! Player representation

use crate::core::{Card, Hand, PlayerName, UserHandle, UserId};
use serde::{Deserialize, Serialize};

/// A registered player: chat identity plus this round's hand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub user: UserHandle,
    pub hand: Hand,
}

impl Player {
    pub fn new(user: UserHandle) -> Self {
        Player { user, hand: Hand::new() }
    }

    pub fn id(&self) -> UserId {
        self.user.id
    }

    pub fn name(&self) -> &PlayerName {
        &self.user.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn receive_card(&mut self, card: Card) {
        self.hand.receive_card(card);
    }

    pub fn play_lowest(&mut self) -> Option<Card> {
        self.hand.play_lowest()
    }

    pub fn has_smaller_concealed_than(&self, card: Card) -> bool {
        self.hand.has_smaller_concealed_than(card)
    }

    pub fn has_concealed_cards(&self) -> bool {
        self.hand.lowest_concealed().is_some()
    }

    pub fn reset_hand(&mut self) {
        self.hand.reset();
    }
}
