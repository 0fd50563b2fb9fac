//! Read-only snapshots of the table for rendering

use crate::core::{PlayerName, UserId};
use crate::game::Phase;
use serde::{Deserialize, Serialize};

/// One player's seat: who sits there and both renderings of their hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub id: UserId,
    pub name: PlayerName,
    /// Every card value; only for the owner or after the round ends
    pub open: String,
    /// Unplayed cards masked; safe for the shared channel
    pub closed: String,
}

/// The table as everyone sees it at one moment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub phase: Phase,
    pub life: u8,
    pub level: u8,
    pub theme: String,
    pub seats: Vec<SeatView>,
}

impl TableView {
    pub fn seat(&self, id: UserId) -> Option<&SeatView> {
        self.seats.iter().find(|seat| seat.id == id)
    }
}
