//! Core game types: cards, identities, hands and players

pub mod hand;
pub mod player;
pub mod types;

pub use hand::{Hand, HeldCard, MASK};
pub use player::Player;
pub use types::{Card, ChannelId, ChannelRef, GuildId, GuildRef, PlayerName, UserHandle, UserId};
