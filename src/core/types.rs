//! Strongly-typed wrappers for game concepts
//!
//! Chat-platform objects never enter the engine. Users, channels and guilds
//! are carried as inert value types: an id plus a display name. Private
//! delivery to a player is addressed by their `UserId` alone.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A numbered card. Values are in `Card::MIN..=Card::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card(u8);

impl Card {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    /// Number of distinct cards in a full deck
    pub const DECK_SIZE: usize = (Card::MAX - Card::MIN + 1) as usize;

    /// Create a card, or `None` if `value` is outside the deck
    pub fn new(value: u8) -> Option<Self> {
        (Card::MIN..=Card::MAX).contains(&value).then_some(Card(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque chat-platform user id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(u64);

impl UserId {
    pub const fn new(id: u64) -> Self {
        UserId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player display name (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: impl Into<String>) -> Self {
        PlayerName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerName {
    fn from(s: String) -> Self {
        PlayerName(s)
    }
}

impl From<&str> for PlayerName {
    fn from(s: &str) -> Self {
        PlayerName(s.to_string())
    }
}

/// Identity of a chat user as seen by the engine
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserHandle {
    pub id: UserId,
    pub name: PlayerName,
}

impl UserHandle {
    pub fn new(id: UserId, name: impl Into<PlayerName>) -> Self {
        UserHandle { id, name: name.into() }
    }
}

impl fmt::Display for UserHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(u64);

impl ChannelId {
    pub const fn new(id: u64) -> Self {
        ChannelId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A text channel the game can be bound to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelRef {
    pub id: ChannelId,
    pub name: String,
}

impl ChannelRef {
    pub fn new(id: ChannelId, name: impl Into<String>) -> Self {
        ChannelRef { id, name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuildId(u64);

impl GuildId {
    pub const fn new(id: u64) -> Self {
        GuildId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// The server (guild) the bound channel belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuildRef {
    pub id: GuildId,
    pub name: String,
}

impl GuildRef {
    pub fn new(id: GuildId, name: impl Into<String>) -> Self {
        GuildRef { id, name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_bounds() {
        assert_eq!(Card::new(0), None);
        assert_eq!(Card::new(101), None);
        assert_eq!(Card::new(1).map(|c| c.value()), Some(1));
        assert_eq!(Card::new(100).map(|c| c.value()), Some(100));
        assert_eq!(Card::DECK_SIZE, 100);
    }

    #[test]
    fn test_card_ordering() {
        let low = Card::new(10).unwrap();
        let high = Card::new(90).unwrap();
        assert!(low < high);
        assert_eq!(low.to_string(), "10");
    }

    #[test]
    fn test_player_name() {
        let name = PlayerName::new("Alice");
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn test_user_handle_display() {
        let user = UserHandle::new(UserId::new(7), "Bob");
        assert_eq!(user.to_string(), "Bob (7)");
    }
}
