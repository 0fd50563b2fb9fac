//! Platform-neutral message rendering
//!
//! Every response is an `Embed` addressed to a `Destination`. The chat
//! front end decides how to draw it.

use crate::bot::Rejection;
use crate::core::{ChannelRef, PlayerName, UserHandle};
use crate::game::TableView;
use crate::ItoError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Embed accent colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colour {
    /// Informational or rejected
    Gold,
    /// Ordinary confirmation
    DarkBlue,
    /// A good play or a cleared round
    Green,
    /// Game over
    Magenta,
}

impl Colour {
    pub fn rgb(&self) -> u32 {
        match self {
            Colour::Gold => 0xf1c40f,
            Colour::DarkBlue => 0x206694,
            Colour::Green => 0x2ecc71,
            Colour::Magenta => 0xe91e63,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub colour: Colour,
    pub fields: Vec<Field>,
}

impl Embed {
    pub fn new(title: impl Into<String>, description: impl Into<String>, colour: Colour) -> Self {
        Embed {
            title: title.into(),
            description: description.into(),
            colour,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// Add the player list, or a placeholder when nobody has joined
    pub fn roster(self, names: &[PlayerName]) -> Self {
        let value = if names.is_empty() {
            "No players yet".to_string()
        } else {
            names.iter().map(|n| n.as_str()).collect::<Vec<_>>().join("\n")
        };
        self.field("Players", value, false)
    }

    pub fn life_and_level(self, table: &TableView) -> Self {
        self.field("Life", table.life.to_string(), true)
            .field("Level", table.level.to_string(), true)
    }

    pub fn theme(self, theme: &str) -> Self {
        self.field("Theme", theme, false)
    }

    /// One field per seat, showing either open or closed hands
    pub fn seats(self, table: &TableView, view: HandView) -> Self {
        table.seats.iter().fold(self, |embed, seat| {
            let hand = match view {
                HandView::Open => &seat.open,
                HandView::Closed => &seat.closed,
            };
            embed.field(seat.name.as_str(), hand.as_str(), true)
        })
    }
}

impl fmt::Display for Embed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for line in self.description.lines() {
            writeln!(f, "{line}")?;
        }
        for field in &self.fields {
            writeln!(f, "  {}: {}", field.name, field.value.replace('\n', ", "))?;
        }
        Ok(())
    }
}

/// Which rendering of a hand to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandView {
    Open,
    Closed,
}

/// Where a message goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Destination {
    /// The shared text channel
    Channel(ChannelRef),
    /// A private message to one user
    Direct(UserHandle),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Channel(channel) => write!(f, "#{}", channel.name),
            Destination::Direct(user) => write!(f, "dm @{}", user.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub destination: Destination,
    pub embed: Embed,
}

impl Delivery {
    pub fn channel(channel: &ChannelRef, embed: Embed) -> Self {
        Delivery {
            destination: Destination::Channel(channel.clone()),
            embed,
        }
    }

    pub fn direct(user: &UserHandle, embed: Embed) -> Self {
        Delivery {
            destination: Destination::Direct(user.clone()),
            embed,
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self.destination, Destination::Direct(_))
    }
}

/// Title used by every response to a command
pub fn command_title(command: &str) -> String {
    let mut chars = command.chars();
    match chars.next() {
        Some(first) => format!("{}{} command", first.to_uppercase(), chars.as_str()),
        None => "Command".to_string(),
    }
}

pub fn rejection(command: &str, rejection: &Rejection) -> Embed {
    let title = command_title(command);
    match rejection {
        Rejection::WrongChannel { bound } => {
            Embed::new(title, "The game is played in another channel", Colour::Gold)
                .field("Channel", bound.name.as_str(), false)
        }
        Rejection::NotStarted => Embed::new(title, "The game has not started", Colour::Gold),
        Rejection::AlreadyStarted => Embed::new(title, "The game is already running", Colour::Gold),
        Rejection::NotRegistered { roster } => {
            Embed::new(title, "Join the game first!", Colour::Gold).roster(roster)
        }
        Rejection::NotAdmin => Embed::new(title, "Only the admin can do that", Colour::Gold),
    }
}

pub fn error(command: &str, err: &ItoError) -> Embed {
    Embed::new(command_title(command), err.to_string(), Colour::Gold)
}
