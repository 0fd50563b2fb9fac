//! Chat command grammar
//!
//! Chat messages are parsed with the same clap derive machinery as the
//! binary's own arguments, with no binary name in front.

use crate::bot::Guard;
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "ito",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

/// A chat command understood by the bot
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Join the game
    Entry,
    /// Leave the game
    Exit,
    /// Deal the cards and start a round
    Start,
    /// Stop the current round
    Stop,
    /// Play the lowest card in your hand
    Put,
    /// Show or change the game settings
    Setting {
        #[command(subcommand)]
        setting: Option<Setting>,
    },
    /// The bot meows
    Neko,
    /// Shut the bot down (admin only)
    Quit,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    /// Set the discussion theme
    Theme {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Set the life for each round (1-3)
    Life {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Set how many cards each player gets (1-3)
    Level {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Play in this channel
    Channel,
}

impl Command {
    /// Parse one chat message; a leading `/` is optional
    pub fn parse_line(line: &str) -> Result<Command, clap::Error> {
        let line = line.trim();
        let line = line.strip_prefix('/').unwrap_or(line);
        CommandLine::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Entry => "entry",
            Command::Exit => "exit",
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Put => "put",
            Command::Setting { setting: None } => "setting",
            Command::Setting { setting: Some(Setting::Theme { .. }) } => "setting theme",
            Command::Setting { setting: Some(Setting::Life { .. }) } => "setting life",
            Command::Setting { setting: Some(Setting::Level { .. }) } => "setting level",
            Command::Setting { setting: Some(Setting::Channel) } => "setting channel",
            Command::Neko => "neko",
            Command::Quit => "quit",
        }
    }

    /// Preconditions checked in order before the command runs
    pub fn guards(&self) -> &'static [Guard] {
        use Guard::*;
        match self {
            Command::Entry => &[BindChannel, InChannel, OffGame],
            Command::Exit | Command::Start => &[BindChannel, InChannel, OffGame, Registered],
            Command::Stop | Command::Put => &[BindChannel, InChannel, InGame, Registered],
            Command::Setting { setting: None } => &[],
            Command::Setting { setting: Some(Setting::Channel) } => &[OffGame],
            Command::Setting { setting: Some(_) } => &[BindChannel, InChannel, OffGame, Registered],
            Command::Neko => &[],
            Command::Quit => &[Admin],
        }
    }

    /// `(name, description)` of every top-level command, for the help listing
    pub fn catalogue() -> Vec<(String, String)> {
        CommandLine::command()
            .get_subcommands()
            .map(|sub| {
                let about = sub.get_about().map(|a| a.to_string()).unwrap_or_default();
                (sub.get_name().to_string(), about)
            })
            .collect()
    }
}
