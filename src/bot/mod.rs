//! Chat command layer
//!
//! Translates chat commands into engine calls and renders the results. The
//! engine sits behind a single lock so commands arriving from concurrent
//! events are applied one at a time; each command holds the lock from its
//! first guard to its last rendered message.

pub mod command;
pub mod console;
pub mod guard;
mod handlers;
pub mod render;

pub use command::{Command, Setting};
pub use console::{run_console, Console, ConsoleMessenger, Messenger, OutputFormat};
pub use guard::{check_all, Guard, Rejection};
pub use render::{Colour, Delivery, Destination, Embed, Field, HandView};

use crate::core::{ChannelRef, GuildRef, UserHandle, UserId};
use crate::game::GameEngine;
use tokio::sync::{Mutex, MutexGuard};

/// Who sent a command, and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub author: UserHandle,
    pub channel: ChannelRef,
    pub guild: Option<GuildRef>,
}

/// What the front end should do after delivering a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Control {
    #[default]
    Continue,
    Shutdown,
}

/// Messages produced by one command
#[derive(Debug, Clone, Default)]
pub struct Reply {
    pub deliveries: Vec<Delivery>,
    pub control: Control,
}

impl Reply {
    /// A single message to the invoking channel
    pub fn to_channel(invocation: &Invocation, embed: Embed) -> Self {
        Reply {
            deliveries: vec![Delivery::channel(&invocation.channel, embed)],
            control: Control::Continue,
        }
    }

    pub fn shared(&self) -> impl Iterator<Item = &Delivery> {
        self.deliveries.iter().filter(|d| !d.is_direct())
    }

    pub fn direct(&self) -> impl Iterator<Item = &Delivery> {
        self.deliveries.iter().filter(|d| d.is_direct())
    }
}

/// The bot: one game engine plus the admin allowed to shut it down
pub struct Bot {
    engine: Mutex<GameEngine>,
    admin: Option<UserId>,
}

impl Bot {
    pub fn new(engine: GameEngine) -> Self {
        Bot {
            engine: Mutex::new(engine),
            admin: None,
        }
    }

    pub fn with_admin(mut self, admin: UserId) -> Self {
        self.admin = Some(admin);
        self
    }

    /// Lock the engine for inspection
    pub async fn engine(&self) -> MutexGuard<'_, GameEngine> {
        self.engine.lock().await
    }

    /// Parse and run one chat message
    pub async fn handle(&self, invocation: &Invocation, line: &str) -> Reply {
        match Command::parse_line(line) {
            Ok(command) => self.dispatch(invocation, command).await,
            Err(err) => {
                log::debug!("unparsed message from {}: {line:?}", invocation.author);
                Reply::to_channel(
                    invocation,
                    Embed::new("Unknown command", err.to_string(), Colour::Gold),
                )
            }
        }
    }

    /// Run the guard chain, then the command
    pub async fn dispatch(&self, invocation: &Invocation, command: Command) -> Reply {
        let name = command.name();
        log::debug!("{name} command from {}", invocation.author);

        let mut engine = self.engine.lock().await;
        if let Err(rejection) = check_all(command.guards(), &mut engine, invocation, self.admin) {
            log::debug!("{name} command rejected: {rejection:?}");
            return Reply::to_channel(invocation, render::rejection(name, &rejection));
        }

        match handlers::run(&mut engine, invocation, command) {
            Ok(reply) => reply,
            Err(err) => {
                log::debug!("{name} command failed: {err}");
                Reply::to_channel(invocation, render::error(name, &err))
            }
        }
    }
}
