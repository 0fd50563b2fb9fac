//! Line-oriented console front end
//!
//! Stands in for the chat platform. Each input line is one message:
//!
//! ```text
//! [#channel ]name: command
//! ```
//!
//! Names and channel names are mapped to stable ids in first-seen order.
//! Blank lines and lines starting with `;` are skipped.

use crate::bot::{Bot, Control, Delivery, Invocation};
use crate::core::{ChannelId, ChannelRef, GuildRef, UserHandle, UserId};
use crate::{ItoError, Result};
use clap::ValueEnum;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Output format for delivered messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Something that can deliver rendered messages to users
pub trait Messenger {
    fn deliver(&mut self, delivery: &Delivery) -> Result<()>;
}

/// Writes deliveries to any `Write`, typically stdout
pub struct ConsoleMessenger<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> ConsoleMessenger<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        ConsoleMessenger { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Messenger for ConsoleMessenger<W> {
    fn deliver(&mut self, delivery: &Delivery) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "[{}]", delivery.destination)?;
                write!(self.out, "{}", delivery.embed)?;
                writeln!(self.out)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, delivery)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Maps console names to chat identities
#[derive(Debug, Clone)]
pub struct Console {
    guild: GuildRef,
    default_channel: String,
    users: FxHashMap<String, UserId>,
    channels: FxHashMap<String, ChannelId>,
}

impl Console {
    pub fn new(guild: GuildRef, default_channel: impl Into<String>) -> Self {
        Console {
            guild,
            default_channel: default_channel.into(),
            users: FxHashMap::default(),
            channels: FxHashMap::default(),
        }
    }

    /// The identity for `name`, allocating an id on first sight
    pub fn user(&mut self, name: &str) -> UserHandle {
        let next = UserId::new(self.users.len() as u64 + 1);
        let id = *self.users.entry(name.to_string()).or_insert(next);
        UserHandle::new(id, name)
    }

    /// The channel called `name`, allocating an id on first sight
    pub fn channel(&mut self, name: &str) -> ChannelRef {
        let next = ChannelId::new(self.channels.len() as u64 + 1);
        let id = *self.channels.entry(name.to_string()).or_insert(next);
        ChannelRef::new(id, name)
    }

    pub fn default_channel(&mut self) -> ChannelRef {
        let name = self.default_channel.clone();
        self.channel(&name)
    }

    pub fn guild(&self) -> &GuildRef {
        &self.guild
    }

    /// Split an input line into who said it, where, and the message text
    ///
    /// Returns `None` for lines that carry no message.
    pub fn parse_line(&mut self, line: &str) -> Option<Result<(Invocation, String)>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            return None;
        }

        let (channel, rest) = match line.strip_prefix('#') {
            Some(tagged) => match tagged.split_once(char::is_whitespace) {
                Some((channel, rest)) => (self.channel(channel), rest.trim_start()),
                None => return Some(Err(ItoError::InvalidInput(format!("no message after #{tagged}")))),
            },
            None => (self.default_channel(), line),
        };

        let Some((name, text)) = rest.split_once(':') else {
            return Some(Err(ItoError::InvalidInput(format!(
                "expected `name: command`, got {line:?}"
            ))));
        };
        let name = name.trim();
        if name.is_empty() {
            return Some(Err(ItoError::InvalidInput(format!("missing user name in {line:?}"))));
        }

        let invocation = Invocation {
            author: self.user(name),
            channel,
            guild: Some(self.guild.clone()),
        };
        Some(Ok((invocation, text.trim().to_string())))
    }
}

/// Feed every input line to the bot and deliver its replies
///
/// Stops at end of input or when the bot asks to shut down. Returns the
/// number of messages handled.
pub async fn run_console<R, M>(bot: &Bot, console: &mut Console, input: R, messenger: &mut M) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    M: Messenger,
{
    let mut lines = input.lines();
    let mut handled = 0;
    while let Some(line) = lines.next_line().await? {
        let (invocation, text) = match console.parse_line(&line) {
            None => continue,
            Some(Ok(parsed)) => parsed,
            Some(Err(err)) => {
                log::warn!("skipping input line: {err}");
                continue;
            }
        };

        let reply = bot.handle(&invocation, &text).await;
        handled += 1;
        for delivery in &reply.deliveries {
            messenger.deliver(delivery)?;
        }
        if reply.control == Control::Shutdown {
            break;
        }
    }
    Ok(handled)
}
