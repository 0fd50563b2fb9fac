//! ito - a chat bot for the cooperative card game "ito"
//!
//! Players join, receive secret numbered cards and try to put every card on
//! the table in ascending order without telling each other their numbers.
//! The game engine is a plain state machine; the `bot` module turns chat
//! commands into engine calls and renders the results.

pub mod bot;
pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod simulate;

pub use error::{ItoError, Result};
