//! Bot configuration
//!
//! Read from an optional JSON file, then overridden field by field by
//! command-line flags.

use crate::game::GameEngine;
use crate::{ItoError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CHANNEL: &str = "general";
pub const DEFAULT_GUILD: &str = "console";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotConfig {
    /// User name allowed to shut the bot down
    pub admin: Option<String>,
    /// Channel the game is bound to at startup
    pub channel: Option<String>,
    pub guild: Option<String>,
    pub life: Option<i64>,
    pub level: Option<i64>,
    pub theme: Option<String>,
    /// Seed for reproducible deals
    pub seed: Option<u64>,
}

impl BotConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ItoError::Config(format!("cannot read {}: {e}", path.display())))?;
        BotConfig::from_json(&json)
    }

    /// Fields set in `overrides` replace ours
    pub fn merge(self, overrides: BotConfig) -> Self {
        BotConfig {
            admin: overrides.admin.or(self.admin),
            channel: overrides.channel.or(self.channel),
            guild: overrides.guild.or(self.guild),
            life: overrides.life.or(self.life),
            level: overrides.level.or(self.level),
            theme: overrides.theme.or(self.theme),
            seed: overrides.seed.or(self.seed),
        }
    }

    pub fn guild_name(&self) -> &str {
        self.guild.as_deref().unwrap_or(DEFAULT_GUILD)
    }

    pub fn channel_name(&self) -> &str {
        self.channel.as_deref().unwrap_or(DEFAULT_CHANNEL)
    }

    /// An idle engine with these settings applied
    ///
    /// Life and level go through the engine's own range checks.
    pub fn build_engine(&self) -> Result<GameEngine> {
        let mut engine = match self.seed {
            Some(seed) => GameEngine::with_seed(seed),
            None => GameEngine::new(),
        };
        if let Some(life) = self.life {
            engine.set_life(life)?;
        }
        if let Some(level) = self.level {
            engine.set_level(level)?;
        }
        if let Some(theme) = &self.theme {
            engine.set_theme(theme.as_str())?;
        }
        Ok(engine)
    }
}
