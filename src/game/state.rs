//! Main game state structure

use crate::core::{Card, ChannelRef, GuildRef, Player, PlayerName, UserHandle, UserId};
use crate::game::{Phase, SeatView, TableView};
use crate::{ItoError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rustc_hash::FxHashMap;

/// Life restored at every reset unless configured otherwise
pub const DEFAULT_LIFE: u8 = 3;

/// Cards dealt to each player unless configured otherwise
pub const DEFAULT_LEVEL: u8 = 1;

/// Smallest accepted value for life and level
pub const SETTING_MIN: u8 = 1;

/// Largest accepted value for life and level
pub const SETTING_MAX: u8 = 3;

/// A round needs at least this many players
pub const MIN_PLAYERS: usize = 2;

pub const DEFAULT_THEME: &str = "Set a discussion theme";

/// The ito game engine
///
/// Owns the roster, the dealt deck and the shared counters, and enforces the
/// play rules. It is a plain in-memory state machine: no I/O, no logging and
/// no internal locking. Whoever owns it serializes access.
#[derive(Debug, Clone)]
pub struct GameEngine {
    /// Registered players in join order (Vec for stable ordering, small count)
    pub(crate) players: Vec<Player>,

    /// Every card dealt this round, mapped to whether it has been played
    pub(crate) deck: FxHashMap<Card, bool>,

    pub(crate) life: u8,

    /// Value `life` is restored to on reset
    pub(crate) configured_life: u8,

    pub(crate) level: u8,

    pub(crate) theme: String,

    pub(crate) ongoing: bool,

    channel: Option<ChannelRef>,

    guild: Option<GuildRef>,

    /// Random source for dealing
    pub(crate) rng: ChaCha12Rng,
}

impl Default for GameEngine {
    fn default() -> Self {
        GameEngine::new()
    }
}

impl GameEngine {
    /// Create an idle engine with an entropy-seeded random source
    pub fn new() -> Self {
        GameEngine::with_rng(ChaCha12Rng::from_entropy())
    }

    /// Create an idle engine whose deals are reproducible
    pub fn with_seed(seed: u64) -> Self {
        GameEngine::with_rng(ChaCha12Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha12Rng) -> Self {
        GameEngine {
            players: Vec::new(),
            deck: FxHashMap::default(),
            life: DEFAULT_LIFE,
            configured_life: DEFAULT_LIFE,
            level: DEFAULT_LEVEL,
            theme: DEFAULT_THEME.to_string(),
            ongoing: false,
            channel: None,
            guild: None,
            rng,
        }
    }

    /// Reseed the random source used for dealing
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }

    // ----------
    // Roster
    // ----------

    pub fn register_player(&mut self, user: UserHandle) -> Result<()> {
        self.require_phase(Phase::Idle)?;
        if self.is_registered(user.id) {
            return Err(ItoError::AlreadyRegistered(user.id));
        }
        self.players.push(Player::new(user));
        Ok(())
    }

    pub fn remove_player(&mut self, id: UserId) -> Result<Player> {
        self.require_phase(Phase::Idle)?;
        let idx = self.player_idx(id).ok_or(ItoError::NotRegistered(id))?;
        Ok(self.players.remove(idx))
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: UserId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id() == id)
            .ok_or(ItoError::NotRegistered(id))
    }

    pub(crate) fn player_idx(&self, id: UserId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    pub fn is_registered(&self, id: UserId) -> bool {
        self.player_idx(id).is_some()
    }

    pub fn player_names(&self) -> Vec<&PlayerName> {
        self.players.iter().map(|p| p.name()).collect()
    }

    // ----------
    // Settings
    // ----------

    /// Set the life for this and every following round
    pub fn set_life(&mut self, life: i64) -> Result<()> {
        self.require_phase(Phase::Idle)?;
        let life = check_setting("life", life)?;
        self.life = life;
        self.configured_life = life;
        Ok(())
    }

    /// Set how many cards each player receives per round
    pub fn set_level(&mut self, level: i64) -> Result<()> {
        self.require_phase(Phase::Idle)?;
        self.level = check_setting("level", level)?;
        Ok(())
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) -> Result<()> {
        self.require_phase(Phase::Idle)?;
        self.theme = theme.into();
        Ok(())
    }

    pub fn set_channel(&mut self, channel: ChannelRef) {
        self.channel = Some(channel);
    }

    pub fn set_guild(&mut self, guild: GuildRef) {
        self.guild = Some(guild);
    }

    pub fn life(&self) -> u8 {
        self.life
    }

    pub fn configured_life(&self) -> u8 {
        self.configured_life
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn channel(&self) -> Option<&ChannelRef> {
        self.channel.as_ref()
    }

    pub fn guild(&self) -> Option<&GuildRef> {
        self.guild.as_ref()
    }

    // ----------
    // Round state
    // ----------

    pub fn phase(&self) -> Phase {
        if self.ongoing {
            Phase::Ongoing
        } else {
            Phase::Idle
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.ongoing
    }

    pub fn deck(&self) -> &FxHashMap<Card, bool> {
        &self.deck
    }

    /// Cards dealt this round, lowest first
    pub fn dealt_cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.deck.keys().copied().collect();
        cards.sort_unstable();
        cards
    }

    pub fn is_game_over(&self) -> bool {
        self.life == 0
    }

    /// True when a deal happened and every dealt card has been played
    pub fn is_cleared(&self) -> bool {
        !self.deck.is_empty() && self.deck.values().all(|&played| played)
    }

    pub(crate) fn mark_played(&mut self, card: Card) {
        self.deck.insert(card, true);
    }

    /// End the current round: restore life, drop the deck and every hand
    ///
    /// Roster, theme, level and channel binding are kept.
    pub fn reset_round(&mut self) {
        self.life = self.configured_life;
        self.deck.clear();
        self.ongoing = false;
        for player in &mut self.players {
            player.reset_hand();
        }
    }

    /// Snapshot of what the table looks like right now
    pub fn table(&self) -> TableView {
        TableView {
            phase: self.phase(),
            life: self.life,
            level: self.level,
            theme: self.theme.clone(),
            seats: self
                .players
                .iter()
                .map(|p| SeatView {
                    id: p.id(),
                    name: p.name().clone(),
                    open: p.hand.render_open(),
                    closed: p.hand.render_closed(),
                })
                .collect(),
        }
    }

    pub(crate) fn require_phase(&self, required: Phase) -> Result<()> {
        let phase = self.phase();
        if phase == required {
            Ok(())
        } else {
            Err(ItoError::WrongPhase(phase))
        }
    }
}

fn check_setting(setting: &'static str, value: i64) -> Result<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| (SETTING_MIN..=SETTING_MAX).contains(v))
        .ok_or(ItoError::OutOfRange {
            setting,
            value,
            min: SETTING_MIN,
            max: SETTING_MAX,
        })
}
