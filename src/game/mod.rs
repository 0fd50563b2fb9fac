//! Game engine: round state, dealing and play resolution

pub mod deal;
pub mod phase;
pub mod play;
pub mod state;
pub mod view;

pub use phase::Phase;
pub use play::{Outcome, Penalty, PlayReport};
pub use state::{
    GameEngine, DEFAULT_LEVEL, DEFAULT_LIFE, DEFAULT_THEME, MIN_PLAYERS, SETTING_MAX, SETTING_MIN,
};
pub use view::{SeatView, TableView};
