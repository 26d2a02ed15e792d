//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (level data order)
//! - No rendering, audio or terminal dependencies

pub mod collision;
pub mod level;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Bounds, Rect, overlaps, rests_on};
pub use level::{Level, LevelBlueprint, LevelCatalog, LevelError};
pub use player::{Player, PlayerOutcome};
pub use state::{
    Coin, Enemy, Facing, Flag, GameEvent, GamePhase, GameState, Platform, PlatformStyle,
};
pub use tick::{Horizontal, Intent, TickInput, tick};
