//! Super Platformer - a small side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, levels, game state)
//! - `game`: The simulation wired to its audio and render collaborators
//! - `renderer`: Render frame snapshot and the terminal renderer
//! - `input`: Key tracking and per-tick intents
//! - `audio`: Capability-checked sound effects
//! - `settings`: User configuration

pub mod audio;
pub mod game;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Visible play area in world pixels
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Simulation rate (one tick per frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Downward acceleration added to vertical velocity every tick
    pub const GRAVITY: f32 = 0.8;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_STRENGTH: f32 = -15.0;
    /// Fraction of the jump impulse given back after a stomp
    pub const STOMP_BOUNCE: f32 = 0.7;
    /// Horizontal speed while a direction is held
    pub const MOVE_SPEED: f32 = 6.0;

    /// Player defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(30.0, 50.0);
    pub const SPAWN_POINT: Vec2 = Vec2::new(100.0, 300.0);
    pub const STARTING_LIVES: u32 = 3;
    /// 1.5 seconds of invincibility after a hit
    pub const INVINCIBILITY_TICKS: u32 = 90;
    pub const WALK_CYCLE_PERIOD: u32 = 20;

    /// Scoring
    pub const COIN_SCORE: u64 = 200;
    pub const STOMP_SCORE: u64 = 100;

    /// Enemy defaults
    pub const ENEMY_SIZE: Vec2 = Vec2::new(30.0, 30.0);
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_ANIMATION_PERIOD: u32 = 30;
    /// How far below a platform top an enemy's feet may sit and still count as standing on it
    pub const ENEMY_EDGE_BAND: f32 = 10.0;

    /// Pickups and scenery
    pub const COIN_SIZE: Vec2 = Vec2::new(20.0, 20.0);
    pub const COIN_PHASE_STEP: f32 = 0.2;
    pub const COIN_PHASE_MAX: f32 = 10.0;
    pub const FLAG_SIZE: Vec2 = Vec2::new(30.0, 60.0);
    pub const FLAG_WAVE_STEP: f32 = 0.1;

    /// Camera follow factor per tick
    pub const CAMERA_SMOOTHING: f32 = 0.1;

    /// 3 seconds between reaching the flag and the next level
    pub const LEVEL_COMPLETE_TICKS: u32 = 180;
    pub const FIRST_LEVEL: u32 = 1;
    pub const FINAL_LEVEL: u32 = 3;
}
