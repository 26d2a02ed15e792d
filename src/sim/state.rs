//! Game state and core simulation types
//!
//! The controller state plus the entities the player interacts with. The
//! player itself lives in `player.rs`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Rect, rests_on};
use super::level::{Level, LevelCatalog, LevelError};
use super::player::Player;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Menu,
    /// Active gameplay
    Playing,
    /// Flag reached, counting down to the next level
    LevelComplete,
    /// Out of lives
    GameOver,
    /// Final level cleared
    GameComplete,
}

/// Which way an entity is looking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Visual style of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformStyle {
    /// The floor spanning the whole level
    Ground,
    /// A floating ledge
    #[default]
    Ledge,
}

/// A static platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub style: PlatformStyle,
}

impl Platform {
    pub fn new(rect: Rect, style: PlatformStyle) -> Self {
        Self { rect, style }
    }
}

impl Bounds for Platform {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel_x: f32,
    pub size: Vec2,
    /// Patrol origin
    pub start_x: f32,
    /// Maximum displacement from `start_x` before turning around
    pub patrol_range: f32,
    /// Walk animation counter (0..ENEMY_ANIMATION_PERIOD)
    pub animation: u32,
}

impl Enemy {
    pub fn new(pos: Vec2, patrol_range: f32) -> Self {
        Self {
            pos,
            vel_x: -ENEMY_SPEED,
            size: ENEMY_SIZE,
            start_x: pos.x,
            patrol_range,
            animation: 0,
        }
    }

    /// Advance the patrol by one tick
    ///
    /// Turns around at the patrol bounds, or when there is no platform under
    /// its feet. Only one reversal happens per tick.
    pub fn update(&mut self, platforms: &[Platform]) {
        self.pos.x += self.vel_x;
        self.animation = (self.animation + 1) % ENEMY_ANIMATION_PERIOD;

        let displacement = self.pos.x - self.start_x;
        let out_of_range = displacement < -self.patrol_range || displacement > self.patrol_range;

        if out_of_range || !self.is_supported(platforms) {
            self.vel_x = -self.vel_x;
        }
    }

    /// True if the enemy's feet are on any platform
    pub fn is_supported(&self, platforms: &[Platform]) -> bool {
        platforms
            .iter()
            .any(|platform| rests_on(self, platform, ENEMY_EDGE_BAND))
    }

    pub fn facing(&self) -> Facing {
        if self.vel_x < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

impl Bounds for Enemy {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub size: Vec2,
    /// Bob/spin phase (radians-ish, grows forever)
    pub phase: f32,
    pub collected: bool,
}

impl Coin {
    pub fn new(pos: Vec2, phase: f32) -> Self {
        Self {
            pos,
            size: COIN_SIZE,
            phase,
            collected: false,
        }
    }

    pub fn update(&mut self) {
        self.phase += COIN_PHASE_STEP;
    }

    /// Vertical bob offset for rendering
    pub fn bob_offset(&self) -> f32 {
        self.phase.sin() * 5.0
    }
}

impl Bounds for Coin {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// The level exit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    pub pos: Vec2,
    pub size: Vec2,
    pub wave: f32,
}

impl Flag {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: FLAG_SIZE,
            wave: 0.0,
        }
    }

    pub fn update(&mut self) {
        self.wave += FLAG_WAVE_STEP;
    }
}

impl Bounds for Flag {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Gameplay events produced during a tick
///
/// Drained by whoever drives the simulation (sound, logging, HUD effects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    CoinCollected { total: u32 },
    EnemyStomped,
    PlayerHit { lives_left: u32 },
    PlayerFell { lives_left: u32 },
    LevelCompleted { level: u32 },
    LevelStarted { level: u32 },
    GameOver { score: u64 },
    GameCompleted { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG for per-level randomness (coin phases)
    rng: Pcg32,
    /// Validated level data
    catalog: LevelCatalog,
    /// Current phase
    pub phase: GamePhase,
    /// Current level index (1-based)
    pub current_level: u32,
    /// Live entities of the current level
    pub level: Level,
    pub player: Player,
    /// Horizontal camera offset in world pixels
    pub camera_x: f32,
    /// Ticks left before advancing from LevelComplete
    pub level_complete_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    session_ended: bool,
}

impl GameState {
    /// Create a new game on the standard levels, sitting in the menu
    pub fn new(seed: u64) -> Result<Self, LevelError> {
        Ok(Self::with_catalog(seed, LevelCatalog::standard()?))
    }

    /// Create a new game on a custom, already validated catalog
    pub fn with_catalog(seed: u64, catalog: LevelCatalog) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = catalog.instantiate(FIRST_LEVEL, &mut rng).unwrap_or_default();
        Self {
            seed,
            rng,
            catalog,
            phase: GamePhase::Menu,
            current_level: FIRST_LEVEL,
            level,
            player: Player::new(),
            camera_x: 0.0,
            level_complete_ticks: 0,
            time_ticks: 0,
            events: Vec::new(),
            session_ended: false,
        }
    }

    /// Index of the last level in the catalog
    pub fn final_level(&self) -> u32 {
        self.catalog.final_level()
    }

    /// Rebuild the current level from the catalog with fresh entities
    pub fn setup_level(&mut self) {
        match self.catalog.instantiate(self.current_level, &mut self.rng) {
            Some(level) => {
                log::info!(
                    "Level {} ready: {} platforms, {} enemies, {} coins",
                    self.current_level,
                    level.platforms.len(),
                    level.enemies.len(),
                    level.coins.len()
                );
                self.level = level;
            }
            None => log::error!("Level {} is not in the catalog", self.current_level),
        }
    }

    /// Largest allowed camera offset for the current level
    pub fn max_camera_x(&self) -> f32 {
        (self.level.width - SCREEN_WIDTH).max(0.0)
    }

    /// Ease the camera toward the player and clamp it to the level
    pub fn update_camera(&mut self) {
        let target = self.player.pos.x - SCREEN_WIDTH / 2.0;
        self.camera_x += (target - self.camera_x) * CAMERA_SMOOTHING;
        self.camera_x = self.camera_x.clamp(0.0, self.max_camera_x());
    }

    /// Respawn the player and rebuild the current level; stats are kept
    pub fn restart_level(&mut self) {
        self.player.respawn();
        self.setup_level();
        self.camera_x = 0.0;
    }

    /// Start over from the first level with a brand-new player
    pub fn reset_run(&mut self) {
        self.player = Player::new();
        self.current_level = FIRST_LEVEL;
        self.setup_level();
        self.camera_x = 0.0;
        self.level_complete_ticks = 0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::LevelStarted {
            level: self.current_level,
        });
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ask the session to stop after this tick
    pub fn end_session(&mut self) {
        self.session_ended = true;
    }

    pub fn is_session_ended(&self) -> bool {
        self.session_ended
    }
}
