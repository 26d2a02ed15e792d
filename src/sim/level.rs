//! Level catalog
//!
//! Levels are described by blueprints: plain placement data that is checked
//! once when the catalog is built. Instantiating a blueprint always produces
//! brand-new entities, so a restart never sees leftovers from a previous
//! attempt.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::state::{Coin, Enemy, Flag, Platform, PlatformStyle};
use crate::consts::*;

/// Height of the floor platform
pub const GROUND_HEIGHT: f32 = 50.0;
/// Scrollable width of the regular levels
pub const STANDARD_LEVEL_WIDTH: f32 = 1600.0;
/// Scrollable width of the final level
pub const LONG_LEVEL_WIDTH: f32 = 2400.0;

/// Where an enemy starts and how far it patrols
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawn {
    pub pos: Vec2,
    pub patrol_range: f32,
}

/// Placement data for one level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelBlueprint {
    pub width: f32,
    pub platforms: Vec<(Rect, PlatformStyle)>,
    pub enemies: Vec<EnemySpawn>,
    pub coins: Vec<Vec2>,
    pub flag: Option<Vec2>,
}

impl LevelBlueprint {
    /// An empty level of the given width with its floor already in place
    pub fn with_ground(width: f32) -> Self {
        Self {
            width,
            platforms: vec![(
                Rect::new(0.0, SCREEN_HEIGHT - GROUND_HEIGHT, width, GROUND_HEIGHT),
                PlatformStyle::Ground,
            )],
            enemies: Vec::new(),
            coins: Vec::new(),
            flag: None,
        }
    }

    pub fn ledge(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.platforms.push((Rect::new(x, y, w, h), PlatformStyle::Ledge));
        self
    }

    pub fn enemy(mut self, x: f32, y: f32, patrol_range: f32) -> Self {
        self.enemies.push(EnemySpawn {
            pos: Vec2::new(x, y),
            patrol_range,
        });
        self
    }

    /// Lay out `count` coins left to right, cycling through `rows` heights
    ///
    /// Zero rows is treated as a single row.
    pub fn coin_pattern(
        mut self,
        count: u32,
        origin: Vec2,
        step_x: f32,
        rows: u32,
        step_y: f32,
    ) -> Self {
        let rows = rows.max(1);
        for i in 0..count {
            self.coins.push(Vec2::new(
                origin.x + i as f32 * step_x,
                origin.y + (i % rows) as f32 * step_y,
            ));
        }
        self
    }

    pub fn flag_at(mut self, x: f32, y: f32) -> Self {
        self.flag = Some(Vec2::new(x, y));
        self
    }

    /// Check the blueprint for data that would break the simulation
    pub fn validate(&self, level: u32) -> Result<(), LevelError> {
        if !self.width.is_finite() || self.width < SCREEN_WIDTH {
            return Err(LevelError::BadWidth {
                level,
                width: self.width,
            });
        }

        let has_ground = self.platforms.iter().any(|(rect, style)| {
            *style == PlatformStyle::Ground && rect.left() <= 0.0 && rect.right() >= self.width
        });
        if !has_ground {
            return Err(LevelError::MissingGround { level });
        }

        for (index, (rect, _)) in self.platforms.iter().enumerate() {
            check_rect(level, Entity::Platform, index, rect)?;
        }

        for (index, spawn) in self.enemies.iter().enumerate() {
            check_rect(level, Entity::Enemy, index, &Rect { pos: spawn.pos, size: ENEMY_SIZE })?;
            if !spawn.patrol_range.is_finite() || spawn.patrol_range < 0.0 {
                return Err(LevelError::BadPatrolRange {
                    level,
                    index,
                    range: spawn.patrol_range,
                });
            }
        }

        for (index, pos) in self.coins.iter().enumerate() {
            check_rect(level, Entity::Coin, index, &Rect { pos: *pos, size: COIN_SIZE })?;
        }

        if let Some(pos) = self.flag {
            let rect = Rect { pos, size: FLAG_SIZE };
            check_rect(level, Entity::Flag, 0, &rect)?;
            if rect.right() > self.width {
                return Err(LevelError::FlagOutOfBounds { level, x: pos.x });
            }
        }

        Ok(())
    }
}

fn check_rect(level: u32, entity: Entity, index: usize, rect: &Rect) -> Result<(), LevelError> {
    if !rect.is_finite() || rect.size.x <= 0.0 || rect.size.y <= 0.0 {
        return Err(LevelError::DegenerateEntity {
            level,
            entity,
            index,
        });
    }
    Ok(())
}

/// Kind of entity named in a `LevelError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Platform,
    Enemy,
    Coin,
    Flag,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Platform => "platform",
            Entity::Enemy => "enemy",
            Entity::Coin => "coin",
            Entity::Flag => "flag",
        };
        f.write_str(name)
    }
}

/// Malformed level data, reported when the catalog is built
#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    EmptyCatalog,
    BadWidth { level: u32, width: f32 },
    MissingGround { level: u32 },
    DegenerateEntity { level: u32, entity: Entity, index: usize },
    BadPatrolRange { level: u32, index: usize, range: f32 },
    FlagOutOfBounds { level: u32, x: f32 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::EmptyCatalog => write!(f, "level catalog has no levels"),
            LevelError::BadWidth { level, width } => {
                write!(f, "level {level}: width {width} is narrower than the screen")
            }
            LevelError::MissingGround { level } => {
                write!(f, "level {level}: no ground platform spans the level")
            }
            LevelError::DegenerateEntity {
                level,
                entity,
                index,
            } => write!(f, "level {level}: {entity} #{index} has an empty or non-finite rectangle"),
            LevelError::BadPatrolRange { level, index, range } => {
                write!(f, "level {level}: enemy #{index} has invalid patrol range {range}")
            }
            LevelError::FlagOutOfBounds { level, x } => {
                write!(f, "level {level}: flag at x={x} extends past the level end")
            }
        }
    }
}

impl std::error::Error for LevelError {}

/// A running level with live entities
#[derive(Debug, Clone, Default)]
pub struct Level {
    /// 1-based level index
    pub index: u32,
    /// Total scrollable width
    pub width: f32,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub flag: Option<Flag>,
}

/// Validated set of level blueprints, indexed from 1
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelBlueprint>,
}

impl LevelCatalog {
    /// Build a catalog, rejecting malformed data
    pub fn from_blueprints(levels: Vec<LevelBlueprint>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::EmptyCatalog);
        }
        for (i, blueprint) in levels.iter().enumerate() {
            blueprint.validate(i as u32 + 1)?;
        }
        Ok(Self { levels })
    }

    /// The three hand-authored levels
    pub fn standard() -> Result<Self, LevelError> {
        Self::from_blueprints(vec![level_one(), level_two(), level_three()])
    }

    /// Index of the last level
    pub fn final_level(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn blueprint(&self, index: u32) -> Option<&LevelBlueprint> {
        let slot = index.checked_sub(1)?;
        self.levels.get(slot as usize)
    }

    /// Create fresh entities for a level; `None` for an unknown index
    pub fn instantiate(&self, index: u32, rng: &mut Pcg32) -> Option<Level> {
        let blueprint = self.blueprint(index)?;
        Some(Level {
            index,
            width: blueprint.width,
            platforms: blueprint
                .platforms
                .iter()
                .map(|(rect, style)| Platform::new(*rect, *style))
                .collect(),
            enemies: blueprint
                .enemies
                .iter()
                .map(|spawn| Enemy::new(spawn.pos, spawn.patrol_range))
                .collect(),
            coins: blueprint
                .coins
                .iter()
                .map(|pos| Coin::new(*pos, rng.random_range(0.0..COIN_PHASE_MAX)))
                .collect(),
            flag: blueprint.flag.map(Flag::new),
        })
    }
}

/// Level 1 - basic platforming
fn level_one() -> LevelBlueprint {
    LevelBlueprint::with_ground(STANDARD_LEVEL_WIDTH)
        .ledge(200.0, 450.0, 100.0, 20.0)
        .ledge(400.0, 400.0, 100.0, 20.0)
        .ledge(600.0, 350.0, 100.0, 20.0)
        .ledge(300.0, 300.0, 100.0, 20.0)
        .ledge(500.0, 250.0, 100.0, 20.0)
        .enemy(300.0, 420.0, 80.0)
        .enemy(500.0, 370.0, 80.0)
        .coin_pattern(8, Vec2::new(250.0, 200.0), 80.0, 3, 50.0)
        .flag_at(900.0, 200.0)
}

/// Level 2 - more enemies, narrower ledges
fn level_two() -> LevelBlueprint {
    LevelBlueprint::with_ground(STANDARD_LEVEL_WIDTH)
        .ledge(150.0, 450.0, 80.0, 20.0)
        .ledge(300.0, 400.0, 80.0, 20.0)
        .ledge(450.0, 350.0, 80.0, 20.0)
        .ledge(250.0, 300.0, 80.0, 20.0)
        .ledge(400.0, 250.0, 80.0, 20.0)
        .ledge(550.0, 200.0, 80.0, 20.0)
        .ledge(700.0, 300.0, 80.0, 20.0)
        .enemy(200.0, 420.0, 100.0)
        .enemy(350.0, 370.0, 100.0)
        .enemy(500.0, 320.0, 100.0)
        .enemy(650.0, 270.0, 100.0)
        .coin_pattern(12, Vec2::new(200.0, 150.0), 70.0, 4, 60.0)
        .flag_at(1200.0, 150.0)
}

/// Level 3 - a long staircase of small ledges
fn level_three() -> LevelBlueprint {
    let mut blueprint = LevelBlueprint::with_ground(LONG_LEVEL_WIDTH);
    let ledges = [
        (100.0, 450.0),
        (200.0, 400.0),
        (300.0, 450.0),
        (400.0, 400.0),
        (500.0, 450.0),
        (600.0, 400.0),
        (700.0, 350.0),
        (800.0, 300.0),
        (900.0, 250.0),
        (1000.0, 200.0),
        (1100.0, 150.0),
    ];
    for (x, y) in ledges {
        blueprint = blueprint.ledge(x, y, 60.0, 20.0);
    }
    let enemies = [
        (150.0, 420.0),
        (250.0, 370.0),
        (350.0, 420.0),
        (450.0, 370.0),
        (550.0, 420.0),
        (650.0, 320.0),
        (750.0, 270.0),
        (850.0, 220.0),
        (950.0, 170.0),
    ];
    for (x, y) in enemies {
        blueprint = blueprint.enemy(x, y, 50.0);
    }
    blueprint
        .coin_pattern(20, Vec2::new(150.0, 100.0), 60.0, 5, 40.0)
        .flag_at(2000.0, 100.0)
}
