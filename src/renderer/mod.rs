//! Rendering module
//!
//! The game hands each renderer a [`Frame`]: a read-only snapshot of what is
//! on screen this tick. Renderers never see the simulation state directly.

pub mod terminal;

use std::io;

use crate::consts::SCREEN_WIDTH;
use crate::sim::{Coin, Enemy, Flag, GamePhase, GameState, Platform, Player};

pub use terminal::TerminalRenderer;

/// Values shown in the heads-up display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub lives: u32,
    pub score: u64,
    pub coins: u32,
    pub level: u32,
    pub final_level: u32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub camera_x: f32,
    pub phase: GamePhase,
    pub hud: Hud,
    pub platforms: &'a [Platform],
    pub coins: Vec<&'a Coin>,
    pub enemies: Vec<&'a Enemy>,
    pub flag: Option<&'a Flag>,
    pub player: &'a Player,
    /// False while the invincibility flash hides the player
    pub player_visible: bool,
    pub show_controls: bool,
}

/// Whether something `width` wide at world `x` is on screen
pub fn is_visible(x: f32, width: f32, camera_x: f32) -> bool {
    let screen_x = x - camera_x;
    -width < screen_x && screen_x < SCREEN_WIDTH
}

impl<'a> Frame<'a> {
    /// Snapshot the state as seen through its camera
    pub fn capture(state: &'a GameState, blink: bool, show_controls: bool) -> Self {
        let camera_x = state.camera_x;
        let level = &state.level;
        let player = &state.player;

        Self {
            camera_x,
            phase: state.phase,
            hud: Hud {
                lives: player.lives,
                score: player.score,
                coins: player.coins,
                level: state.current_level,
                final_level: state.final_level(),
            },
            platforms: &level.platforms,
            coins: level
                .coins
                .iter()
                .filter(|c| !c.collected && is_visible(c.pos.x, c.size.x, camera_x))
                .collect(),
            enemies: level
                .enemies
                .iter()
                .filter(|e| is_visible(e.pos.x, e.size.x, camera_x))
                .collect(),
            flag: level
                .flag
                .as_ref()
                .filter(|f| is_visible(f.pos.x, f.size.x, camera_x)),
            player,
            player_visible: !(blink && player.is_blink_hidden()),
            show_controls,
        }
    }

    /// Overlay text for the current phase, title first
    pub fn overlay_lines(&self) -> Vec<String> {
        match self.phase {
            GamePhase::Playing => Vec::new(),
            GamePhase::Menu => vec![
                "SUPER PLATFORMER".to_string(),
                "Press ENTER to Start".to_string(),
                "Controls: Arrow Keys/WASD to Move, Space to Jump".to_string(),
                "Press ESC to Quit".to_string(),
            ],
            GamePhase::LevelComplete => {
                let next = if self.hud.level < self.hud.final_level {
                    format!("Get ready for Level {}!", self.hud.level + 1)
                } else {
                    "Final level completed!".to_string()
                };
                vec!["LEVEL COMPLETE!".to_string(), next]
            }
            GamePhase::GameOver => vec![
                "GAME OVER".to_string(),
                format!("Final Score: {}", self.hud.score),
                "Press ENTER to Play Again".to_string(),
            ],
            GamePhase::GameComplete => vec![
                "YOU WIN!".to_string(),
                "Congratulations! You completed all levels!".to_string(),
                format!("Final Score: {}", self.hud.score),
                format!("Coins Collected: {}", self.hud.coins),
                "Press ENTER to Play Again".to_string(),
            ],
        }
    }
}

/// A presentation backend
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()>;
}
