//! Per-frame simulation tick
//!
//! Applies the intents sampled for this frame, then advances whichever phase
//! the game is in.

use super::player::PlayerOutcome;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Horizontal movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizontal {
    Left,
    Right,
    #[default]
    Stop,
}

impl Horizontal {
    /// Velocity this intent maps to
    pub fn velocity(self) -> f32 {
        match self {
            Horizontal::Left => -MOVE_SPEED,
            Horizontal::Right => MOVE_SPEED,
            Horizontal::Stop => 0.0,
        }
    }
}

/// A discrete user intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    StopMove,
    Jump,
    Confirm,
    Cancel,
    RestartLevel,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub horizontal: Horizontal,
    pub jump: bool,
    /// Start / play again
    pub confirm: bool,
    /// Back to menu, or quit outside gameplay
    pub cancel: bool,
    pub restart_level: bool,
}

impl TickInput {
    /// Fold a batch of intents into one tick's input (later movement wins)
    pub fn from_intents(intents: &[Intent]) -> Self {
        let mut input = Self::default();
        for intent in intents {
            match intent {
                Intent::MoveLeft => input.horizontal = Horizontal::Left,
                Intent::MoveRight => input.horizontal = Horizontal::Right,
                Intent::StopMove => input.horizontal = Horizontal::Stop,
                Intent::Jump => input.jump = true,
                Intent::Confirm => input.confirm = true,
                Intent::Cancel => input.cancel = true,
                Intent::RestartLevel => input.restart_level = true,
            }
        }
        input
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_session_ended() {
        return;
    }

    apply_intents(state, input);
    if state.is_session_ended() {
        return;
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::Playing => tick_playing(state),
        GamePhase::LevelComplete => tick_level_complete(state),
        GamePhase::Menu | GamePhase::GameOver | GamePhase::GameComplete => {}
    }
}

fn apply_intents(state: &mut GameState, input: &TickInput) {
    if input.confirm {
        match state.phase {
            GamePhase::Menu => {
                log::info!("Starting level {}", state.current_level);
                state.phase = GamePhase::Playing;
            }
            GamePhase::GameOver | GamePhase::GameComplete => {
                log::info!("New run");
                state.reset_run();
            }
            _ => {}
        }
    }

    if input.cancel {
        if state.phase == GamePhase::Playing {
            state.phase = GamePhase::Menu;
        } else {
            log::info!("Session ended from {:?}", state.phase);
            state.end_session();
            return;
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    if input.jump && state.player.jump() {
        state.events.push(GameEvent::Jumped);
    }

    if input.restart_level {
        log::info!("Restarting level {}", state.current_level);
        state.restart_level();
    }

    state.player.move_x(input.horizontal.velocity());
}

fn tick_playing(state: &mut GameState) {
    state.update_camera();

    let outcome = state.player.update(&mut state.level, &mut state.events);

    for enemy in &mut state.level.enemies {
        enemy.update(&state.level.platforms);
    }
    for coin in &mut state.level.coins {
        coin.update();
    }
    if let Some(flag) = &mut state.level.flag {
        flag.update();
    }

    if outcome == Some(PlayerOutcome::LevelComplete) {
        log::info!(
            "Level {} complete, score {}",
            state.current_level,
            state.player.score
        );
        state.phase = GamePhase::LevelComplete;
        state.level_complete_ticks = LEVEL_COMPLETE_TICKS;
        state.events.push(GameEvent::LevelCompleted {
            level: state.current_level,
        });
    }

    if state.player.lives == 0 {
        log::info!("Game over, final score {}", state.player.score);
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.player.score,
        });
    }
}

fn tick_level_complete(state: &mut GameState) {
    state.level_complete_ticks = state.level_complete_ticks.saturating_sub(1);
    if state.level_complete_ticks > 0 {
        return;
    }

    state.current_level += 1;
    if state.current_level > state.final_level() {
        log::info!("All levels complete, final score {}", state.player.score);
        state.phase = GamePhase::GameComplete;
        state.events.push(GameEvent::GameCompleted {
            score: state.player.score,
        });
        return;
    }

    state.setup_level();
    state.player.respawn();
    state.camera_x = 0.0;
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::LevelStarted {
        level: state.current_level,
    });
}
