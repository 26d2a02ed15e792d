//! Keyboard input
//!
//! Terminals report key presses (and, with keyboard enhancement, repeats and
//! releases) rather than key state. [`KeyTracker`] turns that event stream
//! into held keys: a key counts as held while its last press or repeat is
//! within [`HOLD_WINDOW`] frames, or until its release arrives.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{Intent, TickInput};

/// Frames a key stays held after its last press/repeat without a release
pub const HOLD_WINDOW: u64 = 8;

/// A game action a key can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Jump,
    Confirm,
    Cancel,
    Restart,
}

/// Key binding table
pub fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::Right),
        KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Action::Jump)
        }
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Cancel),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
        _ => None,
    }
}

/// Tracks held movement keys and pending one-shot presses
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Held action -> frame it was last seen
    held: HashMap<Action, u64>,
    /// One-shot intents pressed since the last sample
    pressed: Vec<Intent>,
    frame: u64,
    /// Ctrl+C seen
    interrupted: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one terminal event
    pub fn handle_event(&mut self, event: &Event) {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return;
        };

        if *kind == KeyEventKind::Press
            && *code == KeyCode::Char('c')
            && modifiers.contains(KeyModifiers::CONTROL)
        {
            self.interrupted = true;
            return;
        }

        let Some(action) = action_for(*code) else {
            return;
        };

        match kind {
            KeyEventKind::Press => {
                self.held.insert(action, self.frame);
                let intent = match action {
                    Action::Jump => Some(Intent::Jump),
                    Action::Confirm => Some(Intent::Confirm),
                    Action::Cancel => Some(Intent::Cancel),
                    Action::Restart => Some(Intent::RestartLevel),
                    Action::Left | Action::Right => None,
                };
                self.pressed.extend(intent);
            }
            KeyEventKind::Repeat => {
                self.held.insert(action, self.frame);
            }
            KeyEventKind::Release => {
                self.held.remove(&action);
            }
        }
    }

    fn is_held(&self, action: Action) -> bool {
        self.held
            .get(&action)
            .is_some_and(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    /// Whether the user asked to kill the program outright
    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Build this frame's input and advance to the next frame
    ///
    /// Holding both directions cancels out. Jumping is edge-triggered: only a
    /// fresh press requests a jump, holding the key does not.
    pub fn sample(&mut self) -> TickInput {
        let mut intents = std::mem::take(&mut self.pressed);

        let left = self.is_held(Action::Left);
        let right = self.is_held(Action::Right);
        intents.push(match (left, right) {
            (true, false) => Intent::MoveLeft,
            (false, true) => Intent::MoveRight,
            _ => Intent::StopMove,
        });

        self.frame += 1;
        self.held
            .retain(|_, last| self.frame.saturating_sub(*last) <= HOLD_WINDOW);

        TickInput::from_intents(&intents)
    }
}
