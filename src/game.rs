//! Game shell
//!
//! Owns the simulation and the audio collaborator, steps one tick per frame
//! and forwards events to audio. Rendering is requested separately so the
//! frame loop decides when to draw.

use crate::audio::AudioManager;
use crate::renderer::{Frame, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, LevelError, TickInput, tick};

pub struct Game {
    state: GameState,
    audio: AudioManager,
    blink: bool,
    show_controls: bool,
}

impl Game {
    pub fn new(settings: &Settings, audio: AudioManager) -> Result<Self, LevelError> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Starting game with seed {}", seed);
        Ok(Self::with_state(GameState::new(seed)?, settings, audio))
    }

    pub fn with_state(state: GameState, settings: &Settings, audio: AudioManager) -> Self {
        Self {
            state,
            audio,
            blink: settings.effective_blink(),
            show_controls: settings.show_controls,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Run one tick and play the sounds it triggered
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        tick(&mut self.state, input);
        let events = self.state.drain_events();
        for event in &events {
            log::debug!("{:?}", event);
        }
        self.audio.play_events(&events);
        events
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame::capture(&self.state, self.blink, self.show_controls)
    }

    /// Draw the current frame; failures are logged, not fatal
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        if let Err(e) = renderer.render(&self.frame()) {
            log::warn!("Render failed: {}", e);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.state.is_session_ended()
    }
}
