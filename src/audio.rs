//! Audio system
//!
//! Sound effects are short tones. Whether anything can actually make a sound
//! is decided once at startup; callers just fire effects and forget them.

use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Coin picked up
    Coin,
    /// Enemy stomped
    Stomp,
    /// Last life lost
    GameOver,
}

/// A single square-ish beep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl SoundEffect {
    pub fn tone(self) -> Tone {
        let (frequency_hz, duration_ms) = match self {
            SoundEffect::Jump => (523, 100),
            SoundEffect::Coin => (659, 150),
            SoundEffect::Stomp => (220, 200),
            SoundEffect::GameOver => (110, 500),
        };
        Tone {
            frequency_hz,
            duration_ms,
        }
    }

    /// Effect triggered by a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::CoinCollected { .. } => Some(SoundEffect::Coin),
            GameEvent::EnemyStomped => Some(SoundEffect::Stomp),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}

/// Something that can play tones
pub trait AudioBackend {
    fn name(&self) -> &'static str;
    fn play_tone(&mut self, tone: Tone, volume: f32) -> io::Result<()>;
}

/// Backend used when no sound output is available
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn name(&self) -> &'static str {
        "silent"
    }

    fn play_tone(&mut self, _tone: Tone, _volume: f32) -> io::Result<()> {
        Ok(())
    }
}

/// Rings the terminal bell
///
/// The bell has no pitch or level, so a tone's duration is the only part
/// that survives: a new bell is skipped while the previous tone would still
/// be sounding, so a stomp and a coin in one frame do not ring twice.
pub struct TerminalBell<W: Write> {
    out: W,
    busy_until: Option<Instant>,
}

impl TerminalBell<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            busy_until: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioBackend for TerminalBell<W> {
    fn name(&self) -> &'static str {
        "terminal bell"
    }

    fn play_tone(&mut self, tone: Tone, _volume: f32) -> io::Result<()> {
        let now = Instant::now();
        if self.busy_until.is_some_and(|until| now < until) {
            return Ok(());
        }
        self.busy_until = Some(now + Duration::from_millis(u64::from(tone.duration_ms)));

        self.out.write_all(b"\x07")?;
        self.out.flush()
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>, master_volume: f32) -> Self {
        Self {
            backend,
            master_volume: master_volume.clamp(0.0, 1.0),
            muted: false,
        }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentBackend), 0.0)
    }

    /// Pick a backend for this process
    pub fn detect(settings: &Settings) -> Self {
        let manager = if settings.effective_sound() && io::stderr().is_terminal() {
            Self::new(Box::new(TerminalBell::stderr()), settings.master_volume)
        } else {
            Self::silent()
        };
        log::info!("Audio backend: {}", manager.backend_name());
        manager
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        if let Err(e) = self.backend.play_tone(effect.tone(), vol) {
            log::warn!("Failed to play {:?}: {}", effect, e);
        }
    }

    /// Play whatever the given events call for
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
