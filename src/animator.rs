use crate::synth::note::{KeyIndex, SEMITONE_RATIO};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct AnimatorConfig {
    /// Scroll speed in pixels per second for key 0 at full speed.
    pub base_rate: f64,
    /// Speed multiplier applied on every tick once the key is released.
    pub decay: f64,
    /// Below this the speed snaps to zero.
    pub stop_threshold: f64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            base_rate: 50.0,
            decay: 0.995,
            stop_threshold: 0.2,
        }
    }
}

/// Scrolls the background grid: full speed while a key is held, coasting to a
/// stop after release. Higher notes scroll faster, including while coasting.
#[derive(Debug, Clone)]
pub struct Animator {
    config: AnimatorConfig,
    position: f64,
    speed: f64,
    held: bool,
    /// The last key pressed, kept after release.
    note: Option<KeyIndex>,
    last_tick: Option<Instant>,
}

impl Animator {
    pub fn new(config: AnimatorConfig) -> Self {
        Self {
            config,
            position: 0.0,
            speed: 0.0,
            held: false,
            note: None,
            last_tick: None,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn note(&self) -> Option<KeyIndex> {
        self.note
    }

    pub fn hold(&mut self, key: KeyIndex) {
        self.held = true;
        self.note = Some(key);
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    /// Whether ticking would move anything. Hosts can stop scheduling ticks when false.
    pub fn is_active(&self) -> bool {
        self.held || self.speed > 0.0
    }

    pub fn tick(&mut self, now: Instant) {
        if self.held {
            self.speed = 1.0;
        } else {
            self.speed *= self.config.decay;
            if self.speed < self.config.stop_threshold {
                self.speed = 0.0;
            }
        }

        if self.speed == 0.0 {
            // the next tick after coming to rest starts a fresh interval
            self.last_tick = None;
            return;
        }

        if let Some(last_tick) = self.last_tick {
            let delta = now.saturating_duration_since(last_tick).as_secs_f64();
            let pitch = SEMITONE_RATIO.powi(self.note.unwrap_or(0) as i32);
            self.position += delta * self.config.base_rate * pitch * self.speed;
        }
        self.last_tick = Some(now);
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(AnimatorConfig::default())
    }
}
