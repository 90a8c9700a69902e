use crate::animator::{Animator, AnimatorConfig};
use crate::audio::{AudioBackend, SynthVoice};
use crate::input::{Effect, InputController, KeyMap, PointerPosition, SurfaceSize};
use crate::synth::config::SynthConfig;
use crate::synth::note::KeyIndex;
use std::time::Instant;

#[derive(Clone, Debug)]
pub struct InstrumentConfig {
    pub key_count: usize,
    /// Logical size of the key color map.
    pub bitmap_width: u32,
    pub bitmap_height: u32,
    pub synth: SynthConfig,
    pub animator: AnimatorConfig,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            key_count: 25,
            bitmap_width: 689,
            bitmap_height: 200,
            synth: SynthConfig::default(),
            animator: AnimatorConfig::default(),
        }
    }
}

/// One playable keyboard: hit-testing, press state, the voice, and the
/// background scroller. Pointer events and ticks all arrive on one thread.
pub struct Instrument<B: AudioBackend> {
    key_map: KeyMap,
    controller: InputController,
    voice: SynthVoice<B>,
    animator: Animator,
}

impl<B: AudioBackend> Instrument<B> {
    pub fn new(config: InstrumentConfig, key_map: KeyMap, backend: B) -> Self {
        Self {
            key_map,
            controller: InputController::new(),
            voice: SynthVoice::new(backend),
            animator: Animator::new(config.animator),
        }
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    pub fn controller(&self) -> &InputController {
        &self.controller
    }

    pub fn voice(&self) -> &SynthVoice<B> {
        &self.voice
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// The key under a pointer on a surface drawn at `surface` size.
    pub fn locate(&self, position: PointerPosition, surface: SurfaceSize) -> Option<KeyIndex> {
        let (x, y) = surface.to_bitmap(position, self.key_map.width(), self.key_map.height())?;
        self.key_map.index_at(x, y)
    }

    pub fn on_pointer_move(&mut self, position: PointerPosition, surface: SurfaceSize) {
        let key = self.locate(position, surface);
        let effects = self.controller.pointer_move(key);
        self.apply(effects);
    }

    pub fn on_pointer_down(&mut self, position: PointerPosition, surface: SurfaceSize) {
        let key = self.locate(position, surface);
        let effects = self.controller.pointer_down(key);
        self.apply(effects);
    }

    pub fn on_pointer_up(&mut self) {
        let effects = self.controller.pointer_up();
        self.apply(effects);
    }

    pub fn on_pointer_leave(&mut self) {
        let effects = self.controller.pointer_leave();
        self.apply(effects);
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.animator.tick(now);
    }

    /// Whether the host should keep scheduling ticks.
    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            log::debug!("{:?}", effect);
            match effect {
                Effect::PlayNote(key) => {
                    self.voice.play_note(key);
                    self.animator.hold(key);
                }
                Effect::Release => {
                    self.voice.release();
                    self.animator.release();
                }
                // drawn from the controller state by the host
                Effect::BrightnessOn | Effect::BrightnessOff => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::RecordingBackend;
    use crate::input::layout::piano_color_map;
    use crate::input::ControllerState;
    use crate::synth::note::VoiceCommand;
    use std::time::Duration;

    /// Drawn at twice the bitmap size.
    const SURFACE: SurfaceSize = SurfaceSize {
        width: 1378.0,
        height: 400.0,
    };

    fn instrument(backend: RecordingBackend) -> Instrument<RecordingBackend> {
        let config = InstrumentConfig::default();
        let key_map = KeyMap::new(
            piano_color_map(config.key_count, config.bitmap_width, config.bitmap_height),
            config.key_count,
        )
        .unwrap();
        Instrument::new(config, key_map, backend)
    }

    /// Screen position of the lower part of `key` (white keys) or its middle (black keys).
    fn over(instrument: &Instrument<RecordingBackend>, key: KeyIndex) -> PointerPosition {
        let bounds = instrument.key_map().bounds(key).unwrap();
        PointerPosition {
            x: (bounds.x + bounds.width / 2) as f32 * 2.0,
            y: (bounds.y + bounds.height * 9 / 10) as f32 * 2.0,
        }
    }

    const OUTSIDE: PointerPosition = PointerPosition { x: 1370.0, y: 200.0 };

    #[test]
    fn test_locate_rescales_pointer() {
        let instrument = instrument(RecordingBackend::default());
        for key in 0..25 {
            assert_eq!(instrument.locate(over(&instrument, key), SURFACE), Some(key));
        }
        assert_eq!(instrument.locate(OUTSIDE, SURFACE), None);
        let far = PointerPosition { x: -10.0, y: 5000.0 };
        assert_eq!(instrument.locate(far, SURFACE), None);
    }

    #[test]
    fn test_hovering_does_not_open_audio() {
        let mut instrument = instrument(RecordingBackend::default());
        instrument.on_pointer_move(over(&instrument, 3), SURFACE);
        assert_eq!(instrument.controller().state(), ControllerState::Hovering(3));
        instrument.on_pointer_up();
        assert_eq!(instrument.voice().backend().starts, 0);
    }

    #[test]
    fn test_slide_then_release_outside() {
        let mut instrument = instrument(RecordingBackend::default());
        instrument.on_pointer_down(over(&instrument, 5), SURFACE);
        instrument.on_pointer_move(over(&instrument, 7), SURFACE);
        instrument.on_pointer_move(OUTSIDE, SURFACE);
        instrument.on_pointer_leave();
        assert_eq!(instrument.controller().state(), ControllerState::Pressed(7));
        instrument.on_pointer_up();

        assert_eq!(instrument.controller().state(), ControllerState::Idle);
        assert!(!instrument.controller().brightness_on());
        assert_eq!(
            instrument.voice().backend().commands,
            vec![
                VoiceCommand::PlayNote(5),
                VoiceCommand::PlayNote(7),
                VoiceCommand::Release
            ]
        );
    }

    #[test]
    fn test_silent_instrument_still_plays_visually() {
        let backend = RecordingBackend {
            fail_start: true,
            ..Default::default()
        };
        let mut instrument = instrument(backend);
        let start = Instant::now();
        instrument.on_pointer_down(over(&instrument, 12), SURFACE);
        assert!(instrument.voice().is_unavailable());
        assert_eq!(instrument.controller().pressed_key(), Some(12));
        assert!(instrument.controller().brightness_on());

        instrument.on_tick(start);
        instrument.on_tick(start + Duration::from_secs(1));
        assert!((instrument.animator().position() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_animation_follows_press_and_release() {
        let mut instrument = instrument(RecordingBackend::default());
        let start = Instant::now();
        assert!(!instrument.is_animating());
        instrument.on_pointer_down(over(&instrument, 0), SURFACE);
        assert!(instrument.is_animating());
        instrument.on_tick(start);
        instrument.on_pointer_up();
        assert!(instrument.is_animating());
        for i in 1..=400 {
            instrument.on_tick(start + Duration::from_millis(i));
        }
        assert!(!instrument.is_animating());
        assert_eq!(instrument.animator().note(), Some(0));
    }
}
