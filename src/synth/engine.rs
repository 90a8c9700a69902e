use super::config::SynthConfig;
use super::note::{key_frequency, VoiceCommand};
use super::voice::Voice;
use std::sync::mpsc::{Receiver, Sender};

/// Runs on the audio thread: owns the voice and the audio clock, and applies
/// commands from the input side at the clock's current time.
pub struct SynthEngine {
    pub config: SynthConfig,
    voice: Voice,
    command_receiver: Receiver<VoiceCommand>,
    command_sender: Sender<VoiceCommand>,
    /// Audio clock, in seconds of rendered output.
    clock: f64,
    master_volume: f32,
}

impl SynthEngine {
    pub fn new(config: SynthConfig) -> Self {
        let (command_tx, command_rx) = std::sync::mpsc::channel();
        Self {
            voice: Voice::new(&config),
            master_volume: config.master_volume.clamp(0.0, 1.0),
            config,
            command_receiver: command_rx,
            command_sender: command_tx,
            clock: 0.0,
        }
    }

    /// Get a sender for voice commands that can be used from the input thread
    pub fn get_command_sender(&self) -> Sender<VoiceCommand> {
        self.command_sender.clone()
    }

    pub fn voice(&self) -> &Voice {
        &self.voice
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Set the master volume level (0.0 to 1.0)
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    fn process_commands(&mut self) {
        while let Ok(command) = self.command_receiver.try_recv() {
            log::debug!("audio clock {:.3}s: {}", self.clock, command);
            match command {
                VoiceCommand::PlayNote(key) => {
                    let frequency = key_frequency(key, self.config.bottom_freq_hz) as f32;
                    self.voice.play_note(frequency, self.clock);
                }
                VoiceCommand::Release => self.voice.release(self.clock),
            }
        }
    }

    /// Process audio for the current buffer
    pub fn process(&mut self, output: &mut [f32], sample_rate: f32) {
        self.process_commands();

        if self.voice.is_silent_at(self.clock) {
            output.fill(0.0);
        } else {
            self.voice.process(output, sample_rate, self.clock);
            for sample in output.iter_mut() {
                *sample *= self.master_volume;
            }
            self.apply_limiter(output);
        }

        self.clock += output.len() as f64 / sample_rate as f64;
    }

    /// Apply a soft knee limiter to prevent clipping
    fn apply_limiter(&self, output: &mut [f32]) {
        for sample in output.iter_mut() {
            if sample.abs() > 0.9 {
                let excess = (sample.abs() - 0.9) / 0.1;
                let scale = 1.0 - excess * 0.1;
                *sample *= scale;
            }
        }
    }
}

impl Default for SynthEngine {
    fn default() -> Self {
        Self::new(SynthConfig::default())
    }
}
