mod cpal_backend;
mod synth_voice;

pub use self::cpal_backend::CpalBackend;
pub use self::synth_voice::SynthVoice;

use crate::synth::note::VoiceCommand;

/// An audio output that can be opened on demand and driven with voice commands.
pub trait AudioBackend {
    /// Opens the output device and starts rendering. Called at most once, on the first note.
    fn start(&mut self) -> anyhow::Result<()>;
    /// Hands a command to the audio thread without waiting for it to be applied.
    fn send(&mut self, command: VoiceCommand) -> anyhow::Result<()>;
}
