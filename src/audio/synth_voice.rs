use super::AudioBackend;
use crate::synth::note::{KeyIndex, VoiceCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeviceState {
    /// No note has been played yet, so the device hasn't been opened.
    Pending,
    Running,
    /// Opening or talking to the device failed; the instrument carries on silently.
    Unavailable,
}

/// The input side's handle to the monophonic voice.
///
/// The backend is opened on the first note rather than at startup. Any audio
/// failure is logged once and turns the voice into a silent no-op.
pub struct SynthVoice<B: AudioBackend> {
    backend: B,
    state: DeviceState,
}

impl<B: AudioBackend> SynthVoice<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: DeviceState::Pending,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_running(&self) -> bool {
        self.state == DeviceState::Running
    }

    pub fn is_unavailable(&self) -> bool {
        self.state == DeviceState::Unavailable
    }

    /// Opens the backend if this is the first note. Returns whether commands can be sent.
    pub fn ensure_started(&mut self) -> bool {
        if self.state == DeviceState::Pending {
            self.state = match self.backend.start() {
                Ok(()) => {
                    log::info!("audio output started");
                    DeviceState::Running
                }
                Err(e) => {
                    log::warn!("audio unavailable, continuing without sound: {:#}", e);
                    DeviceState::Unavailable
                }
            };
        }
        self.state == DeviceState::Running
    }

    pub fn play_note(&mut self, key: KeyIndex) {
        if self.ensure_started() {
            self.send(VoiceCommand::PlayNote(key));
        }
    }

    /// Releases the sounding note. Does nothing if no note was ever played.
    pub fn release(&mut self) {
        if self.state == DeviceState::Running {
            self.send(VoiceCommand::Release);
        }
    }

    fn send(&mut self, command: VoiceCommand) {
        if let Err(e) = self.backend.send(command) {
            log::warn!("failed to send {} to audio thread: {:#}", command, e);
            self.state = DeviceState::Unavailable;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::RecordingBackend;

    #[test]
    fn test_backend_not_started_until_first_note() {
        let mut voice = SynthVoice::new(RecordingBackend::default());
        assert_eq!(voice.backend().starts, 0);
        voice.release();
        assert_eq!(voice.backend().starts, 0);
        assert!(voice.backend().commands.is_empty());

        voice.play_note(3);
        voice.play_note(5);
        assert_eq!(voice.backend().starts, 1);
        assert!(voice.is_running());
        assert_eq!(
            voice.backend().commands,
            vec![VoiceCommand::PlayNote(3), VoiceCommand::PlayNote(5)]
        );
    }

    #[test]
    fn test_failed_start_degrades_to_silence() {
        let backend = RecordingBackend {
            fail_start: true,
            ..Default::default()
        };
        let mut voice = SynthVoice::new(backend);
        voice.play_note(0);
        voice.release();
        voice.play_note(1);
        assert!(voice.is_unavailable());
        assert_eq!(voice.backend().starts, 1);
        assert!(voice.backend().commands.is_empty());
    }

    #[test]
    fn test_failed_send_degrades_to_silence() {
        let backend = RecordingBackend {
            fail_send: true,
            ..Default::default()
        };
        let mut voice = SynthVoice::new(backend);
        voice.play_note(0);
        assert!(voice.is_unavailable());
        voice.play_note(1);
        assert_eq!(voice.backend().starts, 1);
    }
}
