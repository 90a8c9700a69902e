use std::fmt;

/// Identifies one key of the instrument. Keys are numbered from the lowest note upwards.
pub type KeyIndex = u8;

/// Ratio between the frequencies of two adjacent equal-tempered semitones.
pub const SEMITONE_RATIO: f64 = 1.059_463_094_359_295_3;

/// Frequency of `key`, counting semitones up from `bottom_freq_hz`.
pub fn key_frequency(key: KeyIndex, bottom_freq_hz: f64) -> f64 {
    bottom_freq_hz * SEMITONE_RATIO.powi(key as i32)
}

/// True for the keys drawn as black keys on a piano when key 0 is a C.
pub fn is_black_key(key: KeyIndex) -> bool {
    matches!(key % 12, 1 | 3 | 6 | 8 | 10)
}

/// Messages sent from the input thread to the audio thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceCommand {
    PlayNote(KeyIndex),
    Release,
}

impl fmt::Display for VoiceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceCommand::PlayNote(key) => write!(f, "play note {}", key),
            VoiceCommand::Release => write!(f, "release"),
        }
    }
}
