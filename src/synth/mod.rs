pub mod config;
pub mod engine;
pub mod filter;
pub mod note;
pub mod param;
pub mod supersaw;
pub mod voice;
pub mod waveform;
