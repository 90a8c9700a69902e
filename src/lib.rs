pub mod animator;
pub mod audio;
pub mod input;
pub mod instrument;
pub mod synth;
