#[derive(Clone, Debug)]
pub struct SynthConfig {
    /// Frequency of key 0 (C1).
    pub bottom_freq_hz: f64,
    pub oscillators_per_cluster: usize,
    /// Spread of each super-saw cluster as a fraction of its center frequency.
    pub detune: f32,
    pub attack_secs: f64,
    pub release_secs: f64,
    pub open_cutoff_hz: f32,
    pub closed_cutoff_hz: f32,
    pub master_volume: f32,
    /// Exponential ramps cannot start from zero, so attacks start from at least this value.
    pub exp_floor: f32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            bottom_freq_hz: 32.70,
            oscillators_per_cluster: 5,
            detune: 0.02,
            attack_secs: 0.1,
            release_secs: 10.0,
            open_cutoff_hz: 20000.0,
            closed_cutoff_hz: 1.0,
            master_volume: 0.3,
            exp_floor: 1e-4,
        }
    }
}
