use std::f32::consts::PI;

/// Two cascaded one-pole RC low-pass stages whose cutoff may change every sample.
#[derive(Clone, Debug, Default)]
pub struct LowPassFilter {
    stages: [f32; 2],
}

impl LowPassFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_sample(&mut self, input: f32, cutoff: f32, sample_rate: f32) -> f32 {
        let alpha = smoothing_factor(cutoff, sample_rate);
        let mut signal = input;
        for previous in self.stages.iter_mut() {
            *previous += alpha * (signal - *previous);
            signal = *previous;
        }
        signal
    }
}

fn smoothing_factor(cutoff: f32, sample_rate: f32) -> f32 {
    let cutoff = cutoff.clamp(f32::MIN_POSITIVE, sample_rate / 2.0);
    let rc = 1.0 / (cutoff * 2.0 * PI);
    let dt = 1.0 / sample_rate;
    dt / (rc + dt)
}
