use super::waveform::SawOscillator;

/// Frequencies of a super-saw cluster of `count` oscillators around `center`.
///
/// The oscillators are spread linearly over `detune * center` Hz, starting at
/// `center - detune * center / 2` with a step of `detune * center / count`.
pub fn cluster_frequencies(center: f32, count: usize, detune: f32) -> Vec<f32> {
    let spread = detune * center;
    let lowest = center - spread / 2.0;
    let step = if count == 0 { 0.0 } else { spread / count as f32 };
    (0..count).map(|i| lowest + step * i as f32).collect()
}

/// A bank of detuned sawtooth oscillators summed into one signal.
#[derive(Debug, Clone)]
pub struct SuperSaw {
    oscillators: Vec<SawOscillator>,
    detune: f32,
    center: f32,
}

impl SuperSaw {
    pub fn new(count: usize, detune: f32) -> Self {
        Self {
            oscillators: (0..count)
                .map(|_| SawOscillator::with_random_phase(0.0))
                .collect(),
            detune,
            center: 0.0,
        }
    }

    pub fn center(&self) -> f32 {
        self.center
    }

    pub fn frequencies(&self) -> Vec<f32> {
        self.oscillators.iter().map(|osc| osc.frequency).collect()
    }

    /// Retunes every oscillator immediately, keeping their phases.
    pub fn set_frequency(&mut self, center: f32) {
        self.center = center;
        let frequencies = cluster_frequencies(center, self.oscillators.len(), self.detune);
        for (osc, frequency) in self.oscillators.iter_mut().zip(frequencies) {
            osc.frequency = frequency;
        }
    }

    /// Next sample of the cluster, normalized by the oscillator count.
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        if self.oscillators.is_empty() {
            return 0.0;
        }
        let sum: f32 = self
            .oscillators
            .iter_mut()
            .map(|osc| osc.next_sample(sample_rate))
            .sum();
        sum / self.oscillators.len() as f32
    }
}
