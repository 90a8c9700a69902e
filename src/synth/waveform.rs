use rand::Rng;

/// A naive (non band-limited) sawtooth oscillator driven by a phase accumulator.
#[derive(Debug, Clone)]
pub struct SawOscillator {
    pub frequency: f32,
    /// Position within the current cycle, in `[0, 1)`.
    phase: f32,
}

impl SawOscillator {
    pub fn new(frequency: f32) -> Self {
        Self {
            frequency,
            phase: 0.0,
        }
    }

    /// Starts the oscillator at a random point of its cycle so that a cluster of
    /// slightly detuned saws doesn't start phase-aligned.
    pub fn with_random_phase(frequency: f32) -> Self {
        Self {
            frequency,
            phase: rand::thread_rng().gen_range(0.0..1.0),
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        let cycles = self.phase;
        let sample = 2.0 * (cycles - (cycles + 0.5).floor());
        self.phase = (self.phase + self.frequency / sample_rate).fract();
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saw_stays_in_range() {
        let mut osc = SawOscillator::with_random_phase(440.0);
        for _ in 0..10_000 {
            let sample = osc.next_sample(44100.0);
            assert!((-1.0..=1.0).contains(&sample));
        }
    }

    #[test]
    fn test_saw_completes_one_cycle_per_period() {
        let mut osc = SawOscillator::new(100.0);
        for _ in 0..441 {
            osc.next_sample(44100.0);
        }
        assert!(osc.phase() < 1e-3 || osc.phase() > 1.0 - 1e-3);
    }

    #[test]
    fn test_saw_rises_through_first_half_cycle() {
        let mut osc = SawOscillator::new(1.0);
        let first = osc.next_sample(4.0);
        let second = osc.next_sample(4.0);
        assert_eq!(first, 0.0);
        assert_eq!(second, 0.5);
    }
}
