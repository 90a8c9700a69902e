use super::config::SynthConfig;
use super::filter::LowPassFilter;
use super::param::AudioParam;
use super::supersaw::SuperSaw;

/// The single monophonic voice: a super-saw at the note's fundamental and one
/// an octave above, through a shared low-pass filter and an amplitude envelope.
///
/// All scheduling methods take the audio clock's current time; the envelopes
/// are evaluated per sample when the voice is rendered.
pub struct Voice {
    base: SuperSaw,
    octave: SuperSaw,
    filter: LowPassFilter,
    pub gain: AudioParam,
    pub cutoff: AudioParam,
    attack_secs: f64,
    release_secs: f64,
    open_cutoff_hz: f32,
    closed_cutoff_hz: f32,
    exp_floor: f32,
}

impl Voice {
    pub fn new(config: &SynthConfig) -> Self {
        Self {
            base: SuperSaw::new(config.oscillators_per_cluster, config.detune),
            octave: SuperSaw::new(config.oscillators_per_cluster, config.detune),
            filter: LowPassFilter::new(),
            gain: AudioParam::new(0.0),
            cutoff: AudioParam::new(config.closed_cutoff_hz),
            attack_secs: config.attack_secs,
            release_secs: config.release_secs,
            open_cutoff_hz: config.open_cutoff_hz,
            closed_cutoff_hz: config.closed_cutoff_hz,
            exp_floor: config.exp_floor,
        }
    }

    pub fn frequencies(&self) -> (f32, f32) {
        (self.base.center(), self.octave.center())
    }

    /// Retunes both clusters immediately and opens the envelopes from wherever
    /// they currently are, so playing over a sounding note glides without a restart.
    pub fn play_note(&mut self, frequency: f32, now: f64) {
        self.base.set_frequency(frequency);
        self.octave.set_frequency(frequency * 2.0);

        let end = now + self.attack_secs;
        let gain = self.gain.cancel_and_hold_at_time(now);
        if gain < self.exp_floor {
            self.gain.set_value_at_time(self.exp_floor, now);
        }
        self.gain.exponential_ramp_to_value_at_time(1.0, end);

        let cutoff = self.cutoff.cancel_and_hold_at_time(now);
        if cutoff < self.exp_floor {
            self.cutoff.set_value_at_time(self.exp_floor, now);
        }
        self.cutoff
            .exponential_ramp_to_value_at_time(self.open_cutoff_hz, end);
    }

    /// Starts the long filtered tail: amplitude falls linearly to silence while
    /// the cutoff closes exponentially over the same window.
    pub fn release(&mut self, now: f64) {
        let end = now + self.release_secs;
        self.gain.cancel_and_hold_at_time(now);
        self.gain.linear_ramp_to_value_at_time(0.0, end);
        let cutoff = self.cutoff.cancel_and_hold_at_time(now);
        if cutoff < self.exp_floor {
            self.cutoff.set_value_at_time(self.exp_floor, now);
        }
        self.cutoff
            .exponential_ramp_to_value_at_time(self.closed_cutoff_hz, end);
    }

    /// True once the amplitude has reached zero and nothing else is scheduled.
    pub fn is_silent_at(&self, time: f64) -> bool {
        self.gain.target() == 0.0 && self.gain.value_at(time) == 0.0
    }

    /// Renders into `output`, overwriting it. `start_time` is the audio clock time
    /// of the first sample.
    pub fn process(&mut self, output: &mut [f32], sample_rate: f32, start_time: f64) {
        let dt = 1.0 / sample_rate as f64;
        for (i, sample) in output.iter_mut().enumerate() {
            let time = start_time + i as f64 * dt;
            let raw = (self.base.next_sample(sample_rate)
                + self.octave.next_sample(sample_rate))
                * 0.5;
            let filtered = self
                .filter
                .process_sample(raw, self.cutoff.value_at(time), sample_rate);
            *sample = filtered * self.gain.value_at(time);
        }
    }
}
