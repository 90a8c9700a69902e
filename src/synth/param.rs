/// A scheduled change to an [`AudioParam`]. Times are absolute, in seconds of audio clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Automation {
    SetValue { value: f32, time: f64 },
    LinearRamp { value: f32, time: f64 },
    ExponentialRamp { value: f32, time: f64 },
}

impl Automation {
    pub fn time(&self) -> f64 {
        match *self {
            Automation::SetValue { time, .. }
            | Automation::LinearRamp { time, .. }
            | Automation::ExponentialRamp { time, .. } => time,
        }
    }

    pub fn value(&self) -> f32 {
        match *self {
            Automation::SetValue { value, .. }
            | Automation::LinearRamp { value, .. }
            | Automation::ExponentialRamp { value, .. } => value,
        }
    }
}

/// A control value (gain, cutoff) whose changes are scheduled ahead of time and
/// evaluated sample by sample on the audio thread.
///
/// The timeline is kept sorted by time. A ramp runs from the event before it
/// (or the initial value) to its own target, reaching the target at its time.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioParam {
    initial: f32,
    events: Vec<Automation>,
}

impl AudioParam {
    pub fn new(initial: f32) -> Self {
        Self {
            initial,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[Automation] {
        &self.events
    }

    /// The value the param settles at once every scheduled event has been reached.
    pub fn target(&self) -> f32 {
        self.events.last().map_or(self.initial, Automation::value)
    }

    pub fn set_value_at_time(&mut self, value: f32, time: f64) {
        self.insert(Automation::SetValue { value, time });
    }

    pub fn linear_ramp_to_value_at_time(&mut self, value: f32, time: f64) {
        self.insert(Automation::LinearRamp { value, time });
    }

    pub fn exponential_ramp_to_value_at_time(&mut self, value: f32, time: f64) {
        self.insert(Automation::ExponentialRamp { value, time });
    }

    /// Removes every event scheduled at or after `time`.
    pub fn cancel_scheduled_values(&mut self, time: f64) {
        self.events.retain(|event| event.time() < time);
    }

    /// Freezes the param at whatever value it has at `time`, dropping all pending
    /// automation. History before `time` is discarded, so callers must never ask
    /// for values earlier than the latest hold.
    pub fn cancel_and_hold_at_time(&mut self, time: f64) -> f32 {
        let value = self.value_at(time);
        self.cancel_scheduled_values(time);
        self.events.clear();
        self.initial = value;
        self.events.push(Automation::SetValue { value, time });
        value
    }

    pub fn value_at(&self, time: f64) -> f32 {
        let next_index = self.events.partition_point(|event| event.time() <= time);
        let previous = next_index.checked_sub(1).map(|i| self.events[i]);
        let start_value = previous.map_or(self.initial, |event| event.value());
        let next = match self.events.get(next_index) {
            Some(next) => *next,
            None => return start_value,
        };
        // a ramp with nothing before it holds the initial value until it fires
        let start_time = previous.map_or(next.time(), |event| event.time());
        let span = next.time() - start_time;
        if span <= 0.0 {
            return start_value;
        }
        let fraction = ((time - start_time) / span) as f32;
        match next {
            Automation::SetValue { .. } => start_value,
            Automation::LinearRamp { value, .. } => start_value + (value - start_value) * fraction,
            Automation::ExponentialRamp { value, .. } => {
                if start_value * value <= 0.0 {
                    start_value
                } else {
                    start_value * (value / start_value).powf(fraction)
                }
            }
        }
    }

    fn insert(&mut self, event: Automation) {
        // events at the same time apply in the order they were scheduled
        let index = self
            .events
            .partition_point(|existing| existing.time() <= event.time());
        self.events.insert(index, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        let tolerance = 1e-4 * expected.abs().max(1.0);
        assert!((actual - expected).abs() < tolerance, "{} != {}", actual, expected);
    }

    #[test]
    fn test_unscheduled_param_holds_initial_value() {
        let param = AudioParam::new(0.5);
        assert_eq!(param.value_at(0.0), 0.5);
        assert_eq!(param.value_at(100.0), 0.5);
        assert_eq!(param.target(), 0.5);
    }

    #[test]
    fn test_set_value_takes_effect_at_its_time() {
        let mut param = AudioParam::new(0.0);
        param.set_value_at_time(1.0, 2.0);
        assert_eq!(param.value_at(1.999), 0.0);
        assert_eq!(param.value_at(2.0), 1.0);
    }

    #[test]
    fn test_linear_ramp_interpolates_from_previous_event() {
        let mut param = AudioParam::new(0.0);
        param.set_value_at_time(1.0, 1.0);
        param.linear_ramp_to_value_at_time(0.0, 11.0);
        assert_close(param.value_at(1.0), 1.0);
        assert_close(param.value_at(6.0), 0.5);
        assert_close(param.value_at(11.0), 0.0);
        assert_close(param.value_at(50.0), 0.0);
    }

    #[test]
    fn test_exponential_ramp_is_geometric() {
        let mut param = AudioParam::new(20000.0);
        param.set_value_at_time(20000.0, 0.0);
        param.exponential_ramp_to_value_at_time(2.0, 10.0);
        assert_close(param.value_at(5.0), 200.0);
        assert_close(param.value_at(10.0), 2.0);
    }

    #[test]
    fn test_exponential_ramp_from_zero_holds_then_jumps() {
        let mut param = AudioParam::new(0.0);
        param.set_value_at_time(0.0, 0.0);
        param.exponential_ramp_to_value_at_time(1.0, 0.1);
        assert_eq!(param.value_at(0.05), 0.0);
        assert_eq!(param.value_at(0.1), 1.0);
    }

    #[test]
    fn test_ramp_without_previous_event_holds_initial_value() {
        let mut param = AudioParam::new(0.25);
        param.linear_ramp_to_value_at_time(1.0, 4.0);
        assert_eq!(param.value_at(2.0), 0.25);
        assert_eq!(param.value_at(4.0), 1.0);
    }

    #[test]
    fn test_cancel_scheduled_values_removes_pending_events() {
        let mut param = AudioParam::new(0.0);
        param.set_value_at_time(1.0, 1.0);
        param.linear_ramp_to_value_at_time(0.0, 5.0);
        param.cancel_scheduled_values(5.0);
        assert_eq!(param.events(), &[Automation::SetValue { value: 1.0, time: 1.0 }]);
        assert_eq!(param.value_at(10.0), 1.0);
    }

    #[test]
    fn test_cancel_and_hold_captures_value_mid_ramp() {
        let mut param = AudioParam::new(0.0);
        param.set_value_at_time(1.0, 0.0);
        param.linear_ramp_to_value_at_time(0.0, 10.0);
        let held = param.cancel_and_hold_at_time(2.5);
        assert_close(held, 0.75);
        assert_close(param.value_at(9.0), 0.75);
        assert_eq!(param.events().len(), 1);
    }

    #[test]
    fn test_same_time_events_apply_in_schedule_order() {
        let mut param = AudioParam::new(0.0);
        param.set_value_at_time(0.3, 1.0);
        param.set_value_at_time(0.6, 1.0);
        assert_eq!(param.value_at(1.0), 0.6);
    }
}
