//! Display-frame step gate
//!
//! The animation-frame callback asks the gate whether a step is due. There
//! is no accumulator: a frame either starts a step (and becomes the new
//! reference time) or does nothing, so speed changes apply at the next
//! eligible frame.

#[derive(Debug, Clone, Default)]
pub struct StepClock {
    /// Timestamp (ms) of the last admitted step
    last_ms: f64,
}

impl StepClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a step if at least `1 / speed` seconds passed since the last one
    pub fn ready(&mut self, now_ms: f64, speed: f32) -> bool {
        if speed <= 0.0 {
            return false;
        }
        let elapsed = (now_ms - self.last_ms) / 1000.0;
        if elapsed < 1.0 / speed as f64 {
            return false;
        }
        self.last_ms = now_ms;
        true
    }

    pub fn last_step_ms(&self) -> f64 {
        self.last_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_at_seven_steps_per_second() {
        let mut clock = StepClock::new();
        // 1/7 s = ~142.9 ms
        assert!(clock.ready(1000.0, 7.0));
        assert!(!clock.ready(1016.7, 7.0));
        assert!(!clock.ready(1142.0, 7.0));
        assert!(clock.ready(1143.0, 7.0));
        assert_eq!(clock.last_step_ms(), 1143.0);
    }

    #[test]
    fn test_no_catch_up() {
        let mut clock = StepClock::new();
        assert!(clock.ready(1000.0, 10.0));
        // A long stall still yields a single step
        assert!(clock.ready(5000.0, 10.0));
        assert!(!clock.ready(5016.0, 10.0));
    }

    #[test]
    fn test_faster_speed_shortens_wait() {
        let mut clock = StepClock::new();
        assert!(clock.ready(1000.0, 7.0));
        assert!(!clock.ready(1050.0, 7.0));
        assert!(clock.ready(1051.0, 20.0));
    }

    #[test]
    fn test_zero_speed_never_steps() {
        let mut clock = StepClock::new();
        assert!(!clock.ready(10_000.0, 0.0));
    }
}
