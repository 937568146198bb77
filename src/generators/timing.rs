//! Animation timing derived from element ids.
//!
//! Reveal delays are a pure function of id, so a graph always unfolds in
//! the same order. Pulse timings are drawn at render time.

use crate::random::RandomSource;
use serde::{Deserialize, Serialize};

/// Shortest pulse travel time, in seconds.
const MIN_PULSE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTiming {
    /// Seconds between successive node reveals.
    pub node_step: f64,
    /// Seconds between successive edge reveals.
    pub edge_step: f64,
    /// Range a pulse's travel time is drawn from, in seconds.
    pub pulse_duration: (f64, f64),
    /// Range the pause between pulses is drawn from, in seconds.
    pub repeat_delay: (f64, f64),
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            node_step: 0.05,
            edge_step: 0.03,
            pulse_duration: (2.0, 5.0),
            repeat_delay: (0.5, 4.0),
        }
    }
}

/// One highlighted edge's pulse schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub duration: f64,
    pub repeat_delay: f64,
}

impl Pulse {
    /// Length of one travel plus pause.
    pub fn period(&self) -> f64 {
        self.duration + self.repeat_delay
    }

    /// Share of the period spent travelling.
    pub fn travel_fraction(&self) -> f64 {
        let period = self.period();
        if period > 0.0 {
            self.duration / period
        } else {
            1.0
        }
    }
}

impl AnimationTiming {
    /// Clamp steps to be non-negative and order both ranges.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        Self {
            node_step: non_negative(self.node_step, defaults.node_step),
            edge_step: non_negative(self.edge_step, defaults.edge_step),
            pulse_duration: ordered(self.pulse_duration, defaults.pulse_duration),
            repeat_delay: ordered(self.repeat_delay, defaults.repeat_delay),
        }
    }

    /// Reveal delay for a node, using the same step fallback as [`Self::sanitized`].
    pub fn node_delay(&self, id: usize) -> f64 {
        id as f64 * self.sanitized().node_step
    }

    pub fn edge_delay(&self, id: usize) -> f64 {
        id as f64 * self.sanitized().edge_step
    }

    /// Draw a pulse schedule.
    pub fn pulse(&self, rng: &mut impl RandomSource) -> Pulse {
        let timing = self.sanitized();
        let duration = lerp(timing.pulse_duration, rng.uniform()).max(MIN_PULSE);
        let repeat_delay = lerp(timing.repeat_delay, rng.uniform());
        Pulse {
            duration,
            repeat_delay,
        }
    }
}

fn non_negative(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        fallback
    }
}

fn ordered(range: (f64, f64), fallback: (f64, f64)) -> (f64, f64) {
    let (a, b) = range;
    if !a.is_finite() || !b.is_finite() {
        return fallback;
    }
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    (lo.max(0.0), hi.max(0.0))
}

fn lerp((lo, hi): (f64, f64), t: f64) -> f64 {
    lo + (hi - lo) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Replay;

    #[test]
    fn delays_scale_with_id() {
        let timing = AnimationTiming {
            node_step: 0.1,
            edge_step: 0.25,
            ..AnimationTiming::default()
        };
        assert_eq!(timing.node_delay(0), 0.0);
        assert_eq!(timing.edge_delay(4), 1.0);
        assert!(timing.node_delay(3) > timing.node_delay(2));
    }

    #[test]
    fn negative_steps_collapse_to_zero() {
        let timing = AnimationTiming {
            node_step: -1.0,
            ..AnimationTiming::default()
        };
        assert_eq!(timing.node_delay(10), 0.0);
    }

    #[test]
    fn non_finite_steps_use_the_default_step() {
        let timing = AnimationTiming {
            node_step: f64::INFINITY,
            edge_step: f64::NAN,
            ..AnimationTiming::default()
        };
        let defaults = AnimationTiming::default();
        assert_eq!(timing.sanitized().node_step, defaults.node_step);
        assert_eq!(timing.node_delay(4), defaults.node_delay(4));
        assert_eq!(timing.edge_delay(4), defaults.edge_delay(4));
    }

    #[test]
    fn pulses_fall_within_ranges() {
        let timing = AnimationTiming {
            pulse_duration: (2.0, 4.0),
            repeat_delay: (1.0, 3.0),
            ..AnimationTiming::default()
        };
        let pulse = timing.pulse(&mut Replay::new(vec![0.5, 0.25]));
        assert_eq!(pulse.duration, 3.0);
        assert_eq!(pulse.repeat_delay, 1.5);
        assert_eq!(pulse.period(), 4.5);
    }

    #[test]
    fn inverted_ranges_are_reordered() {
        let timing = AnimationTiming {
            pulse_duration: (6.0, 2.0),
            repeat_delay: (f64::NAN, 1.0),
            ..AnimationTiming::default()
        };
        let clean = timing.sanitized();
        assert_eq!(clean.pulse_duration, (2.0, 6.0));
        assert_eq!(clean.repeat_delay, AnimationTiming::default().repeat_delay);
    }

    #[test]
    fn zero_length_pulses_are_floored() {
        let timing = AnimationTiming {
            pulse_duration: (0.0, 0.0),
            repeat_delay: (0.0, 0.0),
            ..AnimationTiming::default()
        };
        let pulse = timing.pulse(&mut Replay::new(vec![0.0]));
        assert_eq!(pulse.duration, MIN_PULSE);
        assert_eq!(pulse.travel_fraction(), 1.0);
    }
}
