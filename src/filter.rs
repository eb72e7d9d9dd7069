//! Deadzone and jitter rejection for the analog sticks.
//!
//! Each stick has a [`FilterProfile`]. A sample is compared only against the
//! last value that was let through for the same axis, so the filter is a
//! one-sample hysteresis and not a moving average.
//!
//! A slow drift across the deadzone edge can hold the previous value until
//! the stick moves by more than the jitter threshold. That is accepted
//! behavior.

use crate::devices::xbox_elite2_layout::XboxElite2Layout;
use evdev::AbsoluteAxisType;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterProfile {
    /// Raw magnitudes strictly below this are treated as rest.
    pub deadzone: i32,
    /// Moves strictly smaller than this from the last accepted value are dropped.
    pub jitter: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stick {
    Left,
    Right,
}

pub struct AxisFilter {
    left: FilterProfile,
    right: FilterProfile,
    /// Keyed by raw axis code; `AbsoluteAxisType` is not `Hash`.
    last: HashMap<u16, i32>,
}

impl AxisFilter {
    pub fn new(left: FilterProfile, right: FilterProfile) -> Self {
        Self {
            left,
            right,
            last: HashMap::new(),
        }
    }

    /// Records `value` as already sent for `axis`, e.g. the rest frame written
    /// when the virtual device is created.
    pub fn seed(&mut self, axis: AbsoluteAxisType, value: i32) {
        self.last.insert(axis.0, value);
    }

    #[cfg(test)]
    pub fn last_accepted(&self, axis: AbsoluteAxisType) -> Option<i32> {
        self.last.get(&axis.0).copied()
    }

    fn profile(&self, stick: Stick) -> FilterProfile {
        match stick {
            Stick::Left => self.left,
            Stick::Right => self.right,
        }
    }

    /// Returns the value to forward for `axis`, or `None` if the sample is
    /// noise or a repeat of the rest position.
    pub fn apply(&mut self, stick: Stick, axis: AbsoluteAxisType, raw: i32) -> Option<i32> {
        let profile = self.profile(stick);
        let value = if raw.saturating_abs() < profile.deadzone {
            0
        } else {
            XboxElite2Layout::clamp_stick(raw)
        };

        if let Some(prev) = self.last.get(&axis.0).copied() {
            if value != 0 && (value - prev).abs() < profile.jitter {
                return None;
            }
            if value == 0 && prev == 0 {
                return None;
            }
        }

        self.last.insert(axis.0, value);
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LEFT: FilterProfile = FilterProfile {
        deadzone: 3500,
        jitter: 300,
    };
    const RIGHT: FilterProfile = FilterProfile {
        deadzone: 2000,
        jitter: 300,
    };

    fn filter() -> AxisFilter {
        AxisFilter::new(LEFT, RIGHT)
    }

    #[test]
    fn left_stick_sequence_from_rest() {
        let mut f = filter();
        f.seed(AbsoluteAxisType::ABS_X, 0);

        let out: Vec<_> = [0, 4000, 4050, 0]
            .into_iter()
            .map(|v| f.apply(Stick::Left, AbsoluteAxisType::ABS_X, v))
            .collect();

        assert_eq!(out, vec![None, Some(4000), None, Some(0)]);
    }

    #[test]
    fn first_sample_inside_deadzone_is_accepted_as_rest() {
        let mut f = filter();
        assert_eq!(f.apply(Stick::Left, AbsoluteAxisType::ABS_Y, 1200), Some(0));
        assert_eq!(f.apply(Stick::Left, AbsoluteAxisType::ABS_Y, -900), None);
        assert_eq!(f.last_accepted(AbsoluteAxisType::ABS_Y), Some(0));
    }

    #[test]
    fn deadzone_edge_is_exclusive() {
        let mut f = filter();
        assert_eq!(f.apply(Stick::Right, AbsoluteAxisType::ABS_RX, 1999), Some(0));
        assert_eq!(f.apply(Stick::Right, AbsoluteAxisType::ABS_RX, 2000), Some(2000));
        assert_eq!(f.apply(Stick::Right, AbsoluteAxisType::ABS_RX, -2000), Some(-2000));
    }

    #[test]
    fn profiles_are_per_stick() {
        let mut f = filter();
        // 2500 is inside the left deadzone but outside the right one.
        assert_eq!(f.apply(Stick::Left, AbsoluteAxisType::ABS_X, 2500), Some(0));
        assert_eq!(f.apply(Stick::Right, AbsoluteAxisType::ABS_RX, 2500), Some(2500));
    }

    #[test]
    fn axes_do_not_share_state() {
        let mut f = filter();
        assert_eq!(f.apply(Stick::Right, AbsoluteAxisType::ABS_RX, 9000), Some(9000));
        assert_eq!(f.apply(Stick::Right, AbsoluteAxisType::ABS_RY, 9000), Some(9000));
    }

    #[test]
    fn state_follows_axis_code() {
        let mut f = filter();
        f.seed(AbsoluteAxisType::ABS_RX, 0);
        assert_eq!(f.apply(Stick::Right, AbsoluteAxisType(3), 5000), Some(5000));
        assert_eq!(f.last_accepted(AbsoluteAxisType::ABS_RX), Some(5000));
        assert_eq!(f.apply(Stick::Right, AbsoluteAxisType::ABS_RX, 5100), None);
        assert_eq!(f.last_accepted(AbsoluteAxisType::ABS_RY), None);
    }

    #[test]
    fn jitter_threshold_is_exclusive() {
        let mut f = filter();
        assert_eq!(f.apply(Stick::Left, AbsoluteAxisType::ABS_X, 10_000), Some(10_000));
        assert_eq!(f.apply(Stick::Left, AbsoluteAxisType::ABS_X, 10_299), None);
        assert_eq!(f.apply(Stick::Left, AbsoluteAxisType::ABS_X, 10_300), Some(10_300));
    }

    #[test]
    fn slow_drift_through_deadzone_edge_holds_value() {
        let mut f = filter();
        f.seed(AbsoluteAxisType::ABS_X, 0);
        assert_eq!(f.apply(Stick::Left, AbsoluteAxisType::ABS_X, 3600), Some(3600));
        // Stick creeps outward in small steps; each is inside the jitter band.
        assert_eq!(f.apply(Stick::Left, AbsoluteAxisType::ABS_X, 3700), None);
        assert_eq!(f.apply(Stick::Left, AbsoluteAxisType::ABS_X, 3800), None);
        assert_eq!(f.last_accepted(AbsoluteAxisType::ABS_X), Some(3600));
    }

    #[test]
    fn out_of_range_raw_values_are_clamped() {
        let mut f = filter();
        assert_eq!(f.apply(Stick::Left, AbsoluteAxisType::ABS_X, 70_000), Some(32767));
        assert_eq!(f.apply(Stick::Left, AbsoluteAxisType::ABS_Y, -70_000), Some(-32768));
    }

    proptest! {
        #[test]
        fn inside_deadzone_settles_to_single_rest_write(a in -3499i32..3500, b in -3499i32..3500) {
            let mut f = filter();
            prop_assert_eq!(f.apply(Stick::Left, AbsoluteAxisType::ABS_X, a), Some(0));
            prop_assert_eq!(f.apply(Stick::Left, AbsoluteAxisType::ABS_X, b), None);
        }

        #[test]
        fn repeated_sample_never_writes_twice(v in -40_000i32..40_000, seed in -32768i32..32768) {
            let mut f = filter();
            f.seed(AbsoluteAxisType::ABS_RY, seed);
            let _ = f.apply(Stick::Right, AbsoluteAxisType::ABS_RY, v);
            prop_assert_eq!(f.apply(Stick::Right, AbsoluteAxisType::ABS_RY, v), None);
        }

        #[test]
        fn accepted_values_stay_in_stick_range(v in any::<i32>()) {
            let mut f = filter();
            if let Some(out) = f.apply(Stick::Left, AbsoluteAxisType::ABS_X, v) {
                prop_assert!((-32768..=32767).contains(&out));
            }
        }
    }
}
