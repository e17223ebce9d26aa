// SPDX-License-Identifier: GPL-3.0-only

//! Media timing curves
//!
//! Curves are unit cubic Béziers through (0, 0) and (1, 1), described by
//! their two inner control points, the same way platform animation
//! frameworks name them.

use std::time::Duration;

/// Named timing curves used by the button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimingCurve {
    /// Constant speed
    #[default]
    Linear,
    /// Slow start, cubic-bezier(0.42, 0, 1, 1)
    EaseIn,
    /// Slow start and end, cubic-bezier(0.42, 0, 0.58, 1)
    EaseInEaseOut,
}

impl TimingCurve {
    /// Inner control points `(x1, y1, x2, y2)`
    fn control_points(self) -> (f32, f32, f32, f32) {
        match self {
            TimingCurve::Linear => (0.0, 0.0, 1.0, 1.0),
            TimingCurve::EaseIn => (0.42, 0.0, 1.0, 1.0),
            TimingCurve::EaseInEaseOut => (0.42, 0.0, 0.58, 1.0),
        }
    }

    /// Map linear progress `t` in `[0, 1]` to eased progress
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if self == TimingCurve::Linear || t == 0.0 || t == 1.0 {
            return t;
        }

        let (x1, y1, x2, y2) = self.control_points();
        let s = solve_parameter(t, x1, x2);
        bezier(s, y1, y2)
    }
}

/// One coordinate of the unit cubic Bézier with inner controls `p1`, `p2`
fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find the curve parameter whose x coordinate equals `x`
///
/// Newton iterations first; falls back to bisection where the slope is flat.
fn solve_parameter(x: f32, x1: f32, x2: f32) -> f32 {
    const EPSILON: f32 = 1e-6;

    let mut s = x;
    for _ in 0..8 {
        let error = bezier(s, x1, x2) - x;
        if error.abs() < EPSILON {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < EPSILON {
            break;
        }
        s -= error / slope;
    }

    let (mut low, mut high) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let value = bezier(s, x1, x2);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            low = s;
        } else {
            high = s;
        }
        s = (low + high) / 2.0;
    }
    s
}

/// Number of pulse cycles that fill `total`
///
/// An autoreversing pulse takes twice its single duration per cycle. The
/// count may be fractional; the animation stops part-way through the last
/// cycle.
pub fn pulse_repeat_count(total: Duration, single: Duration, autoreverses: bool) -> f32 {
    let cycle = if autoreverses { single * 2 } else { single };
    if cycle.is_zero() {
        return 0.0;
    }
    total.as_secs_f32() / cycle.as_secs_f32()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_hit_endpoints() {
        for curve in [
            TimingCurve::Linear,
            TimingCurve::EaseIn,
            TimingCurve::EaseInEaseOut,
        ] {
            assert_eq!(curve.apply(0.0), 0.0);
            assert_eq!(curve.apply(1.0), 1.0);
            assert_eq!(curve.apply(-1.0), 0.0);
            assert_eq!(curve.apply(2.0), 1.0);
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let curve = TimingCurve::EaseInEaseOut;
        assert!((curve.apply(0.5) - 0.5).abs() < 1e-3);
        let a = curve.apply(0.25);
        let b = curve.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-3);
        assert!(a < 0.25, "ease-in-out starts slow: {a}");
    }

    #[test]
    fn test_ease_in_starts_slow() {
        let curve = TimingCurve::EaseIn;
        assert!(curve.apply(0.25) < 0.25);
        assert!(curve.apply(0.5) < 0.5);
    }

    #[test]
    fn test_curves_are_monotonic() {
        for curve in [TimingCurve::EaseIn, TimingCurve::EaseInEaseOut] {
            let mut previous = 0.0;
            for step in 1..=100 {
                let value = curve.apply(step as f32 / 100.0);
                assert!(value + 1e-4 >= previous, "{curve:?} at step {step}");
                previous = value;
            }
        }
    }

    #[test]
    fn test_pulse_repeat_count() {
        let total = Duration::from_secs(2);
        let single = Duration::from_millis(500);
        assert_eq!(pulse_repeat_count(total, single, true), 2.0);
        assert_eq!(pulse_repeat_count(total, single, false), 4.0);
        assert_eq!(pulse_repeat_count(total, Duration::ZERO, true), 0.0);
    }
}
