// SPDX-License-Identifier: GPL-3.0-only

//! Basic property animations
//!
//! A [`BasicAnimation`] interpolates one scalar property of a layer between
//! two values. It is attached to a layer at a begin instant and sampled at
//! render time.

use super::timing::TimingCurve;
use std::time::{Duration, Instant};

/// Layer property an animation drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// Fraction of the path that is stroked, `0.0..=1.0`
    StrokeEnd,
    /// Uniform scale about the layer center
    Scale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasicAnimation {
    pub property: AnimatedProperty,
    pub from: f32,
    pub to: f32,
    /// Length of one forward pass
    pub duration: Duration,
    pub curve: TimingCurve,
    /// Play backwards after each forward pass
    pub autoreverses: bool,
    /// Number of cycles; fractional counts stop part-way. Values below one
    /// play a single cycle.
    pub repeat_count: f32,
    /// Keep presenting the final value after the animation has finished
    pub fill_forwards: bool,
    pub begin: Instant,
}

impl BasicAnimation {
    /// Single forward pass from `from` to `to`
    pub fn new(
        property: AnimatedProperty,
        from: f32,
        to: f32,
        duration: Duration,
        begin: Instant,
    ) -> Self {
        Self {
            property,
            from,
            to,
            duration,
            curve: TimingCurve::Linear,
            autoreverses: false,
            repeat_count: 1.0,
            fill_forwards: false,
            begin,
        }
    }

    pub fn curve(mut self, curve: TimingCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn autoreverses(mut self, autoreverses: bool) -> Self {
        self.autoreverses = autoreverses;
        self
    }

    pub fn repeat_count(mut self, repeat_count: f32) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    pub fn fill_forwards(mut self, fill_forwards: bool) -> Self {
        self.fill_forwards = fill_forwards;
        self
    }

    /// Length of one cycle, including the reverse pass
    pub fn cycle_duration(&self) -> Duration {
        if self.autoreverses {
            self.duration * 2
        } else {
            self.duration
        }
    }

    /// Total active time over all repeats
    pub fn active_duration(&self) -> Duration {
        self.cycle_duration().mul_f32(self.repeat_count.max(1.0))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.begin) >= self.active_duration()
    }

    /// Value the property presents at `now`
    ///
    /// Returns `None` once the animation has finished without fill-forward,
    /// meaning the layer's own model value shows through.
    pub fn sample(&self, now: Instant) -> Option<f32> {
        if self.is_finished(now) {
            let active = self.active_duration();
            return self.fill_forwards.then(|| self.value_at_offset(active));
        }

        Some(self.value_at_offset(now.saturating_duration_since(self.begin)))
    }

    fn value_at_offset(&self, offset: Duration) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }

        let pass = self.duration.as_secs_f32();
        let cycle = self.cycle_duration().as_secs_f32();
        let offset = offset.as_secs_f32();

        // Offset within the current cycle; the exact end of a cycle stays at
        // the end rather than wrapping to the start.
        let mut local = offset % cycle;
        if local == 0.0 && offset > 0.0 {
            local = cycle;
        }

        let forward = if local <= pass {
            local / pass
        } else {
            // Reverse pass replays the curve backwards
            1.0 - (local - pass) / pass
        };

        let eased = self.curve.apply(forward);
        self.from + (self.to - self.from) * eased
    }
}
