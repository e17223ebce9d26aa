// SPDX-License-Identifier: GPL-3.0-only

//! Ring geometry derived from the control bounds
//!
//! Everything here is a pure function of the bounds so the button can be
//! re-laid out at any time.

use crate::constants::shutter::{OUTLINE_WIDTH, PROGRESS_WIDTH};
use cosmic::iced::{Point, Rectangle, Size};
use std::f32::consts::{FRAC_PI_2, PI};

/// Where the progress arc starts (12 o'clock)
pub const ARC_START_ANGLE: f32 = -FRAC_PI_2;

/// Where the progress arc ends
///
/// The path overshoots a full turn by a quarter, so stroke coverage is
/// measured against the whole 2.5π sweep.
pub const ARC_END_ANGLE: f32 = 2.0 * PI;

/// A circle stroked with a given width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
}

/// A clockwise arc from `start_angle` to `end_angle` (radians, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub center: Point,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
}

impl ArcPath {
    /// Total angle covered by the full path
    pub fn sweep(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    /// End angle of the leading `coverage` fraction of the path
    pub fn end_angle_at(&self, coverage: f32) -> f32 {
        self.start_angle + self.sweep() * coverage.clamp(0.0, 1.0)
    }
}

/// Static geometry of every layer of the button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    /// Bounds the geometry was computed from, at the origin
    pub bounds: Size,
    /// Black outline, inset by its own stroke width
    pub outline: Circle,
    /// Progress path around the full bounds
    pub progress: ArcPath,
    /// Pulse ring path (shares the outline circle)
    pub pulse: Circle,
    /// Frame of the gradient overlay
    pub gradient_frame: Rectangle,
    /// Corner radius of the gradient overlay
    pub gradient_corner_radius: f32,
}

impl RingGeometry {
    /// Compute all layer geometry for the given bounds
    ///
    /// The control is meant to be square. For other bounds the width is
    /// used as the diameter.
    pub fn from_bounds(bounds: Size) -> Self {
        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let radius = bounds.width / 2.0;

        let outline = Circle {
            center,
            radius: ((bounds.width - OUTLINE_WIDTH * 2.0) / 2.0).max(0.0),
        };

        Self {
            bounds,
            outline,
            progress: ArcPath {
                center,
                radius,
                start_angle: ARC_START_ANGLE,
                end_angle: ARC_END_ANGLE,
            },
            pulse: outline,
            gradient_frame: Rectangle::new(Point::ORIGIN, bounds),
            gradient_corner_radius: radius,
        }
    }

    /// Whether the bounds satisfy the square-control invariant
    pub fn is_square(&self) -> bool {
        (self.bounds.width - self.bounds.height).abs() < f32::EPSILON
    }

    /// Hit test in local coordinates against the outer circle of the button
    pub fn contains(&self, point: Point) -> bool {
        self.progress.center.distance(point) <= self.progress.radius + PROGRESS_WIDTH / 2.0
    }
}
