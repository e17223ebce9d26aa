// SPDX-License-Identifier: GPL-3.0-only

//! Drawable layers of the shutter button
//!
//! Three shape layers live as long as the control: the black outline, the
//! progress ring and the pulse ring. The gradient overlay only exists while a
//! capture is running and uses the progress ring as its mask.

use super::animation::{AnimatedProperty, BasicAnimation};
use super::geometry::RingGeometry;
use crate::constants::shutter::{
    ACCENT, GRADIENT_STOPS, OUTLINE_COLOR, OUTLINE_WIDTH, PROGRESS_WIDTH, PULSE_COLOR, PULSE_WIDTH,
};
use cosmic::iced::{Color, Point, Rectangle};
use std::time::Instant;

/// How a ring's stroke ends are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// Stroke style of a ring; rings are never filled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingStyle {
    pub color: Color,
    pub width: f32,
    pub line_cap: LineCap,
}

/// Key an animation is attached under; adding a second animation under the
/// same key replaces the first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    Progress,
    Pulse,
}

/// A stroked shape with model values and attached animations
#[derive(Debug, Clone)]
pub struct ShapeLayer {
    pub style: RingStyle,
    /// Model value of the stroked fraction
    pub stroke_end: f32,
    /// Model value of the scale about the layer center
    pub scale: f32,
    pub hidden: bool,
    animations: Vec<(AnimationKey, BasicAnimation)>,
}

impl ShapeLayer {
    pub fn new(style: RingStyle) -> Self {
        Self {
            style,
            stroke_end: 1.0,
            scale: 1.0,
            hidden: false,
            animations: Vec::new(),
        }
    }

    pub fn add_animation(&mut self, key: AnimationKey, animation: BasicAnimation) {
        self.animations.retain(|(existing, _)| *existing != key);
        self.animations.push((key, animation));
    }

    pub fn remove_all_animations(&mut self) {
        self.animations.clear();
    }

    pub fn has_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    pub fn animation(&self, key: AnimationKey) -> Option<&BasicAnimation> {
        self.animations
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, animation)| animation)
    }

    /// Presentation value of a property: the last attached animation that
    /// still presents a value wins, otherwise the model value
    fn presented(&self, property: AnimatedProperty, model: f32, now: Instant) -> f32 {
        self.animations
            .iter()
            .rev()
            .filter(|(_, animation)| animation.property == property)
            .find_map(|(_, animation)| animation.sample(now))
            .unwrap_or(model)
    }

    pub fn presented_stroke_end(&self, now: Instant) -> f32 {
        self.presented(AnimatedProperty::StrokeEnd, self.stroke_end, now)
            .clamp(0.0, 1.0)
    }

    pub fn presented_scale(&self, now: Instant) -> f32 {
        self.presented(AnimatedProperty::Scale, self.scale, now)
    }
}

/// Horizontal three-stop gradient shown through the progress ring
#[derive(Debug, Clone, PartialEq)]
pub struct GradientOverlay {
    pub frame: Rectangle,
    pub corner_radius: f32,
    pub stops: [Color; 3],
    /// Start of the gradient axis in unit coordinates of `frame`
    pub start: Point,
    /// End of the gradient axis in unit coordinates of `frame`
    pub end: Point,
}

impl GradientOverlay {
    pub fn new(geometry: &RingGeometry) -> Self {
        Self {
            frame: geometry.gradient_frame,
            corner_radius: geometry.gradient_corner_radius,
            stops: GRADIENT_STOPS,
            start: Point::new(0.0, 1.0),
            end: Point::new(1.0, 1.0),
        }
    }

    /// Gradient axis in the frame's coordinate space
    pub fn axis(&self) -> (Point, Point) {
        let to_frame = |unit: Point| {
            Point::new(
                self.frame.x + unit.x * self.frame.width,
                self.frame.y + unit.y * self.frame.height,
            )
        };
        (to_frame(self.start), to_frame(self.end))
    }

    /// Evenly spaced stop offsets paired with their colors
    pub fn offsets(&self) -> impl Iterator<Item = (f32, Color)> + '_ {
        let last = (self.stops.len() - 1) as f32;
        self.stops
            .iter()
            .enumerate()
            .map(move |(index, color)| (index as f32 / last, *color))
    }
}

/// Every layer owned by one button
#[derive(Debug, Clone)]
pub struct LayerSet {
    pub geometry: RingGeometry,
    pub outline: ShapeLayer,
    pub progress: ShapeLayer,
    pub pulse: ShapeLayer,
    /// Present only while capturing; masked by `progress`
    pub gradient: Option<GradientOverlay>,
}

impl LayerSet {
    /// Configure the three persistent layers for the given geometry
    pub fn new(geometry: RingGeometry) -> Self {
        let outline = ShapeLayer::new(RingStyle {
            color: OUTLINE_COLOR,
            width: OUTLINE_WIDTH,
            line_cap: LineCap::Butt,
        });

        let mut progress = ShapeLayer::new(RingStyle {
            color: ACCENT,
            width: PROGRESS_WIDTH,
            line_cap: LineCap::Round,
        });
        progress.stroke_end = 0.0;

        let mut pulse = ShapeLayer::new(RingStyle {
            color: PULSE_COLOR,
            width: PULSE_WIDTH,
            line_cap: LineCap::Butt,
        });
        pulse.hidden = true;

        Self {
            geometry,
            outline,
            progress,
            pulse,
            gradient: None,
        }
    }

    /// Swap in new geometry, keeping model values and running animations
    pub fn relayout(&mut self, geometry: RingGeometry) {
        self.geometry = geometry;
        if let Some(gradient) = self.gradient.as_mut() {
            gradient.frame = geometry.gradient_frame;
            gradient.corner_radius = geometry.gradient_corner_radius;
        }
    }

    /// Attach a fresh gradient overlay masked by the progress ring
    pub fn attach_gradient(&mut self) {
        self.gradient = Some(GradientOverlay::new(&self.geometry));
    }

    pub fn detach_gradient(&mut self) {
        self.gradient = None;
    }
}
