// SPDX-License-Identifier: GPL-3.0-only

//! Frame sampling
//!
//! Resolves the layer set against the clock into plain values the widget can
//! draw without knowing about animations.

use super::controller::ShutterButton;
use super::geometry::{ArcPath, Circle};
use super::layers::{GradientOverlay, RingStyle};
use cosmic::iced::Size;

/// How the progress arc is painted
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressPaint {
    /// Flat stroke color of the progress ring
    Solid(RingStyle),
    /// Gradient overlay shown through the ring, which keeps its stroke
    /// width and cap as the mask shape
    Gradient {
        mask: RingStyle,
        overlay: GradientOverlay,
    },
}

/// Everything needed to draw one frame of the button
#[derive(Debug, Clone, PartialEq)]
pub struct ShutterFrame {
    /// Bounds the geometry was laid out for
    pub bounds: Size,
    pub outline: (Circle, RingStyle),
    pub progress: ArcPath,
    /// Fraction of the progress path that is stroked
    pub coverage: f32,
    pub progress_paint: ProgressPaint,
    /// Pulse ring with its current scale; `None` while hidden
    pub pulse: Option<(Circle, RingStyle, f32)>,
}

impl ShutterButton {
    /// Sample the current frame
    ///
    /// Returns `None` until the button has been laid out.
    pub fn frame(&self) -> Option<ShutterFrame> {
        self.bounds()?;

        let now = self.now();
        let layers = self.layers();
        let geometry = &layers.geometry;

        let progress_paint = match &layers.gradient {
            Some(overlay) => ProgressPaint::Gradient {
                mask: layers.progress.style,
                overlay: overlay.clone(),
            },
            None => ProgressPaint::Solid(layers.progress.style),
        };

        let pulse = (!layers.pulse.hidden).then(|| {
            (
                geometry.pulse,
                layers.pulse.style,
                layers.pulse.presented_scale(now),
            )
        });

        Some(ShutterFrame {
            bounds: geometry.bounds,
            outline: (geometry.outline, layers.outline.style),
            progress: geometry.progress,
            coverage: layers.progress.presented_stroke_end(now),
            progress_paint,
            pulse,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutter::clock::ManualClock;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_no_frame_before_layout() {
        let button = ShutterButton::new();
        assert!(button.frame().is_none());
    }

    #[test]
    fn test_idle_frame() {
        let mut button = ShutterButton::new();
        button.layout(Size::new(80.0, 80.0));
        let frame = button.frame().unwrap();

        assert_eq!(frame.coverage, 0.0);
        assert!(frame.pulse.is_none());
        assert!(matches!(frame.progress_paint, ProgressPaint::Solid(_)));
        assert_eq!(frame.outline.0.radius, 35.0);
    }

    #[test]
    fn test_capturing_frame_uses_gradient() {
        let clock = Arc::new(ManualClock::new());
        let mut button = ShutterButton::with_clock(clock.clone());
        button.layout(Size::new(80.0, 80.0));
        button.activate().unwrap();

        clock.advance(Duration::from_secs(1));
        let frame = button.frame().unwrap();

        assert!((frame.coverage - 0.5).abs() < 1e-3);
        assert!(frame.pulse.is_some());
        match frame.progress_paint {
            ProgressPaint::Gradient { mask, overlay } => {
                assert_eq!(mask.width, 6.0);
                assert_eq!(overlay.stops.len(), 3);
            }
            ProgressPaint::Solid(_) => panic!("expected gradient while capturing"),
        }
    }
}
