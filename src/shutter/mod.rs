// SPDX-License-Identifier: GPL-3.0-only

//! Shutter button core
//!
//! Everything here is independent of the window: the activation state
//! machine, the layer model and its geometry, and animation sampling.
//!
//! - `geometry`: ring geometry as a pure function of the bounds
//! - `timing`: timing curves and pulse repeat counts
//! - `animation`: property animations sampled against a clock
//! - `layers`: outline, progress and pulse rings plus the gradient overlay
//! - `clock`: system and manual time sources
//! - `controller`: `ShutterButton` and its Idle/Capturing state machine
//! - `render`: per-frame snapshot for drawing
//! - `svg`: SVG documents for sampled frames

pub mod animation;
pub mod clock;
pub mod controller;
pub mod geometry;
pub mod layers;
pub mod render;
pub mod svg;
pub mod timing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{
    CaptureListener, CaptureState, CleanupTicket, ControlId, ShutterButton, schedule_cleanup,
};
pub use geometry::RingGeometry;
pub use render::{ProgressPaint, ShutterFrame};
pub use svg::render_svg;
