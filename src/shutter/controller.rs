// SPDX-License-Identifier: GPL-3.0-only

//! Capture animation state machine
//!
//! A tap moves the button from `Idle` to `Capturing`: input is disabled, the
//! pulse and progress animations start, the gradient overlay is attached and
//! the listener is told the capture began. The host then waits for the
//! returned [`CleanupTicket`] to come due and hands it back to
//! [`ShutterButton::finish`], which tears the animation down and re-enables
//! input.
//!
//! The ticket only names the control; it never owns it. A ticket that
//! arrives for a control that no longer exists, or for an activation that has
//! already been cleaned up, is simply dropped.

use super::animation::{AnimatedProperty, BasicAnimation};
use super::clock::{Clock, SystemClock};
use super::geometry::RingGeometry;
use super::layers::{AnimationKey, LayerSet};
use super::timing::{TimingCurve, pulse_repeat_count};
use crate::constants::shutter::{ANIMATION_DURATION, PULSE_DURATION, PULSE_SCALE};
use cosmic::iced::{Point, Size};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Receives capture notifications from a [`ShutterButton`]
///
/// The button holds its listener weakly; a listener that has been dropped
/// is skipped.
pub trait CaptureListener: Send + Sync {
    /// Called synchronously when a capture starts, before its animation
    /// completes
    fn on_capture_activated(&self);
}

/// Process-unique identity of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(u64);

impl ControlId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ControlId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle for one pending cleanup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupTicket {
    pub control: ControlId,
    pub activation: u64,
    /// Delay from activation until the cleanup should run
    pub delay: Duration,
}

/// Activation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// Waiting for a tap
    #[default]
    Idle,
    /// Capture animation running; taps are ignored
    Capturing {
        /// Serial of this activation
        activation: u64,
        /// When the tap was accepted
        started_at: Instant,
    },
}

impl CaptureState {
    pub fn is_capturing(&self) -> bool {
        matches!(self, CaptureState::Capturing { .. })
    }
}

/// Circular shutter button with its layers and activation state
pub struct ShutterButton {
    id: ControlId,
    state: CaptureState,
    /// Serial handed to the next activation
    next_activation: u64,
    layers: LayerSet,
    /// Bounds reported by the last layout pass
    bounds: Option<Size>,
    listener: Option<Weak<dyn CaptureListener>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ShutterButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutterButton")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("bounds", &self.bounds)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl Default for ShutterButton {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutterButton {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a button that samples time from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            id: ControlId::next(),
            state: CaptureState::Idle,
            next_activation: 1,
            layers: LayerSet::new(RingGeometry::from_bounds(Size::ZERO)),
            bounds: None,
            listener: None,
            clock,
        }
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_capturing(&self) -> bool {
        self.state.is_capturing()
    }

    /// Whether a tap would currently be accepted
    pub fn accepts_input(&self) -> bool {
        !self.state.is_capturing()
    }

    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    pub fn bounds(&self) -> Option<Size> {
        self.bounds
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Register the listener; only a weak reference is kept
    pub fn set_listener<L>(&mut self, listener: &Arc<L>)
    where
        L: CaptureListener + 'static,
    {
        let listener: Arc<dyn CaptureListener> = listener.clone();
        self.listener = Some(Arc::downgrade(&listener));
    }

    /// Recompute layer geometry for new bounds
    ///
    /// Safe to call on every layout pass; returns `true` if the bounds
    /// changed.
    pub fn layout(&mut self, bounds: Size) -> bool {
        if self.bounds == Some(bounds) {
            return false;
        }

        let geometry = RingGeometry::from_bounds(bounds);
        if !geometry.is_square() {
            warn!(
                width = bounds.width,
                height = bounds.height,
                "Shutter button bounds are not square, using width as diameter"
            );
        }

        debug!(?bounds, "Laying out shutter button");
        self.layers.relayout(geometry);
        self.bounds = Some(bounds);
        true
    }

    /// Whether a tap at `point`, in the button's local coordinates, lands on
    /// the circle
    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds.is_some() && self.layers.geometry.contains(point)
    }

    /// Handle a tap
    ///
    /// Returns the ticket for the deferred cleanup, or `None` if the tap was
    /// dropped because a capture is already running.
    pub fn activate(&mut self) -> Option<CleanupTicket> {
        if let CaptureState::Capturing { activation, .. } = self.state {
            trace!(control = ?self.id, activation, "Ignoring tap while capturing");
            return None;
        }

        let now = self.clock.now();
        let activation = self.next_activation;
        self.next_activation += 1;

        // Input is disabled from here until cleanup
        self.state = CaptureState::Capturing {
            activation,
            started_at: now,
        };

        self.start_pulse(now);
        self.start_progress(now);
        self.layers.attach_gradient();

        let ticket = CleanupTicket {
            control: self.id,
            activation,
            delay: ANIMATION_DURATION,
        };

        info!(control = ?self.id, activation, "Capture started");
        self.notify_listener();

        Some(ticket)
    }

    fn start_pulse(&mut self, now: Instant) {
        let pulse = &mut self.layers.pulse;
        pulse.hidden = false;
        pulse.add_animation(
            AnimationKey::Pulse,
            BasicAnimation::new(
                AnimatedProperty::Scale,
                pulse.scale,
                PULSE_SCALE,
                PULSE_DURATION,
                now,
            )
            .curve(TimingCurve::EaseIn)
            .autoreverses(true)
            .repeat_count(pulse_repeat_count(
                ANIMATION_DURATION,
                PULSE_DURATION,
                true,
            )),
        );
    }

    fn start_progress(&mut self, now: Instant) {
        let progress = &mut self.layers.progress;
        progress.add_animation(
            AnimationKey::Progress,
            BasicAnimation::new(
                AnimatedProperty::StrokeEnd,
                0.0,
                1.0,
                ANIMATION_DURATION,
                now,
            )
            .curve(TimingCurve::EaseInEaseOut)
            .fill_forwards(true),
        );
        // The full ring stays drawn once the animation object is removed
        progress.stroke_end = 1.0;
    }

    fn notify_listener(&self) {
        match self.listener.as_ref().and_then(Weak::upgrade) {
            Some(listener) => listener.on_capture_activated(),
            None => debug!(control = ?self.id, "No capture listener attached"),
        }
    }

    /// Whether `ticket` refers to the capture currently running on this
    /// button
    pub fn owns(&self, ticket: &CleanupTicket) -> bool {
        ticket.control == self.id
            && matches!(
                self.state,
                CaptureState::Capturing { activation, .. } if activation == ticket.activation
            )
    }

    /// Run the deferred cleanup for `ticket`
    ///
    /// Removes running animations, hides the pulse ring, drops the gradient
    /// overlay and re-enables input. Returns `false` without touching
    /// anything if the ticket is stale or belongs to another control.
    pub fn finish(&mut self, ticket: CleanupTicket) -> bool {
        if !self.owns(&ticket) {
            debug!(
                control = ?self.id,
                ?ticket,
                "Ignoring cleanup for another control or a finished capture"
            );
            return false;
        }

        self.layers.progress.remove_all_animations();
        self.layers.pulse.remove_all_animations();
        self.layers.pulse.hidden = true;
        self.layers.detach_gradient();
        self.state = CaptureState::Idle;

        info!(control = ?self.id, activation = ticket.activation, "Capture finished");
        true
    }

    /// Time left until the running capture's cleanup is due
    pub fn remaining(&self) -> Option<Duration> {
        match self.state {
            CaptureState::Idle => None,
            CaptureState::Capturing { started_at, .. } => {
                let elapsed = self.clock.now().saturating_duration_since(started_at);
                Some(ANIMATION_DURATION.saturating_sub(elapsed))
            }
        }
    }
}

/// Wait out a ticket's delay and hand it back
///
/// The future holds only the ticket, so dropping the button while it is
/// pending is harmless; [`ShutterButton::finish`] rejects the ticket if the
/// control is gone or has moved on.
pub async fn schedule_cleanup(ticket: CleanupTicket) -> CleanupTicket {
    tokio::time::sleep(ticket.delay).await;
    ticket
}
