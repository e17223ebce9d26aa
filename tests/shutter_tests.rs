// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the shutter button lifecycle
//!
//! These drive the public API the way the host application does: tap,
//! wait for the scheduled cleanup, and hand the ticket back.

use cosmic::iced::Size;
use shutter_button::shutter::{
    CaptureListener, CaptureState, ManualClock, ProgressPaint, ShutterButton, render_svg,
    schedule_cleanup,
};
use shutter_button::simulate::{self, SimulationEvent, Timeline};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
struct Counter(AtomicUsize);

impl CaptureListener for Counter {
    fn on_capture_activated(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn laid_out(clock: Arc<ManualClock>) -> ShutterButton {
    let mut button = ShutterButton::with_clock(clock);
    button.layout(Size::new(80.0, 80.0));
    button
}

#[test]
fn test_tap_notifies_and_finishes_after_two_seconds() {
    let clock = Arc::new(ManualClock::new());
    let counter = Arc::new(Counter::default());
    let mut button = laid_out(clock.clone());
    button.set_listener(&counter);

    let ticket = button.activate().expect("idle button accepts a tap");
    assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    assert_eq!(ticket.delay, Duration::from_secs(2));
    assert!(!button.accepts_input());

    clock.set_elapsed(Duration::from_secs(1));
    let frame = button.frame().expect("laid out");
    assert!(frame.coverage > 0.0 && frame.coverage < 1.0);
    assert!(matches!(frame.progress_paint, ProgressPaint::Gradient { .. }));
    assert!(frame.pulse.is_some());

    clock.set_elapsed(Duration::from_secs(2));
    assert!(button.finish(ticket));
    assert_eq!(button.state(), CaptureState::Idle);

    // The full ring stays visible after cleanup, without gradient or pulse
    let frame = button.frame().expect("laid out");
    assert_eq!(frame.coverage, 1.0);
    assert!(matches!(frame.progress_paint, ProgressPaint::Solid(_)));
    assert!(frame.pulse.is_none());
}

#[test]
fn test_second_tap_is_ignored_until_cleanup() {
    let clock = Arc::new(ManualClock::new());
    let counter = Arc::new(Counter::default());
    let mut button = laid_out(clock.clone());
    button.set_listener(&counter);

    let first = button.activate().expect("first tap accepted");
    clock.set_elapsed(Duration::from_secs(1));
    assert!(button.activate().is_none());
    assert_eq!(counter.0.load(Ordering::SeqCst), 1);

    clock.set_elapsed(Duration::from_secs(2));
    assert!(button.finish(first));
    assert!(button.activate().is_some());
    assert_eq!(counter.0.load(Ordering::SeqCst), 2);
}

#[test]
fn test_dropped_listener_is_skipped() {
    let mut button = laid_out(Arc::new(ManualClock::new()));
    let counter = Arc::new(Counter::default());
    button.set_listener(&counter);
    drop(counter);

    assert!(button.activate().is_some());
    assert!(button.is_capturing());
}

#[test]
fn test_ticket_from_another_button_is_rejected() {
    let clock = Arc::new(ManualClock::new());
    let mut first = laid_out(clock.clone());
    let mut second = laid_out(clock);

    let ticket = first.activate().expect("tap accepted");
    second.activate().expect("tap accepted");

    assert!(!second.finish(ticket));
    assert!(second.is_capturing());
    assert!(first.finish(ticket));
}

#[test]
fn test_rendered_frames() {
    let clock = Arc::new(ManualClock::new());
    let mut button = laid_out(clock.clone());

    let idle = render_svg(&button.frame().expect("laid out"));
    assert!(idle.starts_with("<svg"));
    assert!(!idle.contains("<mask"));

    button.activate();
    clock.set_elapsed(Duration::from_millis(500));
    let capturing = render_svg(&button.frame().expect("laid out"));
    assert!(capturing.contains("<mask"));
    assert!(capturing.contains("<linearGradient"));
}

#[test]
fn test_relayout_during_capture_keeps_animation() {
    let clock = Arc::new(ManualClock::new());
    let mut button = laid_out(clock.clone());
    button.activate();

    clock.set_elapsed(Duration::from_secs(1));
    button.layout(Size::new(120.0, 120.0));

    let frame = button.frame().expect("laid out");
    assert_eq!(frame.bounds, Size::new(120.0, 120.0));
    assert_eq!(frame.progress.radius, 60.0);
    assert!(frame.coverage > 0.0 && frame.coverage < 1.0);
    assert!(button.is_capturing());
}

#[tokio::test(start_paused = true)]
async fn test_scheduled_cleanup_after_button_dropped() {
    let mut button = ShutterButton::new();
    button.layout(Size::new(80.0, 80.0));
    let ticket = button.activate().expect("tap accepted");
    drop(button);

    // The pending cleanup outlives the button and resolves to a ticket no
    // live button owns
    let returned = schedule_cleanup(ticket).await;
    let mut replacement = ShutterButton::new();
    assert!(!replacement.finish(returned));
}

#[test]
fn test_simulated_destroy_mid_capture() {
    let destroy_at = Some(Duration::from_secs(1));
    let timeline = Timeline::new(vec![Duration::ZERO], destroy_at, 80.0).expect("valid timeline");
    let report = simulate::run(&timeline);

    let last = (Duration::from_secs(2), SimulationEvent::Cleanup { applied: false });
    assert_eq!(report.notifications, 1);
    assert_eq!(report.events.last(), Some(&last));
}
