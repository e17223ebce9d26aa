// SPDX-License-Identifier: GPL-3.0-only

//! Headless replay of a tap timeline
//!
//! Drives a [`ShutterButton`] with a manual clock so the activation state
//! machine can be exercised without a window: taps at fixed offsets, the
//! deferred cleanups they schedule, and optionally destroying the control
//! part-way through.

use crate::errors::TimelineError;
use crate::shutter::{CaptureListener, CleanupTicket, ManualClock, ShutterButton};
use cosmic::iced::Size;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Latest offset a timeline may use (one day)
pub const MAX_OFFSET: Duration = Duration::from_secs(24 * 60 * 60);

/// Input to a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    /// Offsets of each tap from the start
    pub taps: Vec<Duration>,
    /// Offset at which the control is dropped
    pub destroy_at: Option<Duration>,
    /// Side length of the square control
    pub size: f32,
}

impl Timeline {
    pub fn new(
        taps: Vec<Duration>,
        destroy_at: Option<Duration>,
        size: f32,
    ) -> Result<Self, TimelineError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(TimelineError::InvalidSize(size));
        }

        if let Some(late) = taps
            .iter()
            .chain(destroy_at.iter())
            .find(|offset| **offset > MAX_OFFSET)
        {
            return Err(TimelineError::OutOfRange(late.as_secs_f64()));
        }

        Ok(Self {
            taps,
            destroy_at,
            size,
        })
    }
}

/// Parse a single offset in seconds, e.g. `1.5`
pub fn parse_time(value: &str) -> Result<Duration, TimelineError> {
    let seconds: f64 = value
        .trim()
        .parse()
        .map_err(|_| TimelineError::InvalidTime(value.to_string()))?;

    if !seconds.is_finite() || seconds < 0.0 || seconds > MAX_OFFSET.as_secs_f64() {
        return Err(TimelineError::OutOfRange(seconds));
    }

    Duration::try_from_secs_f64(seconds).map_err(|_| TimelineError::OutOfRange(seconds))
}

/// Parse a comma-separated list of offsets, e.g. `0,1.0,2.5`
pub fn parse_times(value: &str) -> Result<Vec<Duration>, TimelineError> {
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(parse_time)
        .collect()
}

/// Something that happened during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEvent {
    /// A tap was delivered; `accepted` is false if it was dropped
    Tap { accepted: bool },
    /// The listener was told a capture started
    Notified,
    /// A deferred cleanup came due; `applied` is false if it was a no-op
    Cleanup { applied: bool },
    /// The control was dropped
    Destroyed,
}

impl fmt::Display for SimulationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationEvent::Tap { accepted: true } => {
                write!(f, "tap accepted, capture started")
            }
            SimulationEvent::Tap { accepted: false } => write!(f, "tap ignored"),
            SimulationEvent::Notified => write!(f, "listener notified"),
            SimulationEvent::Cleanup { applied: true } => write!(f, "cleanup ran, button idle"),
            SimulationEvent::Cleanup { applied: false } => write!(f, "cleanup skipped"),
            SimulationEvent::Destroyed => write!(f, "button destroyed"),
        }
    }
}

/// Outcome of a run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimulationReport {
    pub events: Vec<(Duration, SimulationEvent)>,
    pub notifications: usize,
    /// Whether the control still exists and accepts input at the end
    pub idle_at_end: Option<bool>,
}

impl SimulationReport {
    fn push(&mut self, at: Duration, event: SimulationEvent) {
        info!(at = at.as_secs_f64(), %event, "Simulation event");
        self.events.push((at, event));
    }
}

#[derive(Default)]
struct NotificationCounter {
    count: AtomicUsize,
}

impl CaptureListener for NotificationCounter {
    fn on_capture_activated(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Next thing to happen; variants are ordered by priority at equal times
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Pending {
    Cleanup,
    Destroy,
    Tap,
}

/// Replay `timeline` and report what happened
pub fn run(timeline: &Timeline) -> SimulationReport {
    let clock = Arc::new(ManualClock::new());
    let listener = Arc::new(NotificationCounter::default());

    let mut button = Some(ShutterButton::with_clock(clock.clone()));
    if let Some(button) = button.as_mut() {
        button.set_listener(&listener);
        button.layout(Size::new(timeline.size, timeline.size));
    }

    let mut taps = timeline.taps.clone();
    taps.sort();
    let mut taps = taps.into_iter().peekable();
    let mut destroy_at = timeline.destroy_at;
    let mut cleanups: Vec<(Duration, CleanupTicket)> = Vec::new();
    let mut report = SimulationReport::default();

    loop {
        let next_cleanup = cleanups.iter().map(|(due, _)| *due).min();
        let candidates = [
            next_cleanup.map(|at| (at, Pending::Cleanup)),
            destroy_at.map(|at| (at, Pending::Destroy)),
            taps.peek().map(|at| (*at, Pending::Tap)),
        ];
        let Some((at, next)) = candidates.into_iter().flatten().min() else {
            break;
        };

        if !clock.set_elapsed(at) {
            warn!(at = at.as_secs_f64(), "Offset past the end of the clock, stopping");
            break;
        }

        match next {
            Pending::Cleanup => {
                let index = cleanups
                    .iter()
                    .position(|(due, _)| *due == at)
                    .unwrap_or_default();
                let (_, ticket) = cleanups.remove(index);
                let applied = button.as_mut().is_some_and(|b| b.finish(ticket));
                if !applied {
                    debug!(?ticket, "Cleanup found no live capture");
                }
                report.push(at, SimulationEvent::Cleanup { applied });
            }
            Pending::Destroy => {
                destroy_at = None;
                if button.take().is_some() {
                    report.push(at, SimulationEvent::Destroyed);
                }
            }
            Pending::Tap => {
                taps.next();
                let Some(button) = button.as_mut() else {
                    debug!(at = at.as_secs_f64(), "Tap after the button was destroyed");
                    continue;
                };

                let before = listener.count.load(Ordering::SeqCst);
                let ticket = button.activate();
                report.push(
                    at,
                    SimulationEvent::Tap {
                        accepted: ticket.is_some(),
                    },
                );

                if listener.count.load(Ordering::SeqCst) > before {
                    report.push(at, SimulationEvent::Notified);
                }

                if let Some(ticket) = ticket {
                    match at.checked_add(ticket.delay) {
                        Some(due) => cleanups.push((due, ticket)),
                        None => warn!(?ticket, "Cleanup would fall past the end of the clock"),
                    }
                }
            }
        }
    }

    report.notifications = listener.count.load(Ordering::SeqCst);
    report.idle_at_end = button.as_ref().map(|b| b.accepts_input());
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(value: f64) -> Duration {
        Duration::from_secs_f64(value)
    }

    #[test]
    fn test_parse_times() {
        assert_eq!(
            parse_times("0, 1.0,2.5").unwrap(),
            vec![secs(0.0), secs(1.0), secs(2.5)]
        );
        assert_eq!(parse_times("").unwrap(), Vec::<Duration>::new());
        assert_eq!(
            parse_times("abc"),
            Err(TimelineError::InvalidTime("abc".to_string()))
        );
        assert_eq!(parse_times("-1"), Err(TimelineError::OutOfRange(-1.0)));
    }

    #[test]
    fn test_huge_offsets_are_out_of_range() {
        assert_eq!(parse_time("1e20"), Err(TimelineError::OutOfRange(1e20)));
        assert_eq!(parse_time("1e19"), Err(TimelineError::OutOfRange(1e19)));
        assert_eq!(parse_time("86400"), Ok(MAX_OFFSET));
        assert_eq!(
            Timeline::new(vec![Duration::MAX], None, 80.0),
            Err(TimelineError::OutOfRange(Duration::MAX.as_secs_f64()))
        );
    }

    #[test]
    fn test_run_stops_at_unrepresentable_offset() {
        let timeline = Timeline {
            taps: vec![secs(0.0), Duration::MAX],
            destroy_at: None,
            size: 80.0,
        };
        let report = run(&timeline);

        assert_eq!(report.notifications, 1);
        assert_eq!(report.events.len(), 3);
    }

    #[test]
    fn test_invalid_size() {
        assert_eq!(
            Timeline::new(vec![], None, 0.0),
            Err(TimelineError::InvalidSize(0.0))
        );
    }

    #[test]
    fn test_single_tap() {
        let timeline = Timeline::new(vec![secs(0.0)], None, 80.0).unwrap();
        let report = run(&timeline);

        assert_eq!(
            report.events,
            vec![
                (secs(0.0), SimulationEvent::Tap { accepted: true }),
                (secs(0.0), SimulationEvent::Notified),
                (secs(2.0), SimulationEvent::Cleanup { applied: true }),
            ]
        );
        assert_eq!(report.notifications, 1);
        assert_eq!(report.idle_at_end, Some(true));
    }

    #[test]
    fn test_second_tap_during_capture_is_ignored() {
        let timeline = Timeline::new(vec![secs(0.0), secs(1.0)], None, 80.0).unwrap();
        let report = run(&timeline);

        assert!(
            report
                .events
                .contains(&(secs(1.0), SimulationEvent::Tap { accepted: false }))
        );
        assert_eq!(report.notifications, 1);
    }

    #[test]
    fn test_tap_after_cleanup_starts_new_capture() {
        let taps = vec![secs(0.0), secs(2.0), secs(2.5)];
        let timeline = Timeline::new(taps, None, 80.0).unwrap();
        let report = run(&timeline);

        // Cleanup at 2.0 is handled before the tap at 2.0
        assert_eq!(
            report.events[2],
            (secs(2.0), SimulationEvent::Cleanup { applied: true })
        );
        assert_eq!(
            report.events[3],
            (secs(2.0), SimulationEvent::Tap { accepted: true })
        );
        assert!(
            report
                .events
                .contains(&(secs(2.5), SimulationEvent::Tap { accepted: false }))
        );
        assert_eq!(report.notifications, 2);
    }

    #[test]
    fn test_destroyed_mid_capture() {
        let timeline = Timeline::new(vec![secs(0.0)], Some(secs(1.0)), 80.0).unwrap();
        let report = run(&timeline);

        assert_eq!(
            report.events[2..],
            [
                (secs(1.0), SimulationEvent::Destroyed),
                (secs(2.0), SimulationEvent::Cleanup { applied: false }),
            ]
        );
        assert_eq!(report.idle_at_end, None);
    }
}
