// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::config::Config;
use crate::constants::ui;
use crate::shutter::svg::SVG_PADDING;
use crate::shutter::{CaptureListener, CleanupTicket, ShutterButton};
use cosmic::cosmic_config;
use cosmic::iced::{Point, Size};
use cosmic::widget::about::About;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Context drawer pages
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// Receives capture notifications from the shutter button
///
/// Stands in for the capture pipeline; the host only counts activations.
#[derive(Debug, Default)]
pub struct CaptureLog {
    count: AtomicU64,
}

impl CaptureLog {
    /// Number of captures started so far
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

impl CaptureListener for CaptureLog {
    fn on_capture_activated(&self) {
        let count = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        info!(count, "Capture activated");
    }
}

/// Side length of the shutter button for a window of the given size
pub fn shutter_size_for(window: Size) -> f32 {
    let shorter = window.width.min(window.height);
    if !shorter.is_finite() || shorter <= 0.0 {
        return ui::SHUTTER_SIZE;
    }

    (shorter * ui::SHUTTER_WINDOW_FRACTION).clamp(ui::SHUTTER_MIN_SIZE, ui::SHUTTER_MAX_SIZE)
}

/// Whether a press with the last known `cursor` should reach the button
///
/// `cursor` is in widget coordinates, which include the SVG padding. Touch
/// presses arrive without a cursor position and are accepted anywhere on the
/// widget.
pub fn press_lands_on_button(button: &ShutterButton, cursor: Option<Point>) -> bool {
    let Some(cursor) = cursor else {
        return true;
    };

    let local = Point::new(cursor.x - SVG_PADDING, cursor.y - SVG_PADDING);
    button.hit_test(local)
}

/// Main application state
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined
    pub context_page: ContextPage,
    /// About page content
    pub about: About,
    /// Configuration data that persists between application runs
    pub config: Config,
    /// Configuration handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,
    /// The shutter button on the host screen
    pub shutter: ShutterButton,
    /// Listener registered with the shutter button; the button only holds a weak reference
    pub capture_log: Arc<CaptureLog>,
    /// Last cursor position over the shutter widget, in widget coordinates
    pub shutter_cursor: Option<Point>,
    /// Theme dropdown labels
    pub theme_options: Vec<String>,
}

/// Messages emitted by the application and its widgets
#[derive(Debug, Clone)]
pub enum Message {
    /// Open a URL in the default browser
    LaunchUrl(String),
    /// Show or hide a context drawer page
    ToggleContextPage(ContextPage),
    /// Configuration changed on disk
    UpdateConfig(Config),
    /// Theme dropdown selection
    SetAppTheme(usize),

    /// The shutter button was tapped
    ShutterPressed,
    /// Cursor moved over the shutter widget
    ShutterCursorMoved(Point),
    /// Cursor left the shutter widget
    ShutterCursorLeft,
    /// A capture's deferred cleanup came due
    ShutterCleanup(CleanupTicket),
    /// The main window changed size
    WindowResized(Size),
    /// Redraw while an animation runs
    AnimationTick,
}
