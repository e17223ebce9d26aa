// SPDX-License-Identifier: MPL-2.0

//! Shutter Button - an animated circular capture control for the COSMIC desktop
//!
//! A tap starts a two-second capture animation: a progress ring sweeps
//! around the button through a pink gradient while a translucent pulse ring
//! breathes in and out. The button ignores taps until the animation's
//! deferred cleanup has run, and notifies a weakly held listener the moment
//! a capture starts.
//!
//! # Architecture
//!
//! - [`shutter`]: Window-independent button core (state machine, layers, animations)
//! - [`app`]: COSMIC host application
//! - [`simulate`]: Headless timeline replay
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```ignore
//! // This is a GUI application, typically run via:
//! // shutter-button
//! ```

pub mod app;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod shutter;
pub mod simulate;

// Re-export commonly used types
pub use app::{AppModel, Message};
pub use config::Config;
pub use errors::{AppError, AppResult, TimelineError};
pub use shutter::{CaptureListener, CaptureState, ShutterButton};
