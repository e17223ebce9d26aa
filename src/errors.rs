// SPDX-License-Identifier: MPL-2.0

//! Error types for the binary entry points
//!
//! The shutter button itself cannot fail; these only cover starting the GUI
//! and parsing command-line timelines.

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug)]
pub enum AppError {
    /// The windowing runtime failed to start or exited with an error
    Gui(cosmic::iced::Error),
    /// A simulation timeline could not be parsed
    Timeline(TimelineError),
}

/// Problems with a `simulate` timeline
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// A time offset was not a number
    InvalidTime(String),
    /// A time offset was negative or not finite
    OutOfRange(f64),
    /// Button size must be positive
    InvalidSize(f32),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Gui(e) => write!(f, "GUI error: {}", e),
            AppError::Timeline(e) => write!(f, "Invalid timeline: {}", e),
        }
    }
}

impl fmt::Display for TimelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimelineError::InvalidTime(value) => write!(f, "'{}' is not a time in seconds", value),
            TimelineError::OutOfRange(value) => {
                write!(f, "{} is not a non-negative time in seconds", value)
            }
            TimelineError::InvalidSize(size) => write!(f, "button size {} must be positive", size),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Gui(e) => Some(e),
            AppError::Timeline(e) => Some(e),
        }
    }
}

impl std::error::Error for TimelineError {}

impl From<cosmic::iced::Error> for AppError {
    fn from(err: cosmic::iced::Error) -> Self {
        AppError::Gui(err)
    }
}

impl From<TimelineError> for AppError {
    fn from(err: TimelineError) -> Self {
        AppError::Timeline(err)
    }
}
