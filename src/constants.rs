// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Fixed visual and timing constants of the shutter button
pub mod shutter {
    use cosmic::iced::Color;
    use std::time::Duration;

    /// Length of one capture animation, from tap to cleanup
    pub const ANIMATION_DURATION: Duration = Duration::from_secs(2);

    /// Duration of a single pulse (one direction; the pulse autoreverses)
    pub const PULSE_DURATION: Duration = Duration::from_millis(500);

    /// Peak scale of the pulse ring
    pub const PULSE_SCALE: f32 = 1.08;

    /// Outline ring stroke width
    pub const OUTLINE_WIDTH: f32 = 5.0;

    /// Progress ring stroke width
    pub const PROGRESS_WIDTH: f32 = 6.0;

    /// Pulse ring stroke width
    pub const PULSE_WIDTH: f32 = 4.0;

    /// Accent used by the progress ring
    pub const ACCENT: Color = Color {
        r: 1.0,
        g: 0.197_58,
        b: 0.681_22,
        a: 1.0,
    };

    /// Translucent accent used by the pulse ring
    pub const PULSE_COLOR: Color = Color { a: 0.5, ..ACCENT };

    /// Outline ring color
    pub const OUTLINE_COLOR: Color = Color::BLACK;

    /// Gradient stops drawn through the progress ring mask, left to right
    pub const GRADIENT_STOPS: [Color; 3] = [
        ACCENT,
        Color {
            r: 0.917_65,
            g: 0.152_94,
            b: 0.384_31,
            a: 1.0,
        },
        Color {
            r: 0.988_24,
            g: 0.105_88,
            b: 0.349_02,
            a: 1.0,
        },
    ];
}

/// UI constants for the host screen
pub mod ui {
    use std::time::Duration;

    /// Side length of the shutter button before the first resize event
    pub const SHUTTER_SIZE: f32 = 80.0;

    /// The button takes this fraction of the window's shorter side
    pub const SHUTTER_WINDOW_FRACTION: f32 = 0.2;

    /// Smallest side length the button is laid out at
    pub const SHUTTER_MIN_SIZE: f32 = 56.0;

    /// Largest side length the button is laid out at
    pub const SHUTTER_MAX_SIZE: f32 = 160.0;

    /// Redraw interval while an animation is running (~60 fps)
    pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

    /// Capture counter text size
    pub const COUNTER_TEXT_SIZE: u16 = 14;
}

/// Application information
pub mod app_info {
    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::shutter::*;

    #[test]
    fn test_pulse_fits_in_animation() {
        assert!(PULSE_DURATION * 2 <= ANIMATION_DURATION);
    }

    #[test]
    fn test_pulse_color_is_translucent_accent() {
        assert_eq!(PULSE_COLOR.r, ACCENT.r);
        assert_eq!(PULSE_COLOR.a, 0.5);
        assert_eq!(GRADIENT_STOPS[0], ACCENT);
    }
}
