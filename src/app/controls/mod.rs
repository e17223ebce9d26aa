// SPDX-License-Identifier: MPL-2.0

//! Capture controls module
//!
//! Widgets that present the shutter button on the host screen.

pub mod capture_button;
