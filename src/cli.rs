// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! `simulate` replays a tap timeline against a headless shutter button and
//! prints each event with its offset.

use shutter_button::errors::AppResult;
use shutter_button::simulate::{self, Timeline};

/// Replay `taps` (and optionally destroy the button) and print the outcome
pub fn simulate(taps: &str, destroy_at: Option<&str>, size: f32) -> AppResult<()> {
    let taps = simulate::parse_times(taps)?;
    let destroy_at = destroy_at.map(simulate::parse_time).transpose()?;
    let timeline = Timeline::new(taps, destroy_at, size)?;

    println!("Simulating a {}x{} shutter button", size, size);
    println!();

    let report = simulate::run(&timeline);
    for (at, event) in &report.events {
        println!("  {:>7.3}s  {}", at.as_secs_f64(), event);
    }

    println!();
    println!("Listener notifications: {}", report.notifications);
    match report.idle_at_end {
        Some(true) => println!("Final state: idle"),
        Some(false) => println!("Final state: capturing"),
        None => println!("Final state: destroyed"),
    }

    Ok(())
}
