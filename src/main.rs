// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use shutter_button::AppModel;
use shutter_button::errors::AppResult;
use shutter_button::i18n;

mod cli;

#[derive(Parser)]
#[command(name = "shutter-button")]
#[command(about = "Animated shutter button for the COSMIC desktop")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay taps against a headless button and print what happens
    Simulate {
        /// Tap offsets in seconds, comma separated (e.g. 0,1.0,2.5)
        #[arg(short, long, default_value = "0")]
        taps: String,

        /// Offset in seconds at which the button is destroyed
        #[arg(short, long)]
        destroy_at: Option<String>,

        /// Side length of the button in pixels
        #[arg(short, long, default_value = "80")]
        size: f32,
    },
}

fn main() -> AppResult<()> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=shutter_button=trace, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Simulate {
            taps,
            destroy_at,
            size,
        }) => cli::simulate(&taps, destroy_at.as_deref(), size),
        None => run_gui(),
    }
}

fn run_gui() -> AppResult<()> {
    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    // Settings for configuring the application window and iced runtime.
    let settings = cosmic::app::Settings::default()
        .size(cosmic::iced::Size::new(400.0, 480.0))
        .size_limits(
            cosmic::iced::Limits::NONE
                .min_width(240.0)
                .min_height(240.0),
        );

    // Starts the application's event loop with `()` as the application's flags.
    cosmic::app::run::<AppModel>(settings, ())?;

    Ok(())
}
