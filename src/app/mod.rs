// SPDX-License-Identifier: MPL-2.0

//! Host application for the shutter button
//!
//! A single COSMIC window with the shutter button centered over a capture
//! counter. The host supplies what the button cannot do on its own: it
//! runs the deferred cleanup as a task, forwards window resizes as
//! relayouts and drives redraws while an animation runs.
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, ContextPage)
//! - `controls`: Shutter button widget
//! - `settings`: Settings drawer UI
//! - `view`: Main view rendering
//! - `update`: Message handling

mod controls;
mod settings;
mod state;
mod update;
mod view;

use crate::config::{AppTheme, Config};
use crate::constants::ui;
use crate::fl;
use crate::shutter::{CaptureState, ShutterButton};
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::{Size, Subscription, event, window};
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
pub use state::{AppModel, CaptureLog, ContextPage, Message, shutter_size_for};
use std::sync::Arc;
use tracing::{error, info};

const REPOSITORY: &str = "https://github.com/cosmic-utils/shutter-button";

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.cosmic_utils.ShutterButton";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        // Load configuration
        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        let theme_options = vec![fl!("match-desktop"), fl!("dark"), fl!("light")];

        let capture_log = Arc::new(CaptureLog::default());
        let mut shutter = ShutterButton::new();
        shutter.set_listener(&capture_log);
        shutter.layout(Size::new(ui::SHUTTER_SIZE, ui::SHUTTER_SIZE));

        info!(control = ?shutter.id(), "Shutter button ready");

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            shutter,
            capture_log,
            shutter_cursor: None,
            theme_options,
        };

        let startup = if app.config.app_theme == AppTheme::System {
            Task::none()
        } else {
            cosmic::command::set_theme(app.config.app_theme.theme())
        };

        (app, startup)
    }

    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("help-about-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::About))
                .into(),
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        use cosmic::iced::futures::SinkExt;

        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        let resize_sub = event::listen_with(|event, _status, _id| match event {
            cosmic::iced::Event::Window(window::Event::Resized(size)) => {
                Some(Message::WindowResized(size))
            }
            _ => None,
        });

        // Redraw ticks only while a capture animation runs; the id changes per
        // activation so each capture gets a fresh stream
        let frame_sub = match self.shutter.state() {
            CaptureState::Capturing { activation, .. } => Subscription::run_with_id(
                ("shutter-frames", activation),
                cosmic::iced::stream::channel(1, |mut output| async move {
                    let mut interval = tokio::time::interval(ui::FRAME_INTERVAL);
                    loop {
                        interval.tick().await;
                        if output.send(Message::AnimationTick).await.is_err() {
                            break;
                        }
                    }
                }),
            ),
            CaptureState::Idle => Subscription::none(),
        };

        Subscription::batch([config_sub, resize_sub, frame_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
