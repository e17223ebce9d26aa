// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function acts as a dispatcher; each message has a
//! focused handler below it.

use crate::app::state::{AppModel, ContextPage, Message, press_lands_on_button, shutter_size_for};
use crate::config::{AppTheme, Config};
use crate::shutter::{CleanupTicket, schedule_cleanup};
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use cosmic::iced::Size;
use tracing::{debug, error, info, trace};

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),

            // ===== Settings =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::SetAppTheme(index) => self.handle_set_app_theme(index),

            // ===== Shutter =====
            Message::ShutterPressed => self.handle_shutter_pressed(),
            Message::ShutterCursorMoved(point) => {
                self.shutter_cursor = Some(point);
                Task::none()
            }
            Message::ShutterCursorLeft => {
                self.shutter_cursor = None;
                Task::none()
            }
            Message::ShutterCleanup(ticket) => self.handle_shutter_cleanup(ticket),
            Message::WindowResized(size) => self.handle_window_resized(size),
            // Nothing to update; receiving the message is enough to redraw
            Message::AnimationTick => Task::none(),
        }
    }

    fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        if let Err(err) = open::that_detached(&url) {
            error!(url = %url, error = %err, "Failed to open URL");
        }
        Task::none()
    }

    fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == context_page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = context_page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    fn handle_update_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");
        let theme_changed = self.config.app_theme != config.app_theme;
        self.config = config;

        if theme_changed {
            cosmic::command::set_theme(self.config.app_theme.theme())
        } else {
            Task::none()
        }
    }

    fn handle_set_app_theme(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(app_theme) = AppTheme::from_index(index) else {
            return Task::none();
        };

        info!(?app_theme, "Setting application theme");
        self.config.app_theme = app_theme;

        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, "Failed to save app theme setting");
        }

        cosmic::command::set_theme(app_theme.theme())
    }

    fn handle_shutter_pressed(&mut self) -> Task<cosmic::Action<Message>> {
        if !press_lands_on_button(&self.shutter, self.shutter_cursor) {
            trace!(cursor = ?self.shutter_cursor, "Press outside the shutter circle");
            return Task::none();
        }

        match self.shutter.activate() {
            Some(ticket) => Task::perform(schedule_cleanup(ticket), |ticket| {
                cosmic::Action::App(Message::ShutterCleanup(ticket))
            }),
            None => Task::none(),
        }
    }

    fn handle_shutter_cleanup(&mut self, ticket: CleanupTicket) -> Task<cosmic::Action<Message>> {
        if !self.shutter.finish(ticket) {
            debug!(?ticket, "Stale shutter cleanup");
        }
        Task::none()
    }

    fn handle_window_resized(&mut self, window: Size) -> Task<cosmic::Action<Message>> {
        let side = shutter_size_for(window);
        trace!(width = window.width, height = window.height, side, "Window resized");
        self.shutter.layout(Size::new(side, side));
        Task::none()
    }
}
