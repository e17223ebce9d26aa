// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! The shutter button centered in the window, with the capture counter
//! below it.

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Length};
use cosmic::widget;

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let status = match self.shutter.remaining() {
            Some(remaining) => {
                let seconds = format!("{:.1}", remaining.as_secs_f32());
                fl!("capturing", seconds = seconds)
            }
            None => fl!("captures-taken", count = self.capture_log.count()),
        };

        let content = widget::column()
            .push(self.build_capture_button())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(widget::text(status).size(ui::COUNTER_TEXT_SIZE))
            .align_x(Alignment::Center);

        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Alignment::Center)
            .align_y(Alignment::Center)
            .into()
    }
}
