// SPDX-License-Identifier: MPL-2.0

//! Shutter button widget

use crate::app::state::{AppModel, Message};
use crate::shutter::render_svg;
use crate::shutter::svg::SVG_PADDING;
use cosmic::Element;
use cosmic::iced::Length;
use cosmic::iced::widget::mouse_area;
use cosmic::widget;

impl AppModel {
    /// Build the shutter button widget
    ///
    /// Each redraw samples the button's layers at the current time and
    /// renders them as an SVG. Presses are only wired up while the button
    /// accepts input; during a capture the widget is inert. Cursor moves are
    /// tracked so presses outside the circle can be dropped.
    pub fn build_capture_button(&self) -> Element<'_, Message> {
        let Some(frame) = self.shutter.frame() else {
            return widget::Space::new(Length::Shrink, Length::Shrink).into();
        };

        let width = frame.bounds.width + SVG_PADDING * 2.0;
        let height = frame.bounds.height + SVG_PADDING * 2.0;

        let handle = widget::svg::Handle::from_memory(render_svg(&frame).into_bytes());
        let image = widget::svg(handle)
            .width(Length::Fixed(width))
            .height(Length::Fixed(height));

        let area = mouse_area(image)
            .on_move(Message::ShutterCursorMoved)
            .on_exit(Message::ShutterCursorLeft);

        if self.shutter.accepts_input() {
            area.on_press(Message::ShutterPressed).into()
        } else {
            area.into()
        }
    }
}
