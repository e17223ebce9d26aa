// SPDX-License-Identifier: GPL-3.0-only

//! SVG rendering of a sampled frame
//!
//! Each frame becomes a small standalone SVG document. Layers are emitted
//! back to front: pulse ring, outline, then the progress ring, either as a
//! flat stroke or as the gradient overlay masked by the ring's stroke.

use super::geometry::{ArcPath, Circle};
use super::layers::{GradientOverlay, LineCap, RingStyle};
use super::render::{ProgressPaint, ShutterFrame};
use crate::constants::shutter::PROGRESS_WIDTH;
use cosmic::iced::{Color, Point};
use std::f32::consts::FRAC_PI_2;

/// Margin around the bounds so strokes on the outer circle are not clipped
pub const SVG_PADDING: f32 = PROGRESS_WIDTH;

const GRADIENT_ID: &str = "progress-gradient";
const MASK_ID: &str = "progress-mask";

/// Render a frame as an SVG document
pub fn render_svg(frame: &ShutterFrame) -> String {
    let width = frame.bounds.width + SVG_PADDING * 2.0;
    let height = frame.bounds.height + SVG_PADDING * 2.0;

    let mut svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" "#,
            r#"viewBox="{x} {y} {w} {h}">"#,
        ),
        w = width,
        h = height,
        x = -SVG_PADDING,
        y = -SVG_PADDING,
    );

    let arc = arc_path_data(&frame.progress, frame.coverage);

    if let ProgressPaint::Gradient { mask, overlay } = &frame.progress_paint
        && let Some(arc) = &arc
    {
        svg.push_str("<defs>");
        svg.push_str(&gradient_def(overlay));
        svg.push_str(&format!(
            concat!(
                r#"<mask id="{id}" maskUnits="userSpaceOnUse" "#,
                r#"x="{x}" y="{y}" width="{w}" height="{h}">"#,
            ),
            id = MASK_ID,
            x = -SVG_PADDING,
            y = -SVG_PADDING,
            w = width,
            h = height,
        ));
        let mask_style = RingStyle {
            color: Color::WHITE,
            ..*mask
        };
        svg.push_str(&stroked_path(arc, &mask_style));
        svg.push_str("</mask></defs>");
    }

    if let Some((circle, style, scale)) = &frame.pulse {
        let center = circle.center;
        svg.push_str(&format!(
            r#"<g transform="translate({cx} {cy}) scale({s}) translate({nx} {ny})">"#,
            cx = center.x,
            cy = center.y,
            s = scale,
            nx = -center.x,
            ny = -center.y,
        ));
        svg.push_str(&stroked_circle(circle, style));
        svg.push_str("</g>");
    }

    let (outline, outline_style) = &frame.outline;
    svg.push_str(&stroked_circle(outline, outline_style));

    if let Some(arc) = &arc {
        match &frame.progress_paint {
            ProgressPaint::Solid(style) => svg.push_str(&stroked_path(arc, style)),
            ProgressPaint::Gradient { overlay, .. } => {
                let rect = overlay.frame;
                svg.push_str(&format!(
                    concat!(
                        r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{r}" ry="{r}" "#,
                        r#"fill="url(#{gradient})" mask="url(#{mask})"/>"#,
                    ),
                    x = rect.x,
                    y = rect.y,
                    w = rect.width,
                    h = rect.height,
                    r = overlay.corner_radius,
                    gradient = GRADIENT_ID,
                    mask = MASK_ID,
                ));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn gradient_def(overlay: &GradientOverlay) -> String {
    let (start, end) = overlay.axis();
    let mut def = format!(
        concat!(
            r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" "#,
            r#"x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}">"#,
        ),
        id = GRADIENT_ID,
        x1 = start.x,
        y1 = start.y,
        x2 = end.x,
        y2 = end.y,
    );
    for (offset, color) in overlay.offsets() {
        let (rgb, opacity) = paint(color);
        def.push_str(&format!(
            r#"<stop offset="{offset}" stop-color="{rgb}" stop-opacity="{opacity}"/>"#
        ));
    }
    def.push_str("</linearGradient>");
    def
}

/// SVG path data for the leading `coverage` fraction of `arc`
///
/// SVG arc commands cannot describe a full turn, so the sweep is split into
/// quarter turns. Returns `None` when nothing would be stroked.
pub fn arc_path_data(arc: &ArcPath, coverage: f32) -> Option<String> {
    if coverage <= 0.0 || arc.radius <= 0.0 {
        return None;
    }

    let end = arc.end_angle_at(coverage);
    let point_at = |angle: f32| {
        Point::new(
            arc.center.x + arc.radius * angle.cos(),
            arc.center.y + arc.radius * angle.sin(),
        )
    };

    let start = point_at(arc.start_angle);
    let mut data = format!("M {} {}", start.x, start.y);

    let sweep = end - arc.start_angle;
    let segments = ((sweep / FRAC_PI_2) - 1e-4).ceil().max(1.0) as u32;
    for segment in 1..=segments {
        let angle = arc.start_angle + sweep * segment as f32 / segments as f32;
        let to = point_at(angle);
        data.push_str(&format!(
            " A {r} {r} 0 0 1 {} {}",
            to.x,
            to.y,
            r = arc.radius
        ));
    }

    Some(data)
}

fn stroked_path(data: &str, style: &RingStyle) -> String {
    let (rgb, opacity) = paint(style.color);
    format!(
        concat!(
            r#"<path d="{d}" fill="none" stroke="{rgb}" stroke-opacity="{opacity}" "#,
            r#"stroke-width="{width}" stroke-linecap="{cap}"/>"#,
        ),
        d = data,
        rgb = rgb,
        opacity = opacity,
        width = style.width,
        cap = line_cap(style.line_cap),
    )
}

fn stroked_circle(circle: &Circle, style: &RingStyle) -> String {
    let (rgb, opacity) = paint(style.color);
    format!(
        concat!(
            r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="none" "#,
            r#"stroke="{rgb}" stroke-opacity="{opacity}" stroke-width="{width}"/>"#,
        ),
        cx = circle.center.x,
        cy = circle.center.y,
        r = circle.radius,
        rgb = rgb,
        opacity = opacity,
        width = style.width,
    )
}

fn line_cap(cap: LineCap) -> &'static str {
    match cap {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
    }
}

/// `rgb(...)` string and opacity for an SVG paint
fn paint(color: Color) -> (String, f32) {
    let [r, g, b, a] = color.into_rgba8();
    (format!("rgb({r},{g},{b})"), f32::from(a) / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutter::clock::ManualClock;
    use crate::shutter::controller::ShutterButton;
    use crate::shutter::geometry::RingGeometry;
    use cosmic::iced::Size;
    use std::sync::Arc;
    use std::time::Duration;

    fn laid_out() -> (ShutterButton, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let mut button = ShutterButton::with_clock(clock.clone());
        button.layout(Size::new(80.0, 80.0));
        (button, clock)
    }

    #[test]
    fn test_idle_svg_has_outline_only() {
        let (button, _clock) = laid_out();
        let svg = render_svg(&button.frame().unwrap());

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 1);
        assert!(svg.contains(r#"r="35""#));
        assert!(!svg.contains("<path"));
        assert!(!svg.contains("<mask"));
    }

    #[test]
    fn test_capturing_svg_masks_gradient() {
        let (mut button, clock) = laid_out();
        button.activate().unwrap();
        clock.advance(Duration::from_millis(750));

        let svg = render_svg(&button.frame().unwrap());

        assert!(svg.contains(GRADIENT_ID));
        assert!(svg.contains(r#"mask="url(#progress-mask)""#));
        assert_eq!(svg.matches("<stop").count(), 3);
        // Pulse and outline
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("scale("));
    }

    #[test]
    fn test_finished_svg_draws_full_solid_ring() {
        let (mut button, clock) = laid_out();
        let ticket = button.activate().unwrap();
        clock.advance(ticket.delay);
        button.finish(ticket);

        let svg = render_svg(&button.frame().unwrap());
        assert!(svg.contains("<path"));
        assert!(svg.contains(r#"stroke-linecap="round""#));
        assert!(!svg.contains("<mask"));
    }

    #[test]
    fn test_arc_is_split_into_quarter_turns() {
        let arc = RingGeometry::from_bounds(Size::new(80.0, 80.0)).progress;
        let full = arc_path_data(&arc, 1.0).unwrap();
        // 2.5π sweep -> 5 quarter turns
        assert_eq!(full.matches(" A ").count(), 5);

        let partial = arc_path_data(&arc, 0.1).unwrap();
        assert_eq!(partial.matches(" A ").count(), 1);
        assert!(partial.starts_with("M "));

        assert!(arc_path_data(&arc, 0.0).is_none());
    }

    #[test]
    fn test_paint_splits_alpha() {
        let (rgb, opacity) = paint(Color::from_rgba(1.0, 0.0, 0.0, 0.5));
        assert_eq!(rgb, "rgb(255,0,0)");
        assert!((opacity - 0.5).abs() < 0.01);
    }
}
