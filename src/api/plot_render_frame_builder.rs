use crate::core::plot::AxisArrow;
use crate::core::{Dataset, ScreenRect};
use crate::error::DiagramResult;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::DiagramEngine;
use super::caption::build_caption;
use super::layout_regions::chart_rect;

pub(super) const GRID_COLOR: u32 = 0x0000_005F;
pub(super) const GRID_STROKE_PX: f64 = 0.5;
pub(super) const HOVER_RING_COLOR: Color = Color::rgb(0.0, 0.0, 1.0);
pub(super) const HOVER_RING_STROKE_PX: f64 = 2.0;
pub(super) const HOVER_RING_GROWTH_PX: f64 = 2.0;
pub(super) const LABEL_OFFSET_PX: f64 = 5.0;

const SEGMENT_COLOR: u32 = 0x0000_A06F;
const SEGMENT_STROKE_PX: f64 = 1.5;
const AXIS_STROKE_PX: f64 = 2.0;

impl<R: Renderer> DiagramEngine<R> {
    pub(super) fn append_plot_primitives(&mut self, frame: &mut RenderFrame) -> DiagramResult<()> {
        let Dataset::Plot(points) = &self.dataset else {
            return Ok(());
        };
        let rect = chart_rect(self.config.viewport);
        let font_size = self.config.font_size_px;
        let thin_font_size = self.config.thin_font_size_px;

        let step = self.plot.begin_frame(points, rect, &mut self.interaction)?;
        let grid_color = Color::from_rgba_u32(GRID_COLOR);

        for line in self.plot.vertical_grid_lines(step, rect, thin_font_size) {
            frame.lines.push(LinePrimitive::new(
                line.position,
                rect.top,
                line.position,
                rect.bottom,
                GRID_STROKE_PX,
                grid_color,
            ));
            frame.texts.push(TextPrimitive::new(
                line.label,
                line.label_x,
                line.label_y,
                thin_font_size,
                Color::BLACK,
                TextHAlign::Left,
            ));
        }
        for line in self.plot.horizontal_grid_lines(step, rect) {
            frame.lines.push(LinePrimitive::new(
                rect.left,
                line.position,
                rect.right,
                line.position,
                GRID_STROKE_PX,
                grid_color,
            ));
            let h_align = if line.label_right_aligned {
                TextHAlign::Right
            } else {
                TextHAlign::Left
            };
            frame.texts.push(TextPrimitive::new(
                line.label,
                line.label_x,
                line.label_y,
                thin_font_size,
                Color::BLACK,
                h_align,
            ));
        }

        let axes = self.plot.axes(rect);
        for arrow in [axes.x_axis, axes.y_axis].into_iter().flatten() {
            push_arrow(frame, arrow);
        }
        if let Some((x, y)) = axes.origin_label {
            frame.texts.push(TextPrimitive::new(
                "0",
                x,
                y,
                thin_font_size,
                Color::BLACK,
                TextHAlign::Left,
            ));
        }

        let segment_color = Color::from_rgba_u32(SEGMENT_COLOR);
        for (from, to) in self.plot.project_segments(points, rect) {
            frame.lines.push(LinePrimitive::new(
                from.0,
                from.1,
                to.0,
                to.1,
                SEGMENT_STROKE_PX,
                segment_color,
            ));
        }

        let radius = self.plot.marker_radius_px();
        let projected = self.plot.project_points(points, rect);
        for point in projected.iter().filter(|point| point.visible) {
            frame
                .circles
                .push(CirclePrimitive::filled(point.x, point.y, radius, point.color));
            if !point.source.name.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    point.source.name.as_str(),
                    point.x + LABEL_OFFSET_PX,
                    point.y - LABEL_OFFSET_PX,
                    font_size,
                    Color::BLACK,
                    TextHAlign::Left,
                ));
            }
        }

        for index in self.plot.hit_test(points, rect, self.interaction.cursor()) {
            let point = &projected[index];
            let source = point.source;
            let text = format!(
                "{} - ({}; {}) - {}",
                source.name, source.x, source.y, source.detail
            );
            push_hover(frame, point.x, point.y, radius, &text, rect, font_size);
        }

        Ok(())
    }
}

fn push_arrow(frame: &mut RenderFrame, arrow: AxisArrow) {
    let (tip_x, tip_y) = arrow.tip;
    frame.lines.push(LinePrimitive::new(
        arrow.tail.0,
        arrow.tail.1,
        tip_x,
        tip_y,
        AXIS_STROKE_PX,
        Color::BLACK,
    ));
    for (x, y) in arrow.head {
        frame.lines.push(LinePrimitive::new(
            x,
            y,
            tip_x,
            tip_y,
            AXIS_STROKE_PX,
            Color::BLACK,
        ));
    }
}

/// Highlight ring around a hovered marker plus its caption above-right of it.
pub(super) fn push_hover(
    frame: &mut RenderFrame,
    x: f64,
    y: f64,
    radius: f64,
    text: &str,
    bounds: ScreenRect,
    font_size: f64,
) {
    frame.circles.push(CirclePrimitive::stroked(
        x,
        y,
        radius + HOVER_RING_GROWTH_PX,
        HOVER_RING_STROKE_PX,
        HOVER_RING_COLOR,
    ));
    let anchor = ScreenRect::new(
        x + LABEL_OFFSET_PX,
        y - LABEL_OFFSET_PX - font_size,
        bounds.right,
        bounds.bottom,
    );
    if let Some(caption) = build_caption(text, anchor, font_size) {
        frame.captions.push(caption);
    }
}
