use crate::core::circle::{LABEL_MARGIN_PX, segment_at};
use crate::core::geometry::pseudo_color;
use crate::core::{ChartValue, ScreenRect, circle_segments};
use crate::error::DiagramResult;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
    WedgePrimitive,
};

use super::DiagramEngine;
use super::caption::build_caption;
use super::layout_regions::circle_region;

const OUTLINE_STROKE_PX: f64 = 2.0;
const CAPTION_CURSOR_GAP_PX: f64 = 10.0;

impl<R: Renderer> DiagramEngine<R> {
    pub(super) fn append_circle_primitives(
        &self,
        frame: &mut RenderFrame,
        values: &[ChartValue],
    ) -> DiagramResult<()> {
        let region = circle_region(self.config.viewport);
        let font_size = self.config.font_size_px;
        let segments = circle_segments(region.center_x, region.center_y, region.radius, values)?;

        for segment in &segments {
            if segment.sweep() > 0.0 {
                frame.wedges.push(WedgePrimitive {
                    center_x: segment.center_x,
                    center_y: segment.center_y,
                    radius: segment.radius,
                    begin_angle: segment.begin_angle,
                    end_angle: segment.end_angle,
                    color: pseudo_color(segment.sweep()),
                });
            }

            let anchor = segment.label_anchor(LABEL_MARGIN_PX);
            let h_align = if anchor.right_aligned {
                TextHAlign::Right
            } else {
                TextHAlign::Left
            };
            frame.texts.push(TextPrimitive::new(
                segment.text.as_str(),
                anchor.x,
                anchor.y,
                font_size,
                Color::BLACK,
                h_align,
            ));

            let (x, y) = segment.boundary_point(segment.end_angle);
            frame.lines.push(LinePrimitive::new(
                segment.center_x,
                segment.center_y,
                x,
                y,
                OUTLINE_STROKE_PX,
                Color::BLACK,
            ));
        }

        frame.circles.push(CirclePrimitive::stroked(
            region.center_x,
            region.center_y,
            region.radius,
            OUTLINE_STROKE_PX,
            Color::BLACK,
        ));

        let cursor = self.interaction.cursor();
        if let (Some(index), Some((x, y))) = (segment_at(&segments, cursor), cursor) {
            let bounds = region.bounds();
            let anchor = ScreenRect::new(x, y + CAPTION_CURSOR_GAP_PX, bounds.right, bounds.bottom);
            if let Some(caption) = build_caption(&segments[index].detail, anchor, font_size) {
                frame.captions.push(caption);
            }
        }

        Ok(())
    }
}
