use crate::core::bar::{bar_font_size, column_at};
use crate::core::{BarLayout, ChartValue, ScreenRect};
use crate::error::DiagramResult;
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::DiagramEngine;
use super::caption::build_caption;
use super::layout_regions::chart_rect;
use super::plot_render_frame_builder::{GRID_COLOR, GRID_STROKE_PX};

const COLUMN_BORDER_PX: f64 = 2.0;
const GRID_LABEL_LIFT_PX: f64 = 3.0;
const VALUE_LIFT_PX: f64 = 3.0;
const CAPTION_CURSOR_GAP_PX: f64 = 10.0;

impl<R: Renderer> DiagramEngine<R> {
    pub(super) fn append_bar_primitives(
        &self,
        frame: &mut RenderFrame,
        values: &[ChartValue],
    ) -> DiagramResult<()> {
        let rect = chart_rect(self.config.viewport);
        let font_size = bar_font_size(f64::from(self.config.viewport.width))
            .min(self.config.font_size_px);
        let layout = BarLayout::new(rect, values, font_size)?;
        let grid_color = Color::from_rgba_u32(GRID_COLOR);

        for line in layout.grid_lines() {
            frame.lines.push(LinePrimitive::new(
                rect.left,
                line.y,
                rect.right,
                line.y,
                GRID_STROKE_PX,
                grid_color,
            ));
            frame.texts.push(TextPrimitive::new(
                line.label,
                rect.left,
                line.y - GRID_LABEL_LIFT_PX,
                font_size,
                Color::BLACK,
                TextHAlign::Left,
            ));
        }

        let columns = layout.columns(values);
        for column in &columns {
            let column_rect = column.rect;
            frame.rects.push(
                RectPrimitive::new(
                    column_rect.left,
                    column_rect.top,
                    column_rect.width(),
                    column_rect.height(),
                    column.color,
                )
                .with_border(COLUMN_BORDER_PX, Color::BLACK),
            );

            let (center_x, _) = column_rect.center();
            if !column.value.name.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    column.value.name.as_str(),
                    center_x,
                    column_rect.bottom + font_size,
                    font_size,
                    Color::BLACK,
                    TextHAlign::Center,
                ));
            }
            let value_text = column.value.value.to_string();
            frame.texts.push(TextPrimitive::new(
                value_text,
                center_x,
                column_rect.top - VALUE_LIFT_PX,
                font_size,
                Color::BLACK,
                TextHAlign::Center,
            ));
        }

        let cursor = self.interaction.cursor();
        if let (Some(index), Some((x, y))) = (column_at(&columns, cursor), cursor) {
            let anchor = ScreenRect::new(x, y + CAPTION_CURSOR_GAP_PX, rect.right, rect.bottom);
            if let Some(caption) = build_caption(&columns[index].value.detail, anchor, font_size) {
                frame.captions.push(caption);
            }
        }

        Ok(())
    }
}
