use crate::core::tree::node_at;
use crate::core::{TreeValue, layout_tree};
use crate::error::DiagramResult;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::DiagramEngine;
use super::layout_regions::tree_rect;
use super::plot_render_frame_builder::{GRID_COLOR, GRID_STROKE_PX, LABEL_OFFSET_PX, push_hover};

impl<R: Renderer> DiagramEngine<R> {
    pub(super) fn append_tree_primitives(
        &self,
        frame: &mut RenderFrame,
        root: &TreeValue,
    ) -> DiagramResult<()> {
        let rect = tree_rect(self.config.viewport);
        let font_size = self.config.font_size_px;
        let radius = self.config.marker_radius_px;
        let points = layout_tree(root, rect)?;
        let edge_color = Color::from_rgba_u32(GRID_COLOR);

        for point in &points {
            if let Some((parent_x, parent_y)) = point.parent {
                frame.lines.push(LinePrimitive::new(
                    point.x,
                    point.y,
                    parent_x,
                    parent_y,
                    GRID_STROKE_PX,
                    edge_color,
                ));
            }
        }
        for point in &points {
            frame
                .circles
                .push(CirclePrimitive::filled(point.x, point.y, radius, point.color));
            if point.node.name.is_empty() {
                continue;
            }
            frame.texts.push(TextPrimitive::new(
                point.node.name.as_str(),
                point.x + LABEL_OFFSET_PX,
                point.y - LABEL_OFFSET_PX,
                font_size,
                Color::BLACK,
                TextHAlign::Left,
            ));
        }

        if let Some(index) = node_at(&points, self.interaction.cursor(), radius) {
            let point = &points[index];
            let text = format!("{} - {}", point.node.name, point.node.detail);
            push_hover(frame, point.x, point.y, radius, &text, rect, font_size);
        }

        Ok(())
    }
}
