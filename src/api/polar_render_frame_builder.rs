use crate::core::geometry::pseudo_color;
use crate::core::polar::cell_at;
use crate::core::{ChartValue, PolarLayout};
use crate::error::DiagramResult;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
    TrianglePrimitive,
};

use super::DiagramEngine;
use super::layout_regions::polar_region;
use super::plot_render_frame_builder::{GRID_COLOR, GRID_STROKE_PX, push_hover};

const FILL_COLOR: u32 = 0xCFCF_FF9F;
const EDGE_STROKE_PX: f64 = 2.0;

impl<R: Renderer> DiagramEngine<R> {
    pub(super) fn append_polar_primitives(
        &self,
        frame: &mut RenderFrame,
        values: &[ChartValue],
    ) -> DiagramResult<()> {
        let region = polar_region(self.config.viewport);
        let font_size = self.config.font_size_px;
        let thin_font_size = self.config.thin_font_size_px;
        let layout = PolarLayout::new(
            region.center_x,
            region.center_y,
            region.radius,
            values,
            self.config.polar_ring_count,
        )?;
        let grid_color = Color::from_rgba_u32(GRID_COLOR);

        for (x, y) in layout.spokes() {
            frame.lines.push(LinePrimitive::new(
                region.center_x,
                region.center_y,
                x,
                y,
                GRID_STROKE_PX,
                grid_color,
            ));
        }
        for ring in layout.rings() {
            push_closed_polygon(frame, &ring.vertices, GRID_STROKE_PX, grid_color);
            frame.texts.push(TextPrimitive::new(
                ring.label,
                region.center_x,
                region.center_y - ring.radius,
                thin_font_size,
                Color::BLACK,
                TextHAlign::Left,
            ));
        }

        for (anchor, value) in layout.name_anchors().into_iter().zip(values) {
            if value.name.is_empty() {
                continue;
            }
            let h_align = if anchor.right_aligned {
                TextHAlign::Right
            } else {
                TextHAlign::Left
            };
            frame.texts.push(TextPrimitive::new(
                value.name.as_str(),
                anchor.x,
                anchor.y,
                font_size,
                Color::BLACK,
                h_align,
            ));
        }

        let cells = layout.cells(values);
        let fill = Color::from_rgba_u32(FILL_COLOR);
        for points in layout.fan_triangles(&cells) {
            frame.triangles.push(TrianglePrimitive {
                points,
                color: fill,
            });
        }
        let vertices: Vec<(f64, f64)> = cells.iter().map(|cell| (cell.x, cell.y)).collect();
        push_closed_polygon(frame, &vertices, EDGE_STROKE_PX, Color::BLACK);

        let radius = self.config.marker_radius_px;
        for cell in &cells {
            frame.circles.push(CirclePrimitive::filled(
                cell.x,
                cell.y,
                radius,
                pseudo_color(cell.value.value),
            ));
        }

        if let Some(index) = cell_at(&cells, self.interaction.cursor(), radius) {
            let cell = &cells[index];
            let text = format!("{} - {}", cell.value.value, cell.value.detail);
            push_hover(
                frame,
                cell.x,
                cell.y,
                radius,
                &text,
                region.bounds(),
                font_size,
            );
        }

        Ok(())
    }
}

fn push_closed_polygon(frame: &mut RenderFrame, vertices: &[(f64, f64)], stroke: f64, color: Color) {
    if vertices.len() < 2 {
        return;
    }
    for (index, &(x1, y1)) in vertices.iter().enumerate() {
        let (x2, y2) = vertices[(index + 1) % vertices.len()];
        frame
            .lines
            .push(LinePrimitive::new(x1, y1, x2, y2, stroke, color));
    }
}
