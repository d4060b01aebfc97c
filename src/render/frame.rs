use crate::core::Viewport;
use crate::error::{DiagramError, DiagramResult};
use crate::render::{
    CaptionPrimitive, CirclePrimitive, LinePrimitive, RectPrimitive, TextPrimitive,
    TrianglePrimitive, WedgePrimitive,
};

/// Backend-agnostic scene for one diagram draw pass.
///
/// Backends paint the collections in field order: wedges, triangles, lines,
/// circles, rects, texts, then captions on top of everything.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub wedges: Vec<WedgePrimitive>,
    pub triangles: Vec<TrianglePrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub captions: Vec<CaptionPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            wedges: Vec::new(),
            triangles: Vec::new(),
            lines: Vec::new(),
            circles: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
            captions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    pub fn validate(&self) -> DiagramResult<()> {
        if !self.viewport.is_valid() {
            return Err(DiagramError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for wedge in &self.wedges {
            wedge.validate()?;
        }
        for triangle in &self.triangles {
            triangle.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        for caption in &self.captions {
            caption.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wedges.is_empty()
            && self.triangles.is_empty()
            && self.lines.is_empty()
            && self.circles.is_empty()
            && self.rects.is_empty()
            && self.texts.is_empty()
            && self.captions.is_empty()
    }

    /// Finds the first text primitive with exactly `text`.
    #[must_use]
    pub fn find_text(&self, text: &str) -> Option<&TextPrimitive> {
        self.texts.iter().find(|primitive| primitive.text == text)
    }
}
