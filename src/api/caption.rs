use crate::core::ScreenRect;
use crate::core::geometry::GLYPH_WIDTH_RATIO;
use crate::render::{CaptionPrimitive, Color, RectPrimitive, TextHAlign, TextPrimitive};

/// Light translucent caption background.
pub const CAPTION_BACKGROUND: u32 = 0xCFCF_FFCF;

/// Extra spacing between wrapped caption lines.
pub const CAPTION_LINE_GAP_PX: f64 = 2.0;

/// Word-wraps `text` starting at the top-left of `bounds`.
///
/// A word moves to the next line when it would cross `bounds.right`, unless
/// it is the first word on its line. The background box hugs the widest line.
/// Returns `None` for text without words.
#[must_use]
pub fn build_caption(text: &str, bounds: ScreenRect, font_size: f64) -> Option<CaptionPrimitive> {
    let advance = font_size * GLYPH_WIDTH_RATIO;
    let mut x = bounds.left;
    let mut y = bounds.top + font_size;
    let mut max_x = bounds.left;
    let mut lines = Vec::new();

    for word in text.split(' ').filter(|word| !word.is_empty()) {
        let length = word.chars().count() as f64;
        if x + advance * length > bounds.right && x != bounds.left {
            x = bounds.left;
            y += font_size + CAPTION_LINE_GAP_PX;
        }
        lines.push(TextPrimitive::new(
            word,
            x,
            y,
            font_size,
            Color::BLACK,
            TextHAlign::Left,
        ));
        x += advance * (length + 1.0);
        max_x = max_x.max(x);
    }

    if lines.is_empty() {
        return None;
    }

    let background = RectPrimitive::new(
        bounds.left,
        bounds.top,
        max_x - bounds.left,
        y + CAPTION_LINE_GAP_PX - bounds.top,
        Color::from_rgba_u32(CAPTION_BACKGROUND),
    )
    .with_border(1.0, Color::BLACK);

    Some(CaptionPrimitive { background, lines })
}
