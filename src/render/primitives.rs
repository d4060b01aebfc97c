use crate::error::{DiagramError, DiagramResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from a packed `0xRRGGBBAA` value.
    #[must_use]
    pub fn from_rgba_u32(packed: u32) -> Self {
        let channel = |shift: u32| f64::from((packed >> shift) & 0xFF) / 255.0;
        Self::rgba(channel(24), channel(16), channel(8), channel(0))
    }

    pub fn validate(self) -> DiagramResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DiagramError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn validate_points(points: &[(f64, f64)], what: &str) -> DiagramResult<()> {
    if points.iter().all(|(x, y)| x.is_finite() && y.is_finite()) {
        Ok(())
    } else {
        Err(DiagramError::InvalidData(format!(
            "{what} coordinates must be finite"
        )))
    }
}

fn validate_stroke(stroke_width: f64, what: &str) -> DiagramResult<()> {
    if !stroke_width.is_finite() || stroke_width <= 0.0 {
        return Err(DiagramError::InvalidData(format!(
            "{what} stroke width must be finite and > 0"
        )));
    }
    Ok(())
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> DiagramResult<()> {
        validate_points(&[(self.x1, self.y1), (self.x2, self.y2)], "line")?;
        validate_stroke(self.stroke_width, "line")?;
        self.color.validate()
    }
}

/// Axis-aligned filled rectangle with an optional border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub border_width: f64,
    pub border_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            border_width: 0.0,
            border_color: fill_color,
        }
    }

    #[must_use]
    pub const fn with_border(mut self, border_width: f64, border_color: Color) -> Self {
        self.border_width = border_width;
        self.border_color = border_color;
        self
    }

    pub fn validate(self) -> DiagramResult<()> {
        validate_points(&[(self.x, self.y)], "rect")?;
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(DiagramError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(DiagramError::InvalidData(
                "rect border width must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.border_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space; `y` is the text baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> DiagramResult<()> {
        if self.text.is_empty() {
            return Err(DiagramError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        validate_points(&[(self.x, self.y)], "text")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(DiagramError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Filled and/or stroked circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub fill_color: Option<Color>,
    pub stroke: Option<(f64, Color)>,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn filled(center_x: f64, center_y: f64, radius: f64, color: Color) -> Self {
        Self {
            center_x,
            center_y,
            radius,
            fill_color: Some(color),
            stroke: None,
        }
    }

    #[must_use]
    pub const fn stroked(
        center_x: f64,
        center_y: f64,
        radius: f64,
        stroke_width: f64,
        color: Color,
    ) -> Self {
        Self {
            center_x,
            center_y,
            radius,
            fill_color: None,
            stroke: Some((stroke_width, color)),
        }
    }

    pub fn validate(self) -> DiagramResult<()> {
        validate_points(&[(self.center_x, self.center_y)], "circle")?;
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(DiagramError::InvalidData(
                "circle radius must be finite and > 0".to_owned(),
            ));
        }
        if let Some(color) = self.fill_color {
            color.validate()?;
        }
        if let Some((stroke_width, color)) = self.stroke {
            validate_stroke(stroke_width, "circle")?;
            color.validate()?;
        }
        Ok(())
    }
}

/// Filled pie wedge.
///
/// Angles are radians measured clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgePrimitive {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub begin_angle: f64,
    pub end_angle: f64,
    pub color: Color,
}

impl WedgePrimitive {
    pub fn validate(self) -> DiagramResult<()> {
        validate_points(&[(self.center_x, self.center_y)], "wedge")?;
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(DiagramError::InvalidData(
                "wedge radius must be finite and > 0".to_owned(),
            ));
        }
        if !self.begin_angle.is_finite()
            || !self.end_angle.is_finite()
            || self.end_angle < self.begin_angle
        {
            return Err(DiagramError::InvalidData(
                "wedge angles must be finite and ordered".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Filled triangle, used for polar area fans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrianglePrimitive {
    pub points: [(f64, f64); 3],
    pub color: Color,
}

impl TrianglePrimitive {
    pub fn validate(self) -> DiagramResult<()> {
        validate_points(&self.points, "triangle")?;
        self.color.validate()
    }
}

/// Caption box: a bordered background behind wrapped text lines.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionPrimitive {
    pub background: RectPrimitive,
    pub lines: Vec<TextPrimitive>,
}

impl CaptionPrimitive {
    pub fn validate(&self) -> DiagramResult<()> {
        self.background.validate()?;
        for line in &self.lines {
            line.validate()?;
        }
        Ok(())
    }
}
