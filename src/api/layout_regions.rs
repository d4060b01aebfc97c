use crate::core::{ScreenRect, Viewport};

/// Circle center and radius used by the pie and polar charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleRegion {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl CircleRegion {
    /// Bounds used to clip hover captions.
    #[must_use]
    pub fn bounds(self) -> ScreenRect {
        ScreenRect::new(
            self.center_x - self.radius,
            self.center_y - self.radius,
            self.center_x + self.radius,
            self.center_y + self.radius,
        )
    }
}

fn size(viewport: Viewport) -> (f64, f64) {
    (f64::from(viewport.width), f64::from(viewport.height))
}

/// Drawing rect shared by the bar chart and the plot.
#[must_use]
pub fn chart_rect(viewport: Viewport) -> ScreenRect {
    let (width, height) = size(viewport);
    ScreenRect::new(width / 100.0, height / 100.0, width - 10.0, height - 10.0)
}

#[must_use]
pub fn tree_rect(viewport: Viewport) -> ScreenRect {
    let (width, height) = size(viewport);
    ScreenRect::new(width / 100.0, height / 15.0, width - 10.0, height - 40.0)
}

fn centered(viewport: Viewport, inset: f64) -> CircleRegion {
    let (width, height) = size(viewport);
    CircleRegion {
        center_x: width / 2.0,
        center_y: height / 2.0,
        radius: (width / 2.0).min(height / 2.0) - inset,
    }
}

#[must_use]
pub fn circle_region(viewport: Viewport) -> CircleRegion {
    centered(viewport, 30.0)
}

#[must_use]
pub fn polar_region(viewport: Viewport) -> CircleRegion {
    centered(viewport, 50.0)
}
