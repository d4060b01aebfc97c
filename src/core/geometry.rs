//! Pure geometry and number helpers shared by every diagram engine.

use crate::render::Color;

/// Average glyph advance as a fraction of the font size.
pub const GLYPH_WIDTH_RATIO: f64 = 0.6;

const ROUND_EXPONENT_MIN: i32 = -10;
const ROUND_EXPONENT_MAX: i32 = 10;

/// Euclidean distance between two points.
#[must_use]
pub fn distance(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    (x0 - x1).hypot(y0 - y1)
}

/// Estimated rendered width of `text` for a monospace-ish font.
#[must_use]
pub fn text_width(text: &str, font_size_px: f64) -> f64 {
    text.chars().count() as f64 * font_size_px * GLYPH_WIDTH_RATIO
}

/// `digit * 10^exponent`, computed so negative exponents stay correctly rounded.
fn scaled(digit: f64, exponent: i32) -> f64 {
    if exponent >= 0 {
        digit * 10f64.powi(exponent)
    } else {
        digit / 10f64.powi(-exponent)
    }
}

fn round_candidates(digits: &'static [f64]) -> impl Iterator<Item = f64> {
    (ROUND_EXPONENT_MIN..=ROUND_EXPONENT_MAX)
        .flat_map(move |exponent| digits.iter().map(move |digit| scaled(*digit, exponent)))
}

/// Closest value of the form `{1, 2, 5} x 10^k`, `k` in `-10..=10`.
///
/// Exact ties resolve to the smaller candidate.
#[must_use]
pub fn nearest_round_number(value: f64) -> f64 {
    let tolerance = value.abs() * 1e-9;
    let mut best = 1.0;
    let mut best_diff = f64::INFINITY;
    for candidate in round_candidates(&[1.0, 2.0, 5.0]) {
        let diff = (candidate - value).abs();
        if diff < best_diff - tolerance {
            best = candidate;
            best_diff = diff;
        }
    }
    best
}

/// Smallest value of the form `d x 10^k` (`d` in `1..=9`) that is `>= value`.
///
/// Values beyond the candidate range are returned unchanged.
#[must_use]
pub fn round_number_at_least(value: f64) -> f64 {
    const DIGITS: [f64; 9] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
    round_candidates(&DIGITS)
        .find(|candidate| *candidate >= value)
        .unwrap_or(value)
}

/// Formats a grid label for a multiple of `step` without float noise.
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-(step.log10() + 1e-9).floor()).max(0.0) as usize
    } else {
        0
    };
    let text = format!("{value:.decimals$}");
    if text.starts_with('-') && text.trim_start_matches(['-', '0', '.']).is_empty() {
        return text[1..].to_owned();
    }
    text
}

/// Deterministic opaque color derived from `seed`.
///
/// Equal seeds always produce equal colors, so redraws are visually stable.
#[must_use]
pub fn pseudo_color(seed: f64) -> Color {
    let mut state = seed.to_bits();
    state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    state = (state ^ (state >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    state = (state ^ (state >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    state ^= state >> 31;

    let channel = |shift: u32| f64::from(((state >> shift) & 0xFF) as u8) / 255.0;
    Color::rgb(channel(0), channel(8), channel(16))
}

/// Seed for a name-keyed color: sum of the name's code points scaled by `factor`.
#[must_use]
pub fn name_seed(name: &str, factor: f64) -> f64 {
    let code_sum: u64 = name.chars().map(u64::from).sum();
    code_sum as f64 * factor
}

/// Endpoints of the two arrow-head strokes for a shaft from `(x0, y0)` to `(x1, y1)`.
///
/// Each stroke runs from the returned point to the tip `(x1, y1)`.
#[must_use]
pub fn arrow_head(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    length: f64,
    angle: f64,
) -> [(f64, f64); 2] {
    let vector_x = x1 - x0;
    let vector_y = y1 - y0;
    let vector_len = vector_x.hypot(vector_y);
    if vector_len == 0.0 {
        return [(x1, y1), (x1, y1)];
    }

    let rotated = |theta: f64| {
        let (sin, cos) = theta.sin_cos();
        let rx = (vector_x * cos - vector_y * sin) * length / vector_len;
        let ry = (vector_x * sin + vector_y * cos) * length / vector_len;
        (x1 - rx, y1 - ry)
    };
    [rotated(angle), rotated(-angle)]
}

/// Vertex `index` of a regular `count`-gon, vertex 0 pointing straight up.
#[must_use]
pub fn polygon_vertex(
    center_x: f64,
    center_y: f64,
    radius: f64,
    count: usize,
    index: usize,
) -> (f64, f64) {
    let angle = std::f64::consts::TAU / count as f64 * index as f64 - std::f64::consts::FRAC_PI_2;
    let (sin, cos) = angle.sin_cos();
    (center_x + cos * radius, center_y + sin * radius)
}
