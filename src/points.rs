use std::fmt;

use crate::color::{parse_hex, Rgb};
use crate::math::clamp_unit;
use crate::rand::Rng;

/// A color seed point in normalized `[0, 1] x [0, 1]` space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorPoint {
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
}

#[derive(Debug, PartialEq, Eq)]
pub enum GradientError {
    EmptyColorList,
}

impl fmt::Display for GradientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradientError::EmptyColorList => f.write_str("color list cannot be empty"),
        }
    }
}

impl std::error::Error for GradientError {}

/// Distributes one seed point per color over a near-square grid.
///
/// The grid has `ceil(sqrt(n))` columns and enough rows to hold all points.
/// Each point starts at its cell center and is jittered by a symmetric uniform
/// deviate scaled by `cell_size * randomness` per axis, then clamped into the
/// unit square. A randomness of 0 yields a perfect grid. Output order matches
/// input order, which is how point-to-color correspondence is preserved.
///
/// Two deviates are consumed per point regardless of `randomness`, so seeds
/// stay comparable across randomness settings.
pub fn place_points<S: AsRef<str>>(
    colors: &[S],
    randomness: f64,
    rng: &mut Rng,
) -> Result<Vec<ColorPoint>, GradientError> {
    let num_points = colors.len();
    if num_points == 0 {
        return Err(GradientError::EmptyColorList);
    }

    let cols = (num_points as f64).sqrt().ceil() as usize;
    let rows = (num_points as f64 / cols as f64).ceil() as usize;
    let cell_width = 1.0 / cols as f64;
    let cell_height = 1.0 / rows as f64;

    let mut points = Vec::with_capacity(num_points);
    for (i, color) in colors.iter().enumerate() {
        let grid_x = (i % cols) as f64;
        let grid_y = (i / cols) as f64;
        let base_x = cell_width * (grid_x + 0.5);
        let base_y = cell_height * (grid_y + 0.5);
        let jitter_x = rng.symmetric(cell_width * randomness);
        let jitter_y = rng.symmetric(cell_height * randomness);
        points.push(ColorPoint {
            x: clamp_unit(base_x + jitter_x),
            y: clamp_unit(base_y + jitter_y),
            color: parse_hex(color.as_ref()),
        });
    }
    Ok(points)
}
