use serde::{Deserialize, Serialize};

use crate::math::{clamp_byte, dist};
use crate::points::{place_points, ColorPoint, GradientError};
use crate::rand::Rng;

/// Noise amplitude when callers ask for noise without choosing an intensity.
pub const DEFAULT_NOISE_INTENSITY: f64 = 15.0;

/// Per-pixel noise setting.
///
/// On the wire this is the original's `boolean | number` form: `true` means
/// [`DEFAULT_NOISE_INTENSITY`], `false` disables noise, and a number gives the
/// amplitude in color units.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "WireNoise", into = "WireNoise")]
pub enum NoiseSpec {
    #[default]
    Disabled,
    DefaultIntensity,
    Intensity(f64),
}

#[derive(Copy, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WireNoise {
    Flag(bool),
    Level(f64),
}

impl From<WireNoise> for NoiseSpec {
    fn from(wire: WireNoise) -> Self {
        match wire {
            WireNoise::Flag(false) => NoiseSpec::Disabled,
            WireNoise::Flag(true) => NoiseSpec::DefaultIntensity,
            WireNoise::Level(v) => NoiseSpec::Intensity(v),
        }
    }
}

impl From<NoiseSpec> for WireNoise {
    fn from(spec: NoiseSpec) -> Self {
        match spec {
            NoiseSpec::Disabled => WireNoise::Flag(false),
            NoiseSpec::DefaultIntensity => WireNoise::Flag(true),
            NoiseSpec::Intensity(v) => WireNoise::Level(v),
        }
    }
}

impl NoiseSpec {
    /// The effective amplitude, or `None` when noise is off.
    pub fn intensity(self) -> Option<f64> {
        match self {
            NoiseSpec::Disabled => None,
            NoiseSpec::DefaultIntensity => Some(DEFAULT_NOISE_INTENSITY),
            NoiseSpec::Intensity(v) => Some(v),
        }
    }
}

/// Options for one gradient generation call.
///
/// The serde form matches the original camelCase options object, so a JSON
/// payload like `{"width": 64, "height": 64, "colors": ["#f00"], "noise": true}`
/// deserializes directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientOptions {
    pub width: u32,
    pub height: u32,
    /// Hex color strings; placement order follows list order.
    pub colors: Vec<String>,
    /// Positional jitter, 0 = perfect grid. Callers should clamp to `[0, 1]`.
    #[serde(default = "default_randomness")]
    pub randomness: f64,
    /// IDW falloff exponent; higher values give sharper color zones.
    #[serde(default = "default_power")]
    pub power: f64,
    /// Rounded-corner radius in pixels; 0 leaves the image rectangular.
    #[serde(default)]
    pub corner_radius: u32,
    #[serde(default)]
    pub noise: NoiseSpec,
}

fn default_randomness() -> f64 {
    0.5
}

fn default_power() -> f64 {
    2.0
}

/// Generates the raw RGBA pixel buffer for a mesh gradient.
///
/// This is the whole pipeline: seed points are placed on a jittered grid, then
/// every pixel is rasterized as an inverse-distance-weighted blend. The buffer
/// is `width * height * 4` bytes, row-major, top-to-bottom. The only failure
/// mode is an empty color list, checked before any pixel work begins.
pub fn generate_pixels(options: &GradientOptions, rng: &mut Rng) -> Result<Vec<u8>, GradientError> {
    let points = place_points(&options.colors, options.randomness, rng)?;
    Ok(rasterize(
        options.width,
        options.height,
        &points,
        options.power,
        options.corner_radius,
        options.noise,
        rng,
    ))
}

/// Rasterizes seed points into a flat RGBA buffer.
///
/// Point positions map into pixel space by scaling with `width - 1` and
/// `height - 1`, so points at 0.0 and 1.0 land exactly on border pixels. A
/// pixel at zero distance from a point takes that point's color outright (first
/// such point wins); otherwise channels accumulate `color / d^power` and divide
/// by the total weight. Noise adds one shared deviate to all three channels of
/// a pixel. Alpha is 255 except inside a corner cutout, where it is 0: hard
/// edges, no anti-aliasing. Complexity is O(width * height * points), a single
/// pass with no shared state.
pub fn rasterize(
    width: u32,
    height: u32,
    points: &[ColorPoint],
    power: f64,
    corner_radius: u32,
    noise: NoiseSpec,
    rng: &mut Rng,
) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    let mut pixels = vec![0u8; w * h * 4];
    let noise_intensity = noise.intensity();
    let radius = f64::from(corner_radius);
    let span_x = f64::from(width) - 1.0;
    let span_y = f64::from(height) - 1.0;

    for py in 0..h {
        for px in 0..w {
            let pixel = (px as f64, py as f64);
            let mut red = 0.0;
            let mut green = 0.0;
            let mut blue = 0.0;
            let mut total_weight = 0.0;

            for point in points {
                let d = dist(pixel, (point.x * span_x, point.y * span_y));
                if d == 0.0 {
                    // Exact hit: hard override, discarding the accumulation.
                    red = f64::from(point.color.0);
                    green = f64::from(point.color.1);
                    blue = f64::from(point.color.2);
                    total_weight = 1.0;
                    break;
                }
                let weight = 1.0 / d.powf(power);
                red += f64::from(point.color.0) * weight;
                green += f64::from(point.color.1) * weight;
                blue += f64::from(point.color.2) * weight;
                total_weight += weight;
            }

            if total_weight > 0.0 {
                red /= total_weight;
                green /= total_weight;
                blue /= total_weight;
            }

            if let Some(intensity) = noise_intensity {
                let delta = rng.symmetric(intensity);
                red = (red + delta).clamp(0.0, 255.0);
                green = (green + delta).clamp(0.0, 255.0);
                blue = (blue + delta).clamp(0.0, 255.0);
            }

            let alpha = if radius > 0.0 {
                corner_alpha(pixel, f64::from(width), f64::from(height), radius)
            } else {
                255
            };

            let index = (py * w + px) * 4;
            pixels[index] = clamp_byte(red);
            pixels[index + 1] = clamp_byte(green);
            pixels[index + 2] = clamp_byte(blue);
            pixels[index + 3] = alpha;
        }
    }
    pixels
}

/// Rounded-corner mask: a pixel inside one of the four corner boxes goes fully
/// transparent when it lies outside that corner's quarter circle. The box tests
/// are intentionally asymmetric (`< r` on the leading edges, `> width - r` and
/// `> height - r` on the trailing ones), matching the shape the original
/// renderer produced.
fn corner_alpha((px, py): (f64, f64), width: f64, height: f64, r: f64) -> u8 {
    let outside = |cx: f64, cy: f64| dist((px, py), (cx, cy)) > r;
    if px < r && py < r && outside(r, r) {
        0
    } else if px > width - r && py < r && outside(width - r, r) {
        0
    } else if px < r && py > height - r && outside(r, height - r) {
        0
    } else if px > width - r && py > height - r && outside(width - r, height - r) {
        0
    } else {
        255
    }
}
