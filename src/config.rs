use std::str::FromStr;

use anyhow::{anyhow, Context};

use crate::encode::OutputFormat;
use crate::gradient::{GradientOptions, NoiseSpec};

/// Largest accepted width or height; larger requests are capped, not rejected.
pub const MAX_DIMENSION: u32 = 2048;

/// Gradient parameters as they arrive at the command line, before clamping.
///
/// [`GradientArgs::to_options`] applies the same validation the hosted image
/// endpoint applied to its query string: dimensions capped at
/// [`MAX_DIMENSION`], randomness clamped to `[0, 1]`, power to `[0.5, 10]`,
/// and noise intensity to `[0, 255]`.
#[derive(Debug, Clone, clap::Args)]
pub struct GradientArgs {
    /// Comma-separated hex colors, with or without a leading '#'.
    #[clap(long, value_delimiter = ',', required_unless_present = "options")]
    pub colors: Vec<String>,

    /// Output size as <width>x<height>.
    #[clap(long, default_value = "1200x1200")]
    pub size: Size,

    /// Rounded-corner radius in pixels.
    #[clap(long, default_value_t = 0)]
    pub corner_radius: u32,

    /// Point jitter: 0 is a perfect grid, 1 is maximum chaos.
    #[clap(long, default_value_t = 0.5)]
    pub randomness: f64,

    /// Sharpness of the color-zone falloff.
    #[clap(long, default_value_t = 3.0)]
    pub power: f64,

    /// Noise texture: "true" for the default intensity, or an amplitude 0-255.
    #[clap(long)]
    pub noise: Option<NoiseSpec>,
}

impl GradientArgs {
    pub fn to_options(&self) -> GradientOptions {
        let colors = self
            .colors
            .iter()
            .map(|c| c.trim_start_matches('#'))
            .filter(|c| !c.is_empty())
            .map(|c| format!("#{}", c))
            .collect();
        let noise = match self.noise {
            None => NoiseSpec::Disabled,
            Some(NoiseSpec::Intensity(v)) => NoiseSpec::Intensity(v.clamp(0.0, 255.0)),
            Some(spec) => spec,
        };
        GradientOptions {
            width: self.size.width.min(MAX_DIMENSION),
            height: self.size.height.min(MAX_DIMENSION),
            colors,
            randomness: self.randomness.clamp(0.0, 1.0),
            power: self.power.clamp(0.5, 10.0),
            corner_radius: self.corner_radius,
            noise,
        }
    }
}

/// Encoding parameters for the output container.
#[derive(Debug, Clone, clap::Args)]
pub struct EncodeArgs {
    /// Output image format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// Quality for lossy formats, clamped to 1-100.
    #[clap(long, default_value_t = 80)]
    pub quality: u8,
}

impl EncodeArgs {
    pub fn clamped_quality(&self) -> u8 {
        self.quality.clamp(1, 100)
    }
}

/// A `<width>x<height>` pixel size.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Size {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once('x')
            .ok_or_else(|| anyhow!("expected <width>x<height>, got '{}'", s))?;
        let width: u32 = w.parse().with_context(|| format!("bad width '{}'", w))?;
        let height: u32 = h.parse().with_context(|| format!("bad height '{}'", h))?;
        if width == 0 || height == 0 {
            return Err(anyhow!("width and height must be positive"));
        }
        Ok(Size { width, height })
    }
}

impl FromStr for NoiseSpec {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(NoiseSpec::DefaultIntensity),
            "false" => Ok(NoiseSpec::Disabled),
            _ => {
                let intensity: f64 = s
                    .parse()
                    .map_err(|_| anyhow!("expected 'true', 'false', or a number, got '{}'", s))?;
                Ok(NoiseSpec::Intensity(intensity))
            }
        }
    }
}
