use core::fmt::Debug;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use std::{fmt::Display, fs::File, str::FromStr};

use anyhow::Context;
use clap::Parser;

use meshgrad::config::{EncodeArgs, GradientArgs};
use meshgrad::encode::{encode, ImageOptions, OutputFormat};
use meshgrad::gradient::{generate_pixels, GradientOptions};
use meshgrad::rand::Rng;

#[derive(Parser)]
struct Opts {
    #[clap(flatten)]
    gradient: GradientArgs,

    #[clap(flatten)]
    encode: EncodeArgs,

    /// Hex seed for reproducible output. A fresh seed is drawn from the clock
    /// when omitted, and either way it appears in the default output filename.
    #[clap(long)]
    seed: Option<Seed>,

    /// Read a full JSON options object (gradient + format + quality) instead
    /// of the individual flags. Gradient values are used as-is, without the
    /// command-line clamps.
    #[clap(long)]
    options: Option<PathBuf>,

    /// Output file. Defaults to gradient-<seed>.<ext> in the working directory.
    #[clap(short, long)]
    out: Option<PathBuf>,
}

#[derive(Clone)]
struct Seed(pub Vec<u8>);

impl Seed {
    fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn from_clock() -> Seed {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        Seed(nanos.to_le_bytes().to_vec())
    }
}

impl FromStr for Seed {
    type Err = anyhow::Error;
    fn from_str(mut s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") {
            s = &s[2..];
        }
        Ok(Seed(hex::decode(s)?))
    }
}

impl Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("0x")?;
        f.write_str(&hex::encode(&self.0))
    }
}

impl Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Debug>::fmt(self, f)
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let (options, format, quality): (GradientOptions, OutputFormat, u8) = match &opts.options {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("open options file '{}'", path.display()))?;
            let image_opts: ImageOptions = serde_json::from_reader(file)
                .with_context(|| format!("parse options file '{}'", path.display()))?;
            let quality = image_opts.clamped_quality();
            (image_opts.gradient, image_opts.format, quality)
        }
        None => (
            opts.gradient.to_options(),
            opts.encode.format,
            opts.encode.clamped_quality(),
        ),
    };

    let seed = opts.seed.clone().unwrap_or_else(Seed::from_clock);
    let mut rng = Rng::from_seed(seed.as_bytes());
    let pixels = generate_pixels(&options, &mut rng)?;

    let image = encode(&pixels, options.width, options.height, format, quality)
        .context("encode image")?;

    let out = opts
        .out
        .unwrap_or_else(|| PathBuf::from(format!("gradient-{}.{}", seed, format.extension())));
    std::fs::write(&out, &image.bytes)
        .with_context(|| format!("write '{}'", out.display()))?;
    eprintln!(
        "wrote {} ({}, {} bytes, seed {})",
        out.display(),
        image.content_type,
        image.bytes.len(),
        seed
    );
    Ok(())
}
