use anyhow::Context;
use hex_literal::hex;

use meshgrad::encode::{encode, OutputFormat};
use meshgrad::gradient::{generate_pixels, GradientOptions, NoiseSpec};
use meshgrad::rand::Rng;

const SEED: [u8; 16] = hex!("efa7bdd92b5e9cd9de9b54ac0e3dc606");

fn sample_options() -> GradientOptions {
    GradientOptions {
        width: 48,
        height: 32,
        colors: vec!["#e0c3fc".into(), "#8ec5fc".into(), "#f093fb".into()],
        randomness: 0.6,
        power: 3.0,
        corner_radius: 6,
        noise: NoiseSpec::DefaultIntensity,
    }
}

fn generate(options: &GradientOptions) -> anyhow::Result<Vec<u8>> {
    let mut rng = Rng::from_seed(&SEED);
    generate_pixels(options, &mut rng).context("generate pixels")
}

#[test]
fn test_pipeline_is_deterministic() -> anyhow::Result<()> {
    let options = sample_options();
    let first = generate(&options)?;
    let second = generate(&options)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_png_roundtrip_preserves_pixels() -> anyhow::Result<()> {
    let options = sample_options();
    let pixels = generate(&options)?;
    let image = encode(&pixels, options.width, options.height, OutputFormat::Png, 80)
        .context("encode png")?;
    assert_eq!(image.content_type, "image/png");

    let decoded = image::load_from_memory(&image.bytes)
        .context("decode png")?
        .into_rgba8();
    assert_eq!((decoded.width(), decoded.height()), (options.width, options.height));
    assert_eq!(decoded.as_raw(), &pixels);
    Ok(())
}

#[test]
fn test_webp_roundtrip_preserves_pixels() -> anyhow::Result<()> {
    let options = sample_options();
    let pixels = generate(&options)?;
    let image = encode(&pixels, options.width, options.height, OutputFormat::Webp, 80)
        .context("encode webp")?;
    assert_eq!(image.content_type, "image/webp");

    // The encoder is lossless, so the roundtrip is byte-exact.
    let decoded = image::load_from_memory(&image.bytes)
        .context("decode webp")?
        .into_rgba8();
    assert_eq!(decoded.as_raw(), &pixels);
    Ok(())
}

#[test]
fn test_jpeg_flattens_corners_onto_black() -> anyhow::Result<()> {
    // Bright gradient with aggressive rounding so the cut-out corners contrast
    // with the interior after flattening.
    let options = GradientOptions {
        width: 64,
        height: 64,
        colors: vec!["#ffffff".into(), "#ffeecc".into()],
        randomness: 0.0,
        power: 2.0,
        corner_radius: 16,
        noise: NoiseSpec::Disabled,
    };
    let pixels = generate(&options)?;
    let image = encode(&pixels, options.width, options.height, OutputFormat::Jpeg, 90)
        .context("encode jpeg")?;
    assert_eq!(image.content_type, "image/jpeg");

    let decoded = image::load_from_memory(&image.bytes)
        .context("decode jpeg")?
        .into_rgb8();
    assert_eq!((decoded.width(), decoded.height()), (64, 64));

    // Transparent corner flattened to (near-)black; center still bright.
    let corner = decoded.get_pixel(0, 0);
    for channel in corner.0 {
        assert!(channel < 60, "corner channel too bright: {}", channel);
    }
    let center = decoded.get_pixel(32, 32);
    for channel in center.0 {
        assert!(channel > 180, "center channel too dark: {}", channel);
    }
    Ok(())
}

#[test]
fn test_empty_colors_surfaces_as_error() {
    let options = GradientOptions {
        colors: Vec::new(),
        ..sample_options()
    };
    let mut rng = Rng::from_seed(&SEED);
    let err = generate_pixels(&options, &mut rng).unwrap_err();
    assert_eq!(err.to_string(), "color list cannot be empty");
}
