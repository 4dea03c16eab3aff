use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageResult};
use serde::{Deserialize, Serialize};

use crate::gradient::GradientOptions;

/// Container format for the encoded gradient.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Webp,
    Jpeg,
}

impl OutputFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Webp => "image/webp",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

/// A full image request: gradient options plus encoding choices, in the same
/// JSON shape the hosted endpoint accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageOptions {
    #[serde(flatten)]
    pub gradient: GradientOptions,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_quality")]
    pub quality: u8,
}

impl ImageOptions {
    pub fn clamped_quality(&self) -> u8 {
        self.quality.clamp(1, 100)
    }
}

fn default_quality() -> u8 {
    80
}

/// Encoded image bytes plus the MIME type a response would declare.
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Encodes a raw RGBA buffer into the requested container format.
///
/// PNG and WebP are lossless (the `image` crate has no lossy WebP encoder, so
/// `quality` only affects JPEG). JPEG carries no alpha channel, so transparent
/// pixels are flattened onto a black background before encoding.
pub fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: OutputFormat,
    quality: u8,
) -> ImageResult<EncodedImage> {
    let mut bytes = Vec::new();
    match format {
        OutputFormat::Png => {
            PngEncoder::new(Cursor::new(&mut bytes)).write_image(
                pixels,
                width,
                height,
                ExtendedColorType::Rgba8,
            )?;
        }
        OutputFormat::Webp => {
            WebPEncoder::new_lossless(Cursor::new(&mut bytes)).write_image(
                pixels,
                width,
                height,
                ExtendedColorType::Rgba8,
            )?;
        }
        OutputFormat::Jpeg => {
            let flattened = flatten_onto_black(pixels);
            JpegEncoder::new_with_quality(Cursor::new(&mut bytes), quality).write_image(
                &flattened,
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
    }
    Ok(EncodedImage {
        bytes,
        content_type: format.content_type(),
    })
}

/// Composites RGBA pixels over black and drops the alpha channel.
fn flatten_onto_black(pixels: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
    for px in pixels.chunks_exact(4) {
        let alpha = u16::from(px[3]);
        rgb.push((u16::from(px[0]) * alpha / 255) as u8);
        rgb.push((u16::from(px[1]) * alpha / 255) as u8);
        rgb.push((u16::from(px[2]) * alpha / 255) as u8);
    }
    rgb
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_flatten_opaque_passthrough() {
        let pixels = [10, 20, 30, 255, 200, 100, 50, 255];
        assert_eq!(flatten_onto_black(&pixels), vec![10, 20, 30, 200, 100, 50]);
    }

    #[test]
    fn test_flatten_transparent_to_black() {
        let pixels = [255, 255, 255, 0];
        assert_eq!(flatten_onto_black(&pixels), vec![0, 0, 0]);
    }

    #[test]
    fn test_image_options_wire_form() {
        let opts: ImageOptions = serde_json::from_str(
            r##"{"width": 8, "height": 8, "colors": ["#f00"], "format": "webp", "quality": 120}"##,
        )
        .unwrap();
        assert_eq!(opts.format, OutputFormat::Webp);
        assert_eq!(opts.quality, 120);
        assert_eq!(opts.clamped_quality(), 100);
        assert_eq!(opts.gradient.width, 8);

        let opts: ImageOptions =
            serde_json::from_str(r##"{"width": 8, "height": 8, "colors": ["#f00"]}"##).unwrap();
        assert_eq!(opts.format, OutputFormat::Png);
        assert_eq!(opts.quality, 80);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(OutputFormat::Png.content_type(), "image/png");
        assert_eq!(OutputFormat::Webp.content_type(), "image/webp");
        assert_eq!(OutputFormat::Jpeg.content_type(), "image/jpeg");
    }
}
