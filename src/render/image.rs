//! Image and animation preparation.
//!
//! The firmware consumes encoded container bytes (PNG for stills, GIF for
//! animations) sized exactly to the matrix. This module brings arbitrary
//! decoded sources to that form:
//!
//! - resize with either policy: **fit** (letterbox: preserve aspect, pad
//!   with black) or **crop** (fill: cover the target, center-crop the
//!   excess), both through a Lanczos3 filter;
//! - normalize animations so the re-encoded GIF has exactly one duration
//!   and one disposal value per frame, falling back to the source's global
//!   default and then to 100 ms / restore-to-background.

use image::imageops::FilterType;
use image::{imageops, DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;

use crate::error::Result;

/// Fallback frame duration when neither the frame nor the source declares
/// one.
pub const FALLBACK_DURATION_MS: u32 = 100;

/// Fallback disposal method (restore to background).
pub const FALLBACK_DISPOSAL: u8 = 2;

/// How a source image maps onto the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Fill the whole target and center-crop the excess.
    #[default]
    Crop,
    /// Show the whole source, letterboxed with black padding.
    Fit,
}

/// Resize a decoded image to exact target dimensions under a policy.
///
/// The output is always plain RGB; palette and alpha are flattened.
pub fn resize_to(image: &DynamicImage, width: u32, height: u32, policy: ResizePolicy) -> RgbImage {
    if image.width() == width && image.height() == height {
        return image.to_rgb8();
    }

    let src_aspect = image.width() as f64 / image.height() as f64;
    let target_aspect = width as f64 / height as f64;

    match policy {
        ResizePolicy::Crop => {
            let (new_w, new_h) = if src_aspect > target_aspect {
                ((height as f64 * src_aspect) as u32, height)
            } else {
                (width, (width as f64 / src_aspect) as u32)
            };
            let scaled = image.resize_exact(new_w.max(width), new_h.max(height), FilterType::Lanczos3);
            let left = (scaled.width() - width) / 2;
            let top = (scaled.height() - height) / 2;
            scaled.crop_imm(left, top, width, height).to_rgb8()
        }
        ResizePolicy::Fit => {
            let (new_w, new_h) = if src_aspect > target_aspect {
                (width, (width as f64 / src_aspect) as u32)
            } else {
                ((height as f64 * src_aspect) as u32, height)
            };
            let scaled = image
                .resize_exact(new_w.clamp(1, width), new_h.clamp(1, height), FilterType::Lanczos3)
                .to_rgb8();
            let mut canvas = RgbImage::new(width, height);
            let x = (width - scaled.width()) / 2;
            let y = (height - scaled.height()) / 2;
            imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);
            canvas
        }
    }
}

/// Re-encode an RGB canvas as PNG container bytes.
pub fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    canvas.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// One decoded frame of an animated source, with whatever per-frame
/// metadata the container carried.
#[derive(Debug, Clone)]
pub struct AnimationFrame {
    /// Decoded frame pixels.
    pub image: DynamicImage,
    /// Frame-local duration, when the container declared one.
    pub duration_ms: Option<u32>,
    /// Frame-local disposal method, when declared.
    pub disposal: Option<u8>,
}

/// A decoded animated source plus its global metadata defaults.
#[derive(Debug, Clone, Default)]
pub struct Animation {
    /// Frames in playback order.
    pub frames: Vec<AnimationFrame>,
    /// Source-global duration default.
    pub default_duration_ms: Option<u32>,
    /// Source-global disposal default.
    pub default_disposal: Option<u8>,
    /// Loop count; `None` loops forever.
    pub loop_count: Option<u16>,
}

/// A frame normalized for re-encoding: exact-size pixels, one duration,
/// one disposal value.
#[derive(Debug, Clone)]
pub struct NormalizedFrame {
    /// Frame resized to the matrix.
    pub image: RgbImage,
    /// Display duration in milliseconds.
    pub duration_ms: u32,
    /// GIF disposal method (0-3).
    pub disposal: u8,
}

/// Resize every frame and resolve its metadata through the fallback chain
/// frame-local -> source default -> global fallback.
pub fn normalize_frames(
    animation: &Animation,
    width: u32,
    height: u32,
    policy: ResizePolicy,
) -> Vec<NormalizedFrame> {
    animation
        .frames
        .iter()
        .map(|frame| NormalizedFrame {
            image: resize_to(&frame.image, width, height, policy),
            duration_ms: frame
                .duration_ms
                .or(animation.default_duration_ms)
                .unwrap_or(FALLBACK_DURATION_MS),
            disposal: frame
                .disposal
                .or(animation.default_disposal)
                .unwrap_or(FALLBACK_DISPOSAL),
        })
        .collect()
}

/// Re-encode normalized frames as GIF container bytes.
pub fn encode_gif(frames: &[NormalizedFrame], loop_count: Option<u16>) -> Result<Vec<u8>> {
    let width = frames.first().map(|f| f.image.width()).unwrap_or(0) as u16;
    let height = frames.first().map(|f| f.image.height()).unwrap_or(0) as u16;

    let mut out = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut out, width, height, &[])?;
        encoder.set_repeat(match loop_count {
            Some(n) => gif::Repeat::Finite(n),
            None => gif::Repeat::Infinite,
        })?;

        for frame in frames {
            let mut gif_frame =
                gif::Frame::from_rgb(width, height, frame.image.as_raw());
            // GIF delays tick in 10 ms units.
            gif_frame.delay = (frame.duration_ms / 10).min(u16::MAX as u32) as u16;
            gif_frame.dispose = disposal_method(frame.disposal);
            encoder.write_frame(&gif_frame)?;
        }
    }
    Ok(out)
}

fn disposal_method(value: u8) -> gif::DisposalMethod {
    match value {
        0 => gif::DisposalMethod::Any,
        1 => gif::DisposalMethod::Keep,
        3 => gif::DisposalMethod::Previous,
        _ => gif::DisposalMethod::Background,
    }
}
