//! Still image and animation commands.

use bytes::Bytes;
use image::DynamicImage;

use crate::commands::EncodeEnv;
use crate::error::{PixelError, Result};
use crate::protocol::{frame_windows, FrameClass, SendPlan};
use crate::render::{encode_gif, encode_png, normalize_frames, resize_to, Animation, ResizePolicy};

/// Display a decoded still image, resized to the matrix and re-encoded
/// as PNG container bytes.
#[derive(Debug, Clone)]
pub struct StillImageCommand {
    /// Decoded source image.
    pub image: DynamicImage,
    /// Resize policy.
    pub policy: ResizePolicy,
}

impl StillImageCommand {
    /// Create a still-image command with the default center-crop policy.
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            policy: ResizePolicy::default(),
        }
    }

    /// Select the resize policy.
    pub fn policy(mut self, policy: ResizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resize, re-encode and frame the image.
    pub fn encode(&self, env: &EncodeEnv) -> Result<SendPlan> {
        let canvas = resize_to(&self.image, env.device.width, env.device.height, self.policy);
        let png = encode_png(&canvas)?;
        Ok(frame_windows(
            "send_image",
            Bytes::from(png),
            FrameClass::StillImage,
        ))
    }
}

/// Display a decoded animation, normalized frame-by-frame and re-encoded
/// as GIF container bytes.
#[derive(Debug, Clone)]
pub struct AnimationCommand {
    /// Decoded frames plus global metadata defaults.
    pub animation: Animation,
    /// Resize policy applied to every frame.
    pub policy: ResizePolicy,
}

impl AnimationCommand {
    /// Create an animation command with the default center-crop policy.
    pub fn new(animation: Animation) -> Self {
        Self {
            animation,
            policy: ResizePolicy::default(),
        }
    }

    /// Select the resize policy.
    pub fn policy(mut self, policy: ResizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Normalize, re-encode and frame the animation.
    pub fn encode(&self, env: &EncodeEnv) -> Result<SendPlan> {
        if self.animation.frames.is_empty() {
            return Err(PixelError::OutOfRange {
                name: "frame count",
                value: 0,
                min: 1,
                max: i64::MAX,
            });
        }

        let frames = normalize_frames(
            &self.animation,
            env.device.width,
            env.device.height,
            self.policy,
        );
        let gif = encode_gif(&frames, self.animation.loop_count)?;
        Ok(frame_windows(
            "send_animation",
            Bytes::from(gif),
            FrameClass::Animation,
        ))
    }
}
