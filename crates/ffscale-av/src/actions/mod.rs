//! Media processing actions.
//!
//! This module provides the ffmpeg-backed rescaling operation, including
//! dropping the video track entirely.

mod scale;

pub use scale::{ffmpeg_args, scale, ScaleOptions, VideoScale};
