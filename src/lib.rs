//! ffscale - Batch upscale/downscale of video files with ffmpeg
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod probe;
pub mod processor;
pub mod scale;
pub mod settings;
