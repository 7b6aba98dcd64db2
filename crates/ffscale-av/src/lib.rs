//! # ffscale-av
//!
//! ffprobe/ffmpeg plumbing used by `ffscale`.
//!
//! This crate provides functionality for:
//! - Probing media files with `ffprobe` to find the primary video stream
//! - Rendering output file names from `{dir}{name}{ext}` style templates
//! - Staging output next to its destination and committing it atomically
//! - Rescaling (or dropping) the video track with `ffmpeg`
//!
//! ## Features
//!
//! - `scale` - Rescaling action using the ffmpeg CLI
//! - `all` - Enable all features
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use ffscale_av::{get_tool_path, probe::probe_with_ffprobe};
//! use std::path::Path;
//!
//! let ffprobe = get_tool_path("ffprobe", None)?;
//! let info = probe_with_ffprobe(Path::new("/path/to/video.mp4"), &ffprobe)?;
//! if let Some(video) = info.primary_video() {
//!     println!("{} {}x{}", video.codec, video.width, video.height);
//! }
//! # Ok::<(), ffscale_av::Error>(())
//! ```

mod error;
pub mod probe;
pub mod template;
pub mod tools;
pub mod workspace;

#[cfg(feature = "scale")]
pub mod actions;

// Re-exports
pub use error::{Error, Result};
pub use probe::{MediaInfo, VideoTrack};
pub use template::TemplateContext;
pub use tools::{get_tool_path, require_tool};
pub use workspace::Workspace;
