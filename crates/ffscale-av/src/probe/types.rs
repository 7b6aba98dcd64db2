//! Media information types.

use std::path::PathBuf;

/// What ffprobe reported about a media file.
#[derive(Debug, Clone)]
pub struct MediaInfo {
    /// Path to the media file.
    pub file_path: PathBuf,
    /// Video tracks in the file, cover art excluded.
    pub video_tracks: Vec<VideoTrack>,
}

/// Information about a video track.
#[derive(Debug, Clone)]
pub struct VideoTrack {
    /// Stream index within the container.
    pub index: u32,
    /// Codec name as reported by ffprobe (e.g., "h264", "hevc").
    pub codec: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl MediaInfo {
    /// Get the primary (first) video track.
    pub fn primary_video(&self) -> Option<&VideoTrack> {
        self.video_tracks.first()
    }
}
