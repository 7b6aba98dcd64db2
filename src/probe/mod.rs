// Re-export probe types from ffscale-av
pub use ffscale_av::probe::*;

use crate::scale::VideoInfo;
use anyhow::{Context, Result};
use std::path::Path;

/// What probing found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The first real video stream.
    Video(VideoInfo),
    /// Not decodable as media, or no video stream.
    NotVideo,
}

/// Probe a file with the given ffprobe executable.
///
/// "Invalid data" from ffprobe is not an error here; any other probe
/// failure is.
pub fn probe_video(path: &Path, ffprobe: &Path) -> Result<ProbeOutcome> {
    match probe_with_ffprobe(path, ffprobe) {
        Ok(info) => Ok(outcome_for(&info)),
        Err(e) if e.is_invalid_data() => {
            tracing::debug!("{}", e);
            Ok(ProbeOutcome::NotVideo)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to probe {:?}", path)),
    }
}

fn outcome_for(info: &MediaInfo) -> ProbeOutcome {
    match info.primary_video() {
        Some(track) => ProbeOutcome::Video(VideoInfo::from(track)),
        None => ProbeOutcome::NotVideo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn media(video_tracks: Vec<VideoTrack>) -> MediaInfo {
        MediaInfo {
            file_path: PathBuf::from("/videos/clip.mp4"),
            video_tracks,
        }
    }

    #[test]
    fn test_first_video_track_wins() {
        let track = |codec: &str, width, height| VideoTrack {
            index: 0,
            codec: codec.to_string(),
            width,
            height,
        };
        let info = media(vec![track("h264", 1920, 1080), track("mjpeg", 320, 240)]);

        assert_eq!(
            outcome_for(&info),
            ProbeOutcome::Video(VideoInfo {
                width: 1920,
                height: 1080,
                codec_name: "h264".to_string(),
            })
        );
    }

    #[test]
    fn test_audio_only_is_not_video() {
        assert_eq!(outcome_for(&media(vec![])), ProbeOutcome::NotVideo);
    }

    #[test]
    fn test_missing_ffprobe_is_fatal() {
        let err = probe_video(
            Path::new("/videos/clip.mp4"),
            Path::new("/nonexistent/bin/ffprobe"),
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("tool not found: ffprobe"));
    }
}
