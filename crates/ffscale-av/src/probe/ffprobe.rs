//! FFprobe-based media probing.

use super::types::*;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    error: Option<FfprobeError>,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeError {
    #[serde(default)]
    string: String,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: u32,
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    #[serde(default)]
    disposition: FfprobeDisposition,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeDisposition {
    #[serde(default)]
    attached_pic: u8,
}

/// Whether an ffprobe error message means the input is not decodable media.
pub fn is_invalid_data_message(message: &str) -> bool {
    message.to_lowercase().contains("invalid data")
}

/// Probe a media file using the given ffprobe executable.
///
/// ffprobe exits non-zero when it reports an error, so its JSON output is
/// parsed regardless of the exit status.
pub fn probe_with_ffprobe(path: &Path, ffprobe: &Path) -> Result<MediaInfo> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_error",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffprobe")
            } else {
                Error::Io(e)
            }
        })?;

    let json_str = String::from_utf8(output.stdout)
        .map_err(|e| Error::parse_error("ffprobe", format!("Invalid UTF-8: {}", e)))?;

    #[cfg(feature = "tracing")]
    tracing::debug!("ffprobe output for {:?}:\n{}", path, json_str.trim_end());

    let ff_output: FfprobeOutput = match serde_json::from_str(&json_str) {
        Ok(parsed) => parsed,
        Err(_) if !output.status.success() => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::tool_failed("ffprobe", stderr.trim().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    parse_ffprobe_output(path, ff_output)
}

fn parse_ffprobe_output(path: &Path, output: FfprobeOutput) -> Result<MediaInfo> {
    if let Some(error) = output.error {
        if is_invalid_data_message(&error.string) {
            return Err(Error::invalid_data(path, error.string));
        }
        return Err(Error::tool_failed(
            "ffprobe",
            format!("{}: {}", path.display(), error.string),
        ));
    }

    let video_tracks = output
        .streams
        .into_iter()
        .filter(|stream| stream.codec_type.as_deref() == Some("video"))
        // Embedded cover art is reported as a video stream.
        .filter(|stream| stream.disposition.attached_pic != 1)
        .filter_map(|stream| match (stream.width, stream.height) {
            (Some(width), Some(height)) if width > 0 && height > 0 => Some(VideoTrack {
                index: stream.index,
                codec: stream.codec_name.unwrap_or_default(),
                width,
                height,
            }),
            _ => None,
        })
        .collect();

    Ok(MediaInfo {
        file_path: path.to_path_buf(),
        video_tracks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<MediaInfo> {
        let output: FfprobeOutput = serde_json::from_str(json).unwrap();
        parse_ffprobe_output(Path::new("/videos/clip.mp4"), output)
    }

    const LANDSCAPE_H264: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "h264",
                "codec_type": "video",
                "width": 1920,
                "height": 1080,
                "r_frame_rate": "30000/1001",
                "disposition": { "default": 1, "attached_pic": 0 }
            },
            {
                "index": 1,
                "codec_name": "aac",
                "codec_type": "audio",
                "channels": 2,
                "disposition": { "default": 1, "attached_pic": 0 },
                "tags": { "language": "eng" }
            }
        ]
    }"#;

    #[test]
    fn test_parse_first_video_stream() {
        let info = parse(LANDSCAPE_H264).unwrap();
        assert_eq!(info.video_tracks.len(), 1);
        let video = info.primary_video().unwrap();
        assert_eq!(video.index, 0);
        assert_eq!(video.codec, "h264");
        assert_eq!((video.width, video.height), (1920, 1080));
        assert_eq!(info.file_path, Path::new("/videos/clip.mp4"));
    }

    #[test]
    fn test_invalid_data_error_is_recoverable() {
        let err = parse(
            r#"{ "error": { "code": -1094995529, "string": "Invalid data found when processing input" } }"#,
        )
        .unwrap_err();
        assert!(err.is_invalid_data());
    }

    #[test]
    fn test_other_error_is_tool_failure() {
        let err = parse(
            r#"{ "error": { "code": -2, "string": "No such file or directory" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ToolFailed { ref tool, .. } if tool == "ffprobe"));
    }

    #[test]
    fn test_cover_art_is_not_video() {
        let info = parse(
            r#"{
                "streams": [
                    { "index": 0, "codec_name": "mp3", "codec_type": "audio", "channels": 2 },
                    {
                        "index": 1,
                        "codec_name": "mjpeg",
                        "codec_type": "video",
                        "width": 600,
                        "height": 600,
                        "disposition": { "default": 0, "attached_pic": 1 }
                    }
                ]
            }"#,
        )
        .unwrap();
        assert!(info.primary_video().is_none());
    }

    #[test]
    fn test_video_without_dimensions_is_ignored() {
        let info = parse(
            r#"{ "streams": [
                { "index": 0, "codec_name": "h264", "codec_type": "video" },
                { "index": 1, "codec_name": "vp9", "codec_type": "video", "width": 640, "height": 360 }
            ] }"#,
        )
        .unwrap();
        assert_eq!(info.primary_video().map(|v| v.index), Some(1));
    }

    #[test]
    fn test_is_invalid_data_message() {
        assert!(is_invalid_data_message(
            "Invalid data found when processing input"
        ));
        assert!(is_invalid_data_message("INVALID DATA"));
        assert!(!is_invalid_data_message("No such file or directory"));
    }
}
