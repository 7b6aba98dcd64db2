use super::length::{round_nearest, Length};
use ffscale_av::VideoTrack;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The user's size constraints. At least one must be set for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SizeConstraints {
    pub width: Option<Length>,
    pub height: Option<Length>,
    /// Applies to whichever source side is smaller.
    pub short_side: Option<Length>,
    /// Applies to whichever source side is larger.
    pub long_side: Option<Length>,
}

impl SizeConstraints {
    /// Whether no constraint was given at all.
    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.short_side.is_none()
            && self.long_side.is_none()
    }
}

/// The probed facts the resolver needs about a source video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    pub codec_name: String,
}

impl From<&VideoTrack> for VideoInfo {
    fn from(track: &VideoTrack) -> Self {
        Self {
            width: track.width,
            height: track.height,
            codec_name: track.codec.clone(),
        }
    }
}

/// Which way the output may differ from the source.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Only strictly smaller output on both axes.
    #[default]
    Down,
    /// Only strictly larger output on both axes.
    Up,
    /// Any size.
    Both,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Down => write!(f, "down"),
            Direction::Up => write!(f, "up"),
            Direction::Both => write!(f, "both"),
        }
    }
}

/// Why a file is left alone after its target size was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Direction is `down` but the target is not smaller on both axes.
    NotDownscale,
    /// Direction is `up` but the target is not larger on both axes.
    NotUpscale,
    /// One side came out as zero while the other did not.
    ZeroDimension,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotDownscale => write!(f, "Skipping upscaling."),
            SkipReason::NotUpscale => write!(f, "Skipping downscaling."),
            SkipReason::ZeroDimension => write!(f, "Skipping degenerate target size."),
        }
    }
}

/// Outcome of [`resolve_target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTarget {
    Dimensions { width: u32, height: u32 },
    RemoveVideoTrack,
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("No target size specified.")]
    NoTargetSize,
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Width,
    Height,
}

/// Which axis a short/long side constraint lands on. Square frames route
/// both to the height.
fn side_axis(side: Side, width: u32, height: u32) -> Axis {
    match (side, width.cmp(&height)) {
        (Side::Short, Ordering::Less) => Axis::Width,
        (Side::Long, Ordering::Greater) => Axis::Width,
        _ => Axis::Height,
    }
}

/// Largest even number not above `value`.
pub fn even_floor(value: u32) -> u32 {
    value - value % 2
}

/// Compute the output size for one video.
///
/// Constraints apply in the order width, height, short side, long side;
/// a later one overrides an earlier one on the same axis. A single
/// resolved axis is completed from the source aspect ratio. Codecs in
/// `even_codecs` (compared case-insensitively) get both sides floored to
/// even numbers before the direction check.
///
/// All rounding is half away from zero.
pub fn resolve_target(
    video: &VideoInfo,
    constraints: &SizeConstraints,
    direction: Direction,
    even_codecs: &[String],
) -> Result<ResolvedTarget, ResolveError> {
    let (source_width, source_height) = (video.width, video.height);

    let mut width = constraints.width.map(|l| l.resolve(source_width));
    let mut height = constraints.height.map(|l| l.resolve(source_height));

    let sides = [
        (Side::Short, constraints.short_side),
        (Side::Long, constraints.long_side),
    ];
    for (side, length) in sides {
        let Some(length) = length else { continue };
        match side_axis(side, source_width, source_height) {
            Axis::Width => width = Some(length.resolve(source_width)),
            Axis::Height => height = Some(length.resolve(source_height)),
        }
    }

    let (width, height) = match (width, height) {
        (None, None) => return Err(ResolveError::NoTargetSize),
        (Some(0), None) | (None, Some(0)) | (Some(0), Some(0)) => {
            return Ok(ResolvedTarget::RemoveVideoTrack)
        }
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (w, keep_aspect(w, source_height, source_width)),
        (None, Some(h)) => (keep_aspect(h, source_width, source_height), h),
    };

    let (width, height) = if even_codecs
        .iter()
        .any(|codec| codec.eq_ignore_ascii_case(&video.codec_name))
    {
        (even_floor(width), even_floor(height))
    } else {
        (width, height)
    };

    if width == 0 || height == 0 {
        return Ok(ResolvedTarget::Skip(SkipReason::ZeroDimension));
    }

    let rejected = match direction {
        Direction::Down if width >= source_width || height >= source_height => {
            Some(SkipReason::NotDownscale)
        }
        Direction::Up if width <= source_width || height <= source_height => {
            Some(SkipReason::NotUpscale)
        }
        _ => None,
    };

    Ok(match rejected {
        Some(reason) => ResolvedTarget::Skip(reason),
        None => ResolvedTarget::Dimensions { width, height },
    })
}

/// `round(known * source_other / source_same)`
fn keep_aspect(known: u32, source_other: u32, source_same: u32) -> u32 {
    round_nearest(known as f64 * source_other as f64 / source_same as f64)
}
