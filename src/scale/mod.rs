//! Target size resolution.
//!
//! Turns the user's size constraints and a probed source size into the
//! dimensions handed to ffmpeg. Everything here is pure; probing and
//! transcoding live in `ffscale-av`.

mod length;
mod resolver;

pub use length::{round_nearest, Length, ParseLengthError};
pub use resolver::{
    even_floor, resolve_target, Direction, ResolveError, ResolvedTarget, SizeConstraints,
    SkipReason, VideoInfo,
};
