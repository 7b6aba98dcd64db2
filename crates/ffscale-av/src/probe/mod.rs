//! Media file probing module.
//!
//! Metadata is read by running the `ffprobe` command-line tool and parsing
//! its JSON output. Files that ffprobe rejects as "invalid data" surface as
//! [`Error::InvalidData`](crate::Error::InvalidData) so callers can skip them
//! instead of aborting.

mod ffprobe;
mod types;

pub use ffprobe::{is_invalid_data_message, probe_with_ffprobe};
pub use types::*;
