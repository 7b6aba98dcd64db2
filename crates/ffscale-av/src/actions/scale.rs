//! Video rescaling with ffmpeg.

use crate::{Error, Result, Workspace};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// What ffmpeg should do with the video track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoScale {
    /// Scale the video to exactly these dimensions.
    Dimensions { width: u32, height: u32 },
    /// Drop the video track and keep audio only.
    DropVideo,
}

impl std::fmt::Display for VideoScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoScale::Dimensions { width, height } => write!(f, "{}x{}", width, height),
            VideoScale::DropVideo => write!(f, "no video"),
        }
    }
}

/// How ffmpeg is invoked.
#[derive(Debug, Clone)]
pub struct ScaleOptions {
    /// Path to the ffmpeg executable.
    pub ffmpeg: PathBuf,
    /// Let ffmpeg write straight to this process's stdout/stderr.
    ///
    /// When false, output is captured and stderr is attached to the error
    /// if ffmpeg fails.
    pub inherit_output: bool,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            inherit_output: false,
        }
    }
}

/// Build the ffmpeg argument list for one rescale.
///
/// Audio is always stream-copied. The output path is expected not to
/// exist yet, so `-y` never clobbers anything the caller did not decide to
/// replace.
pub fn ffmpeg_args(input: &Path, output: &Path, target: VideoScale) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-hide_banner".into(), "-i".into(), input.into()];

    match target {
        VideoScale::Dimensions { width, height } => {
            args.push("-vf".into());
            args.push(format!("scale={}:{}", width, height).into());
        }
        VideoScale::DropVideo => args.push("-vn".into()),
    }

    for arg in ["-c:a", "copy", "-y"] {
        args.push(OsString::from(arg));
    }
    args.push(output.into());
    args
}

/// Rescale `input` into `destination`.
///
/// ffmpeg writes into a [`Workspace`] next to the destination; the result
/// is moved into place only when ffmpeg succeeds.
pub fn scale(
    input: &Path,
    destination: &Path,
    target: VideoScale,
    options: &ScaleOptions,
) -> Result<PathBuf> {
    let workspace = Workspace::new(destination)?;

    #[cfg(feature = "tracing")]
    tracing::info!("Scaling {:?} to {} -> {:?}", input, target, destination);

    match run_ffmpeg(input, workspace.staging(), target, options) {
        Ok(()) => workspace.finalize(),
        Err(e) => {
            workspace.cleanup();
            Err(e)
        }
    }
}

fn run_ffmpeg(input: &Path, output: &Path, target: VideoScale, options: &ScaleOptions) -> Result<()> {
    let args = ffmpeg_args(input, output, target);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Running: {} {}",
        options.ffmpeg.display(),
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let mut cmd = Command::new(&options.ffmpeg);
    cmd.args(&args).stdin(Stdio::null());

    let map_spawn_error = |e: std::io::Error| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::tool_not_found("ffmpeg")
        } else {
            Error::Io(e)
        }
    };

    if options.inherit_output {
        let status = cmd
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(map_spawn_error)?;

        if !status.success() {
            return Err(Error::tool_failed(
                "ffmpeg",
                format!("{} ({:?})", status, input),
            ));
        }
    } else {
        let result = cmd.output().map_err(map_spawn_error)?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::tool_failed(
                "ffmpeg",
                format!("{} ({:?}): {}", result.status, input, stderr.trim()),
            ));
        }
    }

    Ok(())
}
