//! Sequential batch loop over glob patterns.

use crate::probe::{self, ProbeOutcome};
use crate::scale::{resolve_target, ResolvedTarget, SkipReason};
use crate::settings::Settings;
use anyhow::{Context, Result};
use ffscale_av::actions::{self, ScaleOptions, VideoScale};
use ffscale_av::{get_tool_path, TemplateContext};
use std::fmt;
use std::path::{Path, PathBuf};

/// What happened to one matched file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Scaled { output: PathBuf, target: VideoScale },
    Skipped(Skip),
}

/// Why a file was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    DeniedExtension,
    ExistingOutput(PathBuf),
    OutputIsSource,
    OutputNotAFile(PathBuf),
    NotVideo,
    Size(SkipReason),
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::DeniedExtension => write!(f, "Skipping unsupported file type."),
            Skip::ExistingOutput(path) => write!(f, "Skipping existing file: {}", path.display()),
            Skip::OutputIsSource => write!(f, "Skipping: output path is the source file."),
            Skip::OutputNotAFile(path) => {
                write!(f, "Skipping: output path is not a regular file: {}", path.display())
            }
            Skip::NotVideo => write!(f, "Skipping non-video file."),
            Skip::Size(reason) => write!(f, "{}", reason),
        }
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub scaled: usize,
    pub skipped: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} scaled, {} skipped", self.scaled, self.skipped)
    }
}

/// Processes every file matched by the configured patterns, one at a time.
pub struct BatchProcessor {
    settings: Settings,
}

impl BatchProcessor {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run over all patterns. Stops at the first fatal error.
    pub fn run(&self) -> Result<Summary> {
        let mut summary = Summary::default();

        for pattern in &self.settings.patterns {
            let files = expand_pattern(pattern)?;
            if files.is_empty() {
                tracing::warn!("No files matched {:?}", pattern);
            }

            for file in files {
                match self.process_file(&file)? {
                    FileOutcome::Scaled { output, target } => {
                        tracing::info!("Wrote {} ({})", output.display(), target);
                        summary.scaled += 1;
                    }
                    FileOutcome::Skipped(skip) => {
                        tracing::info!("{}", skip);
                        summary.skipped += 1;
                    }
                }
            }
        }

        Ok(summary)
    }

    /// Probe, size and (maybe) transcode a single file.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        tracing::info!("Processing {}", path.display());

        if self.settings.is_skipped_extension(path) {
            return Ok(FileOutcome::Skipped(Skip::DeniedExtension));
        }

        let output = TemplateContext::for_source(path)
            .render_path(&self.settings.output_template)
            .with_context(|| format!("Failed to render output path for {:?}", path))?;

        if is_same_file(path, &output) {
            return Ok(FileOutcome::Skipped(Skip::OutputIsSource));
        }

        // Only regular files are ever replaced, even with --overwrite.
        if output.exists() && !output.is_file() {
            return Ok(FileOutcome::Skipped(Skip::OutputNotAFile(output)));
        }

        if !self.settings.overwrite && is_non_empty_file(&output) {
            return Ok(FileOutcome::Skipped(Skip::ExistingOutput(output)));
        }

        let ffprobe = get_tool_path("ffprobe", self.settings.ffprobe_path.as_deref())?;
        let video = match probe::probe_video(path, &ffprobe)? {
            ProbeOutcome::Video(video) => video,
            ProbeOutcome::NotVideo => return Ok(FileOutcome::Skipped(Skip::NotVideo)),
        };

        tracing::debug!(
            "Source {}x{} ({})",
            video.width,
            video.height,
            video.codec_name
        );

        let resolved = resolve_target(
            &video,
            &self.settings.constraints,
            self.settings.direction,
            &self.settings.even_dimension_codecs,
        )?;

        let target = match resolved {
            ResolvedTarget::Dimensions { width, height } => VideoScale::Dimensions { width, height },
            ResolvedTarget::RemoveVideoTrack => VideoScale::DropVideo,
            ResolvedTarget::Skip(reason) => return Ok(FileOutcome::Skipped(Skip::Size(reason))),
        };

        let options = ScaleOptions {
            ffmpeg: get_tool_path("ffmpeg", self.settings.ffmpeg_path.as_deref())?,
            inherit_output: self.settings.verbose,
        };

        let output = actions::scale(path, &output, target, &options)
            .with_context(|| format!("Failed to scale {:?}", path))?;

        Ok(FileOutcome::Scaled { output, target })
    }
}

/// Expand a glob pattern into the regular files it matches.
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries =
        glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {:?}", pattern))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => tracing::warn!("Cannot read {}: {}", e.path().display(), e.error()),
        }
    }

    Ok(files)
}

fn is_non_empty_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
