//! Effective settings for one run: CLI flags layered over the config file.

use crate::config::{self, Config};
use crate::scale::{Direction, SizeConstraints};
use anyhow::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Settings {
    /// Glob patterns, processed in order.
    pub patterns: Vec<String>,
    pub constraints: SizeConstraints,
    pub direction: Direction,
    pub output_template: String,
    pub overwrite: bool,
    /// Echo probe output and let ffmpeg write to the terminal.
    pub verbose: bool,
    pub ffmpeg_path: Option<PathBuf>,
    pub ffprobe_path: Option<PathBuf>,
    pub even_dimension_codecs: Vec<String>,
    pub skip_extensions: Vec<String>,
}

impl Settings {
    /// Settings carrying the config file's defaults, with no patterns and
    /// no size constraints yet.
    pub fn from_config(config: &Config) -> Self {
        Self {
            patterns: Vec::new(),
            constraints: SizeConstraints::default(),
            direction: config.direction,
            output_template: config.output.clone(),
            overwrite: config.overwrite,
            verbose: false,
            ffmpeg_path: config.tools.ffmpeg_path.clone(),
            ffprobe_path: config.tools.ffprobe_path.clone(),
            even_dimension_codecs: config.scale.even_dimension_codecs.clone(),
            skip_extensions: config.scale.skip_extensions.clone(),
        }
    }

    /// Reject runs that could not process any file correctly.
    pub fn validate(&self) -> Result<()> {
        if self.constraints.is_empty() {
            anyhow::bail!(
                "No target size specified. Use --width, --height, --short-side or --long-side."
            );
        }

        if self.patterns.is_empty() {
            anyhow::bail!("No input files specified");
        }

        config::validate_output_template(&self.output_template)
    }

    /// Whether files with this extension are never processed.
    pub fn is_skipped_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.skip_extensions
                    .iter()
                    .any(|skip| skip.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}
