use crate::scale::Direction;
use ffscale_av::template::DEFAULT_OUTPUT_TEMPLATE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Output file name template (fields: dir, name, ext)
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub direction: Direction,

    /// Replace existing non-empty output files
    #[serde(default)]
    pub overwrite: bool,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub scale: ScaleConfig,
}

fn default_output() -> String {
    DEFAULT_OUTPUT_TEMPLATE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: default_output(),
            direction: Direction::default(),
            overwrite: false,
            tools: ToolsConfig::default(),
            scale: ScaleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScaleConfig {
    /// Source codecs whose output must have even width and height
    #[serde(default = "default_even_dimension_codecs")]
    pub even_dimension_codecs: Vec<String>,

    /// File extensions that are never processed (without the dot)
    #[serde(default = "default_skip_extensions")]
    pub skip_extensions: Vec<String>,
}

fn default_even_dimension_codecs() -> Vec<String> {
    vec!["h264".to_string()]
}

fn default_skip_extensions() -> Vec<String> {
    vec!["gif".to_string()]
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            even_dimension_codecs: default_even_dimension_codecs(),
            skip_extensions: default_skip_extensions(),
        }
    }
}
