mod types;

pub use types::*;

use anyhow::{Context, Result};
use ffscale_av::TemplateContext;
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    normalize_config(&mut config);

    validate_config(&config)
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    tracing::debug!("Loaded config from {:?}", path);

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./ffscale.toml", "~/.config/ffscale/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

fn normalize_config(config: &mut Config) {
    for codec in config.scale.even_dimension_codecs.iter_mut() {
        *codec = codec.trim().to_lowercase();
    }

    for ext in config.scale.skip_extensions.iter_mut() {
        *ext = ext.trim().trim_start_matches('.').to_lowercase();
    }

    config.tools.ffmpeg_path = config.tools.ffmpeg_path.take().map(expand_tilde);
    config.tools.ffprobe_path = config.tools.ffprobe_path.take().map(expand_tilde);
}

fn expand_tilde(path: PathBuf) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).as_ref()),
        None => path,
    }
}

/// Check that an output template only uses known fields.
pub fn validate_output_template(template: &str) -> Result<()> {
    TemplateContext::for_source(Path::new("video.mp4")).render(template)?;
    Ok(())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    validate_output_template(&config.output)?;

    for (name, path) in [
        ("ffmpeg", &config.tools.ffmpeg_path),
        ("ffprobe", &config.tools.ffprobe_path),
    ] {
        if let Some(path) = path {
            if !path.exists() {
                tracing::warn!("Configured {} path does not exist: {:?}", name, path);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::Direction;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ffscale.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let (_dir, path) = write_config("");
        let config = load_config(&path).unwrap();

        assert_eq!(config.output, "{dir}{name}_ffscale{ext}");
        assert_eq!(config.direction, Direction::Down);
        assert!(!config.overwrite);
        assert_eq!(config.scale.even_dimension_codecs, vec!["h264"]);
        assert_eq!(config.scale.skip_extensions, vec!["gif"]);
        assert!(config.tools.ffmpeg_path.is_none());
    }

    #[test]
    fn test_full_config() {
        let (_dir, path) = write_config(
            r#"
output = "{dir}small/{name}{ext}"
direction = "both"
overwrite = true

[tools]
ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"

[scale]
even_dimension_codecs = ["H264", " hevc "]
skip_extensions = [".GIF", "webp"]
"#,
        );
        let config = load_config(&path).unwrap();

        assert_eq!(config.output, "{dir}small/{name}{ext}");
        assert_eq!(config.direction, Direction::Both);
        assert!(config.overwrite);
        assert_eq!(
            config.tools.ffmpeg_path,
            Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"))
        );
        assert_eq!(config.scale.even_dimension_codecs, vec!["h264", "hevc"]);
        assert_eq!(config.scale.skip_extensions, vec!["gif", "webp"]);
    }

    #[test]
    fn test_invalid_direction_is_rejected() {
        let (_dir, path) = write_config(r#"direction = "sideways""#);
        let err = load_config(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_template_is_rejected() {
        let (_dir, path) = write_config(r#"output = "{dir}{stem}{ext}""#);
        let err = load_config(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown field 'stem'"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_config(Path::new("/nonexistent/ffscale.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_custom_path_wins() {
        let (_dir, path) = write_config(r#"direction = "up""#);
        let config = load_config_or_default(Some(&path)).unwrap();
        assert_eq!(config.direction, Direction::Up);
    }

    #[test]
    fn test_validate_output_template() {
        assert!(validate_output_template("{dir}{name}_ffscale{ext}").is_ok());
        assert!(validate_output_template("/out/{name}.mkv").is_ok());
        assert!(validate_output_template("{name").is_err());
    }

    #[test]
    fn test_template_error_keeps_source() {
        let err = validate_output_template("{dir}{stem}").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ffscale_av::Error>(),
            Some(ffscale_av::Error::Template { .. })
        ));
    }
}
