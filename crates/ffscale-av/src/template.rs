//! Output file name templates.

use crate::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default output template: next to the source, with a `_ffscale` suffix.
pub const DEFAULT_OUTPUT_TEMPLATE: &str = "{dir}{name}_ffscale{ext}";

/// Variable substitution context for output file name templates.
///
/// Templates use Python `str.format` field syntax: `{field}` is replaced by
/// the variable's value, `{{` and `}}` produce literal braces. Referencing
/// an unknown field is an error rather than being left in place.
///
/// # Example
///
/// ```
/// use ffscale_av::TemplateContext;
/// use std::path::Path;
///
/// let ctx = TemplateContext::for_source(Path::new("/videos/holiday.mp4"));
///
/// assert_eq!(ctx.render("{dir}{name}_small{ext}")?, "/videos/holiday_small.mp4");
/// assert_eq!(ctx.render("{{{name}}}.mkv")?, "{holiday}.mkv");
/// # Ok::<(), ffscale_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TemplateContext {
    vars: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty template context.
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    /// Create a context describing a source file.
    ///
    /// This adds the following variables:
    /// - `{dir}` - Parent directory, always ending in `/` (`./` for bare names)
    /// - `{name}` - File name without extension
    /// - `{ext}` - Extension including the leading dot, empty if there is none
    pub fn for_source(source: &Path) -> Self {
        let dir = match source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
            _ => ".".to_string(),
        };
        let dir = if dir.ends_with('/') {
            dir
        } else {
            format!("{}/", dir)
        };

        let name = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        let ext = source
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        Self::new()
            .with_var("dir", &dir)
            .with_var("name", &name)
            .with_var("ext", &ext)
    }

    /// Add a custom variable.
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Get a variable value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|s| s.as_str())
    }

    /// Render a template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] for unknown fields and unbalanced braces.
    pub fn render(&self, template: &str) -> Result<String> {
        let mut result = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    result.push('{');
                }
                '{' => {
                    let mut field = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => {
                                return Err(Error::template(template, "unmatched '{'"));
                            }
                            Some(ch) => field.push(ch),
                        }
                    }
                    let value = self.get(&field).ok_or_else(|| {
                        Error::template(template, format!("unknown field '{}'", field))
                    })?;
                    result.push_str(value);
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    result.push('}');
                }
                '}' => return Err(Error::template(template, "single '}' encountered")),
                _ => result.push(c),
            }
        }

        Ok(result)
    }

    /// Render a template into a path.
    pub fn render_path(&self, template: &str) -> Result<PathBuf> {
        self.render(template).map(PathBuf::from)
    }
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let ctx = TemplateContext::for_source(Path::new("videos/clip.mp4"));
        assert_eq!(
            ctx.render(DEFAULT_OUTPUT_TEMPLATE).unwrap(),
            "videos/clip_ffscale.mp4"
        );
    }

    #[test]
    fn test_bare_file_name_gets_current_dir() {
        let ctx = TemplateContext::for_source(Path::new("clip.mp4"));
        assert_eq!(ctx.get("dir"), Some("./"));
        assert_eq!(ctx.get("name"), Some("clip"));
        assert_eq!(ctx.get("ext"), Some(".mp4"));
    }

    #[test]
    fn test_root_dir_keeps_single_slash() {
        let ctx = TemplateContext::for_source(Path::new("/clip.mkv"));
        assert_eq!(ctx.render("{dir}{name}{ext}").unwrap(), "/clip.mkv");
    }

    #[test]
    fn test_no_extension() {
        let ctx = TemplateContext::for_source(Path::new("/videos/raw"));
        assert_eq!(ctx.get("ext"), Some(""));
        assert_eq!(ctx.render("{dir}{name}_x{ext}").unwrap(), "/videos/raw_x");
    }

    #[test]
    fn test_only_last_extension_is_split() {
        let ctx = TemplateContext::for_source(Path::new("/videos/show.s01e01.mkv"));
        assert_eq!(ctx.get("name"), Some("show.s01e01"));
        assert_eq!(ctx.get("ext"), Some(".mkv"));
    }

    #[test]
    fn test_escaped_braces() {
        let ctx = TemplateContext::new().with_var("name", "clip");
        assert_eq!(ctx.render("{{{name}}}").unwrap(), "{clip}");
        assert_eq!(ctx.render("}}{{").unwrap(), "}{");
    }

    #[test]
    fn test_unknown_field() {
        let ctx = TemplateContext::for_source(Path::new("/videos/clip.mp4"));
        let err = ctx.render("{dir}{stem}{ext}").unwrap_err();
        assert!(err.to_string().contains("unknown field 'stem'"));
    }

    #[test]
    fn test_unbalanced_braces() {
        let ctx = TemplateContext::for_source(Path::new("/videos/clip.mp4"));
        assert!(ctx.render("{dir").is_err());
        assert!(ctx.render("{dir{name}}").is_err());
        assert!(ctx.render("name}").is_err());
    }

    #[test]
    fn test_render_path() {
        let ctx = TemplateContext::for_source(Path::new("/videos/clip.mp4"));
        assert_eq!(
            ctx.render_path("{dir}small/{name}{ext}").unwrap(),
            PathBuf::from("/videos/small/clip.mp4")
        );
    }
}
