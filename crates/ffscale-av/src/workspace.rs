//! Staging area for output files.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Staging workspace for a single output file.
///
/// The output is written into a hidden temporary directory created next to
/// its destination, so the final move is a same-filesystem rename. A failed
/// or interrupted transcode therefore never leaves a partial file at the
/// destination.
///
/// # Example
///
/// ```no_run
/// use ffscale_av::Workspace;
///
/// let workspace = Workspace::new("/videos/clip_ffscale.mp4")?;
/// // Write to workspace.staging(), then:
/// workspace.finalize()?;
/// # Ok::<(), ffscale_av::Error>(())
/// ```
pub struct Workspace {
    temp_dir: TempDir,
    staging_path: PathBuf,
    destination: PathBuf,
}

impl Workspace {
    /// Create a workspace for the given destination path.
    ///
    /// The destination's parent directory is created if it does not exist.
    pub fn new<P: AsRef<Path>>(destination: P) -> Result<Self> {
        let destination = destination.as_ref();

        let file_name = destination.file_name().ok_or_else(|| {
            Error::InvalidInput(format!("Invalid output file path: {:?}", destination))
        })?;

        let parent = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let temp_dir = tempfile::Builder::new()
            .prefix(".ffscale-")
            .tempdir_in(parent)
            .map_err(|e| Error::Workspace(e.to_string()))?;

        // Same file name as the destination so ffmpeg picks the same muxer.
        let staging_path = temp_dir.path().join(file_name);

        Ok(Self {
            temp_dir,
            staging_path,
            destination: destination.to_path_buf(),
        })
    }

    /// Path the transcoder should write to.
    pub fn staging(&self) -> &Path {
        &self.staging_path
    }

    /// Move the staged output to its destination.
    ///
    /// An existing regular file at the destination is moved aside first and
    /// restored if the final rename fails. Anything else at the destination
    /// (a directory, a socket, ...) is left untouched and reported as an
    /// error.
    pub fn finalize(self) -> Result<PathBuf> {
        if !self.staging_path.is_file() {
            return Err(Error::Workspace(format!(
                "Output file does not exist: {:?}",
                self.staging_path
            )));
        }

        let dest = &self.destination;

        match std::fs::metadata(dest) {
            Ok(meta) if !meta.is_file() => {
                return Err(Error::Workspace(format!(
                    "Destination exists and is not a regular file: {:?}",
                    dest
                )));
            }
            Ok(_) => {
                let backup = self.temp_dir.path().join(".previous");
                std::fs::rename(dest, &backup).map_err(|e| {
                    Error::Workspace(format!("Failed to move existing output aside: {}", e))
                })?;

                if let Err(e) = std::fs::rename(&self.staging_path, dest) {
                    let _ = std::fs::rename(&backup, dest);
                    return Err(Error::Workspace(format!(
                        "Failed to move output to destination: {}",
                        e
                    )));
                }
            }
            Err(_) => {
                std::fs::rename(&self.staging_path, dest).map_err(|e| {
                    Error::Workspace(format!("Failed to move output to destination: {}", e))
                })?;
            }
        }

        Ok(dest.clone())
    }

    /// Clean up without finalizing (discard output).
    pub fn cleanup(self) {
        drop(self.temp_dir);
    }
}
