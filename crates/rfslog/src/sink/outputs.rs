//! The three output destinations and how they are opened.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Paths of the three log files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Telemetry log.
    pub telemetry: PathBuf,
    /// GPS log.
    pub gps: PathBuf,
    /// State log.
    pub state: PathBuf,
}

impl OutputPaths {
    /// Join three file names onto a directory.
    #[must_use]
    pub fn in_dir(dir: &Path, telemetry: &str, gps: &str, state: &str) -> Self {
        Self {
            telemetry: dir.join(telemetry),
            gps: dir.join(gps),
            state: dir.join(state),
        }
    }
}

/// One writer per record kind.
#[derive(Debug)]
pub struct Outputs<W> {
    /// Telemetry destination.
    pub telemetry: W,
    /// GPS destination.
    pub gps: W,
    /// State destination.
    pub state: W,
}

impl<W: Write> Outputs<W> {
    /// Group three writers.
    pub fn new(telemetry: W, gps: W, state: W) -> Self {
        Self {
            telemetry,
            gps,
            state,
        }
    }

    /// Flush all three writers.
    ///
    /// # Errors
    ///
    /// Returns the first flush failure.
    pub fn flush(&mut self) -> Result<()> {
        self.telemetry.flush()?;
        self.gps.flush()?;
        self.state.flush()?;
        Ok(())
    }

    /// Take the writers back.
    pub fn into_inner(self) -> (W, W, W) {
        (self.telemetry, self.gps, self.state)
    }
}

impl Outputs<BufWriter<File>> {
    /// Create (truncating) the three log files, and their parent directories
    /// if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be created.
    pub fn create(paths: &OutputPaths) -> Result<Self> {
        Ok(Self::new(
            create_file(&paths.telemetry)?,
            create_file(&paths.gps)?,
            create_file(&paths.state)?,
        ))
    }
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating output directory {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let file = File::create(path).map_err(|source| Error::OutputCreate {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Writing {}", path.display());
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_dir() {
        let paths = OutputPaths::in_dir(
            Path::new("out"),
            "AV TELEMETRY.log",
            "AV GPS.log",
            "AV STATUS.log",
        );
        assert_eq!(paths.telemetry, PathBuf::from("out/AV TELEMETRY.log"));
        assert_eq!(paths.gps, PathBuf::from("out/AV GPS.log"));
        assert_eq!(paths.state, PathBuf::from("out/AV STATUS.log"));
    }

    #[test]
    fn test_create_reports_path_on_failure() {
        let paths = OutputPaths {
            telemetry: PathBuf::from("/proc/rfslog-test/t.log"),
            gps: PathBuf::from("/proc/rfslog-test/g.log"),
            state: PathBuf::from("/proc/rfslog-test/s.log"),
        };
        if let Err(err) = Outputs::create(&paths) {
            assert!(err.to_string().contains("/proc/rfslog-test"));
        }
    }

    #[test]
    fn test_flush_and_into_inner() {
        let mut outputs = Outputs::new(Vec::new(), Vec::new(), Vec::new());
        outputs.gps.extend_from_slice(b"x");
        outputs.flush().unwrap();
        let (t, g, s) = outputs.into_inner();
        assert!(t.is_empty());
        assert_eq!(g, b"x");
        assert!(s.is_empty());
    }
}
