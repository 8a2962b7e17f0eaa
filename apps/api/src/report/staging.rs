//! Short-lived on-disk staging of generated reports.
//!
//! Each report gets its own file under the staging directory. The file is
//! removed when the [`StagedReport`] is closed or dropped, so nothing
//! accumulates whether or not delivery succeeds.

use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("failed to stage report in {dir}: {source}")]
    Create {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write staged report: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to read staged report: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to remove staged report: {0}")]
    Remove(#[source] std::io::Error),
}

/// Name offered to the user when downloading, e.g.
/// `Business_Report_20261016_093015.pdf`.
pub fn download_file_name(generated_at: NaiveDateTime) -> String {
    format!("Business_Report_{}.pdf", generated_at.format("%Y%m%d_%H%M%S"))
}

/// A generated report written to a unique path in the staging directory.
pub struct StagedReport {
    file: NamedTempFile,
    download_name: String,
}

impl StagedReport {
    /// Writes `bytes` to a fresh file. Concurrent calls with the same
    /// timestamp still get distinct paths.
    pub fn stage(dir: &Path, bytes: &[u8], generated_at: NaiveDateTime) -> Result<Self, StagingError> {
        let download_name = download_file_name(generated_at);
        let prefix = format!("{}_", download_name.trim_end_matches(".pdf"));

        let mut file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".pdf")
            .tempfile_in(dir)
            .map_err(|source| StagingError::Create {
                dir: dir.display().to_string(),
                source,
            })?;
        file.write_all(bytes).map_err(StagingError::Write)?;
        file.flush().map_err(StagingError::Write)?;

        Ok(Self {
            file,
            download_name,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn download_name(&self) -> &str {
        &self.download_name
    }

    /// Reads the staged artifact back for delivery.
    pub fn read(&self) -> Result<Vec<u8>, StagingError> {
        std::fs::read(self.file.path()).map_err(StagingError::Read)
    }

    /// Removes the staged file, reporting any failure. Dropping the value
    /// also removes it, silently.
    pub fn remove(self) -> Result<(), StagingError> {
        self.file.close().map_err(StagingError::Remove)
    }
}
