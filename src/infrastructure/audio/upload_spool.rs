use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum UploadSpoolError {
    #[error("failed to stage upload: {0}")]
    StagingFailed(#[from] std::io::Error),
}

/// Stages uploaded audio bytes into a temp file so the transcription
/// pipeline works against a real path. The file is removed when the
/// `StagedUpload` drops.
#[derive(Debug, Clone, Default)]
pub struct UploadSpool {
    spool_dir: Option<PathBuf>,
}

impl UploadSpool {
    pub fn new() -> Self {
        Self { spool_dir: None }
    }

    /// Stage into a specific directory instead of the system temp dir.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            spool_dir: Some(dir.into()),
        }
    }

    pub fn stage(&self, data: &[u8]) -> Result<StagedUpload, UploadSpoolError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("upload-").suffix(".wav");

        let mut file = match &self.spool_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        file.write_all(data)?;
        file.flush()?;

        tracing::debug!(
            bytes = data.len(),
            path = %file.path().display(),
            "Upload staged to spool file"
        );

        Ok(StagedUpload { file })
    }
}

pub struct StagedUpload {
    file: NamedTempFile,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
