use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Dataset [{}] could not be read: {source}", path.display())]
    Io {
        path: PathBuf,
        source: io::Error
    },
    #[error("Dataset [{}] is not a valid JSON transaction list: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error
    },
    #[error("Dataset [{}] is not a valid CSV transaction list: {source}", path.display())]
    Csv {
        path: PathBuf,
        source: csv::Error
    },
    #[error("Dataset [{}] loading was interrupted", path.display())]
    Interrupted {
        path: PathBuf
    }
}

impl LoadError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    pub fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json { path: path.to_path_buf(), source }
    }

    pub fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv { path: path.to_path_buf(), source }
    }

    pub fn interrupted(path: &Path) -> Self {
        Self::Interrupted { path: path.to_path_buf() }
    }
}
