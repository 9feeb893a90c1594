mod dataset_loader;
mod errors;

use std::path::Path;

pub use dataset_loader::DatasetLoader;
pub use errors::LoadError;

/// File formats the loader understands.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DatasetFormat {
    Json,
    Csv
}

impl DatasetFormat {
    /// `.csv` files are read as CSV, everything else as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("csv") => DatasetFormat::Csv,
            _ => DatasetFormat::Json
        }
    }
}
