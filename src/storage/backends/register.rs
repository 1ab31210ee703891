use std::path::PathBuf;
use std::sync::Arc;
use serde::Deserialize;

use crate::storage::StorageBackend;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendConfigs {
    FileSystem {
        /// The storage root, files are kept in its `images` folder.
        directory: PathBuf,
    }
}

impl BackendConfigs {
    pub async fn connect(&self) -> anyhow::Result<Arc<dyn StorageBackend>> {
        match self {
            Self::FileSystem { directory } => {
                let backend = super::filesystem::FileSystemBackend::new(directory.clone());
                backend.ensure_directory().await?;
                Ok(Arc::new(backend))
            }
        }
    }
}
