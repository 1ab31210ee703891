use std::io::ErrorKind;
use std::path::PathBuf;
use async_trait::async_trait;
use bytes::Bytes;

use crate::storage::{StorageBackend, StoredObject};
use crate::utils::{generate_storage_name, is_plain_name};

/// The folder within the storage root holding all uploaded images.
const IMAGES_FOLDER: &str = "images";

pub struct FileSystemBackend {
    directory: PathBuf,
}

impl FileSystemBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            directory: root.join(IMAGES_FOLDER),
        }
    }

    pub async fn ensure_directory(&self) -> anyhow::Result<()> {
        info!("Using storage directory {:?}", &self.directory);
        tokio::fs::create_dir_all(&self.directory).await?;
        Ok(())
    }

    #[inline]
    fn format_path(&self, name: &str) -> Option<PathBuf> {
        if is_plain_name(name) {
            Some(self.directory.join(name))
        } else {
            None
        }
    }
}

#[async_trait]
impl StorageBackend for FileSystemBackend {
    async fn store(
        &self,
        original_name: Option<&str>,
        data: Bytes,
    ) -> anyhow::Result<String> {
        let name = generate_storage_name(original_name);
        let path = self.directory.join(&name);

        debug!("Storing image @ {:?}", &path);
        match tokio::fs::write(&path, &data).await {
            Ok(()) => Ok(name),
            Err(ref e) if e.kind() == ErrorKind::NotFound => {
                tokio::fs::create_dir_all(&self.directory).await?;
                tokio::fs::write(&path, data).await?;
                Ok(name)
            },
            Err(other) => Err(other.into())
        }
    }

    async fn open(&self, name: &str) -> anyhow::Result<Option<StoredObject>> {
        let path = match self.format_path(name) {
            Some(path) => path,
            None => return Ok(None),
        };

        debug!("Retrieving image @ {:?}", &path);
        let file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(ref e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(other) => return Err(other.into()),
        };

        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Ok(None);
        }

        Ok(Some(StoredObject {
            size: metadata.len(),
            reader: Box::new(file),
        }))
    }

    async fn delete(&self, name: &str) -> anyhow::Result<()> {
        let path = match self.format_path(name) {
            Some(path) => path,
            None => return Ok(()),
        };

        debug!("Purging image @ {:?}", &path);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(ref e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(other) => Err(other.into()),
        }
    }
}
