use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncRead;

/// A stored file opened for reading.
pub struct StoredObject {
    /// The total length of the file in bytes.
    pub size: u64,

    /// The raw file contents.
    pub reader: Box<dyn AsyncRead + Send + Unpin + 'static>,
}

#[async_trait]
pub trait StorageBackend: Sync + Send + 'static {
    /// Writes the given data under a newly generated storage name
    /// and returns that name.
    ///
    /// The original name is only used as a hint for the file extension.
    async fn store(
        &self,
        original_name: Option<&str>,
        data: Bytes,
    ) -> anyhow::Result<String>;

    /// Opens a stored file for streaming.
    ///
    /// Returns `None` if no file exists with the given name.
    async fn open(&self, name: &str) -> anyhow::Result<Option<StoredObject>>;

    /// Removes a stored file.
    ///
    /// Removing a file that does not exist is not an error.
    async fn delete(&self, name: &str) -> anyhow::Result<()>;
}
