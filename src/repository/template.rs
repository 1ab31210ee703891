use async_trait::async_trait;

use crate::image::{Image, NewImage};

#[async_trait]
pub trait ImageRepository: Sync + Send + 'static {
    /// Inserts a new record, returning it with its assigned id.
    async fn save(&self, image: NewImage) -> anyhow::Result<Image>;

    /// All records in insertion order.
    async fn find_all(&self) -> anyhow::Result<Vec<Image>>;

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Image>>;

    async fn delete(&self, image: &Image) -> anyhow::Result<()>;
}
