use std::sync::Arc;

use crate::image::{Image, ImageInfo, NewImage};
use crate::repository::ImageRepository;

/// Access to the image records.
#[derive(Clone)]
pub struct ImageController {
    repository: Arc<dyn ImageRepository>,
}

impl ImageController {
    pub fn new(repository: Arc<dyn ImageRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> anyhow::Result<Vec<ImageInfo>> {
        let images = self.repository.find_all().await?;
        Ok(images.into_iter().map(ImageInfo::from).collect())
    }

    #[inline]
    pub async fn save_image(&self, image: NewImage) -> anyhow::Result<Image> {
        self.repository.save(image).await
    }

    #[inline]
    pub async fn find_image_by_id(&self, id: i64) -> anyhow::Result<Option<Image>> {
        self.repository.find_by_id(id).await
    }

    #[inline]
    pub async fn delete_image(&self, image: &Image) -> anyhow::Result<()> {
        self.repository.delete(image).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::backends::sql::{DatabaseConfig, SqliteBackend};
    use super::*;

    #[tokio::test]
    async fn test_get_all_projects_records() -> anyhow::Result<()> {
        let backend = SqliteBackend::connect(DatabaseConfig::new("sqlite::memory:", 1)).await?;
        let controller = ImageController::new(Arc::new(backend));

        let saved = controller.save_image(NewImage::new("abc123.png", 1024)).await?;
        let all = controller.get_all().await?;

        assert_eq!(all, vec![ImageInfo {
            id: saved.id,
            name: "abc123.png".to_string(),
            size: 1024,
        }]);

        assert_eq!(controller.find_image_by_id(saved.id).await?, Some(saved.clone()));

        controller.delete_image(&saved).await?;
        assert!(controller.find_image_by_id(saved.id).await?.is_none());

        Ok(())
    }
}
