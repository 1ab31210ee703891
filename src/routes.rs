use std::fmt::Display;
use std::sync::Arc;
use bytes::Bytes;
use poem::http::StatusCode;
use poem::{Body, Result};
use poem_openapi::{ApiResponse, Multipart, OpenApi};
use poem_openapi::param::Path;
use poem_openapi::payload::{Binary, Json};
use poem_openapi::types::multipart::Upload;

use crate::controller::ImageController;
use crate::image::{ImageInfo, NewImage, UploadInfo};
use crate::storage::StorageBackend;

#[derive(Debug, Multipart)]
pub struct UploadPayload {
    /// The image file to store.
    file: Upload,
}

#[derive(Debug, Multipart)]
pub struct UploadParamsPayload {
    name: String,
    email: String,
    file: Upload,
}

#[derive(ApiResponse)]
pub enum DownloadResponse {
    /// The raw file contents.
    #[oai(status = 200)]
    Ok(
        Binary<Body>,
        #[oai(header = "Content-Disposition")] String,
        #[oai(header = "Content-Length")] u64,
    ),

    /// No file exists with the given name.
    #[oai(status = 404)]
    NotFound,
}

#[derive(ApiResponse)]
pub enum DeleteResponse {
    /// The image has been removed, the removed record is returned.
    #[oai(status = 200)]
    Ok(Json<ImageInfo>),

    /// No image exists with the given id.
    #[oai(status = 404)]
    NotFound,
}

/// Logs the error and converts it into a 500 response.
fn internal_error<E: Display>(context: &'static str) -> impl FnOnce(E) -> poem::Error {
    move |e| {
        error!("Failed to {}: {}", context, e);
        poem::Error::from_status(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Reads the whole upload, rejecting it with a 413 once it exceeds the limit.
async fn read_upload(file: Upload, limit: Option<usize>) -> Result<Vec<u8>> {
    let data = file
        .into_vec()
        .await
        .map_err(internal_error("read upload"))?;

    match limit {
        Some(limit) if data.len() > limit => {
            warn!("Rejecting upload of {} bytes, limit is {} bytes", data.len(), limit);
            Err(poem::Error::from_status(StatusCode::PAYLOAD_TOO_LARGE))
        },
        _ => Ok(data),
    }
}

pub struct ImagesApi {
    storage: Arc<dyn StorageBackend>,
    images: ImageController,
    max_upload_size: Option<usize>,
}

impl ImagesApi {
    pub fn new(storage: Arc<dyn StorageBackend>, images: ImageController) -> Self {
        Self {
            storage,
            images,
            max_upload_size: None,
        }
    }

    /// Sets the maximum accepted file size in bytes.
    pub fn with_upload_limit(mut self, max_upload_size: Option<usize>) -> Self {
        self.max_upload_size = max_upload_size;
        self
    }
}

#[OpenApi]
impl ImagesApi {
    /// List Images
    ///
    /// All stored images in the order they were uploaded.
    #[oai(path = "/images", method = "get")]
    pub async fn list_images(&self) -> Result<Json<Vec<ImageInfo>>> {
        let images = self.images
            .get_all()
            .await
            .map_err(internal_error("list images"))?;

        Ok(Json(images))
    }

    /// Upload Image
    ///
    /// Stores the file under a newly generated name and records it.
    #[oai(path = "/images/upload", method = "post")]
    pub async fn upload_image(&self, payload: UploadPayload) -> Result<Json<UploadInfo>> {
        let original_name = payload.file.file_name().map(ToString::to_string);
        let data = read_upload(payload.file, self.max_upload_size).await?;
        let size = data.len();

        let name = self.storage
            .store(original_name.as_deref(), Bytes::from(data))
            .await
            .map_err(internal_error("store image"))?;

        // The file stays on disk if this fails.
        self.images
            .save_image(NewImage::new(name.clone(), size))
            .await
            .map_err(internal_error("save image record"))?;

        info!("Uploaded image {} ({} bytes)", &name, size);
        Ok(Json(UploadInfo::success(name)))
    }

    /// Download Image
    ///
    /// Streams the stored file as an attachment.
    #[oai(path = "/images/download/:image_name", method = "get")]
    pub async fn download_image(&self, image_name: Path<String>) -> Result<DownloadResponse> {
        let image_name = image_name.0;
        let obj = self.storage
            .open(&image_name)
            .await
            .map_err(internal_error("open image"))?;

        let obj = match obj {
            Some(obj) => obj,
            None => return Ok(DownloadResponse::NotFound),
        };

        let disposition = format!("attachment; filename={}", image_name);
        Ok(DownloadResponse::Ok(
            Binary(Body::from_async_read(obj.reader)),
            disposition,
            obj.size,
        ))
    }

    /// Delete Image
    ///
    /// Removes the file and its record.
    #[oai(path = "/images/delete/:id", method = "delete")]
    pub async fn delete_image(&self, id: Path<i64>) -> Result<DeleteResponse> {
        let image = self.images
            .find_image_by_id(id.0)
            .await
            .map_err(internal_error("find image"))?;

        let image = match image {
            Some(image) => image,
            None => return Ok(DeleteResponse::NotFound),
        };

        self.storage
            .delete(&image.name)
            .await
            .map_err(internal_error("delete image file"))?;

        self.images
            .delete_image(&image)
            .await
            .map_err(internal_error("delete image record"))?;

        info!("Deleted image {} ({})", image.id, &image.name);
        Ok(DeleteResponse::Ok(Json(image.into())))
    }

    /// Upload With Params
    ///
    /// Accepts a file alongside a name and email without storing anything.
    #[oai(path = "/images/upload/api/param", method = "post")]
    pub async fn upload_with_params(&self, payload: UploadParamsPayload) -> Result<Json<UploadInfo>> {
        let UploadParamsPayload { name, email, file } = payload;
        debug!(form_name = %name, form_email = %email, "Upload form fields");

        let file_name = file.file_name().map(ToString::to_string);
        let content_type = file.content_type().map(ToString::to_string);
        let data = read_upload(file, self.max_upload_size).await?;

        info!(
            field = "file",
            file_name = ?file_name,
            content_type = ?content_type,
            size = data.len(),
            "Received upload with params",
        );

        Ok(Json(UploadInfo::success("")))
    }
}
