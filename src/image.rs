use poem_openapi::Object;

/// A persisted image record.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Image {
    pub id: i64,
    pub name: String,
    pub size: i64,
}

/// An image record which has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub name: String,
    pub size: i64,
}

impl NewImage {
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size: size as i64,
        }
    }
}

#[derive(Object, Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// The unique id of the image record.
    pub id: i64,

    /// The generated storage name of the file.
    ///
    /// This is used to download the file.
    pub name: String,

    /// The size of the file in bytes.
    pub size: i64,
}

impl From<Image> for ImageInfo {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            name: image.name,
            size: image.size,
        }
    }
}

#[derive(Object, Debug)]
pub struct UploadInfo {
    /// A human readable status message.
    pub message: String,

    /// The generated storage name for the file.
    ///
    /// Empty if nothing was stored.
    pub name: String,
}

impl UploadInfo {
    pub fn success(name: impl Into<String>) -> Self {
        Self {
            message: "upload success".to_string(),
            name: name.into(),
        }
    }
}
