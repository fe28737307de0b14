//! Diagram image lookup.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A catalog image whose pixel size has been read, ready to be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageAsset {
    pub id: String,
    pub path: PathBuf,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl ImageAsset {
    /// Pixel height over pixel width; `None` for a zero-sized image.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.pixel_width == 0 || self.pixel_height == 0 {
            return None;
        }
        Some(f64::from(self.pixel_height) / f64::from(self.pixel_width))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("diagram {id} not found at {}", .path.display())]
    Missing { id: String, path: PathBuf },
    #[error("diagram {id} could not be read: {message}")]
    Unreadable { id: String, message: String },
}

pub trait ImageCatalog {
    fn probe(&self, id: &str) -> Result<ImageAsset, AssetError>;
}

impl<T: ImageCatalog + ?Sized> ImageCatalog for &T {
    fn probe(&self, id: &str) -> Result<ImageAsset, AssetError> {
        (**self).probe(id)
    }
}

/// Catalog backed by a directory of `<id>.png` files.
#[derive(Debug, Clone)]
pub struct FsImageCatalog {
    root: PathBuf,
    extension: String,
}

impl FsImageCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: "png".to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ids normally carry no extension; one that already ends in the catalog extension is used
    /// as-is.
    pub fn path_for(&self, id: &str) -> PathBuf {
        let has_extension = Path::new(id)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension));
        if has_extension {
            self.root.join(id)
        } else {
            self.root.join(format!("{id}.{}", self.extension))
        }
    }
}

impl ImageCatalog for FsImageCatalog {
    fn probe(&self, id: &str) -> Result<ImageAsset, AssetError> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Err(AssetError::Missing {
                id: id.to_string(),
                path,
            });
        }
        let (pixel_width, pixel_height) =
            image::image_dimensions(&path).map_err(|err| AssetError::Unreadable {
                id: id.to_string(),
                message: err.to_string(),
            })?;
        Ok(ImageAsset {
            id: id.to_string(),
            path,
            pixel_width,
            pixel_height,
        })
    }
}
