//! Texture loading for block types.
//!
//! Drawing is done elsewhere; placement only needs to know that a block's
//! texture decodes, so loaders report the decoded dimensions.

use std::path::PathBuf;

use image::GenericImageView;

use crate::error::AssetError;

/// Texture path of a built-in 1x1 white texture.
pub const BUILTIN_WHITE: &str = "builtin:white";

/// Summary of a decoded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Decodes the texture for a texture path.
pub trait TextureLoader {
    /// Decodes the texture at `path`.
    fn load_texture(&self, path: &str) -> Result<TextureInfo, AssetError>;
}

/// Decodes image files from disk with the `image` crate.
#[derive(Debug, Clone, Default)]
pub struct ImageTextureLoader {
    /// Directory texture paths are resolved against
    pub asset_root: PathBuf,
}

impl ImageTextureLoader {
    /// Creates a loader resolving relative paths against `asset_root`.
    pub fn new<P: Into<PathBuf>>(asset_root: P) -> Self {
        Self {
            asset_root: asset_root.into(),
        }
    }
}

impl TextureLoader for ImageTextureLoader {
    fn load_texture(&self, path: &str) -> Result<TextureInfo, AssetError> {
        if path == BUILTIN_WHITE {
            return Ok(TextureInfo {
                width: 1,
                height: 1,
            });
        }

        let full_path = self.asset_root.join(path);
        log::debug!("Loading texture {:?}", full_path);
        let image = image::open(&full_path).map_err(|e| AssetError::TextureLoad {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let (width, height) = image.dimensions();

        Ok(TextureInfo { width, height })
    }
}
