use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset path traversal blocked: {0}")]
    Traversal(String),
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("image decode error: {0}")]
    Decode(String),
    #[error("image {width}x{height} exceeds limit {max}x{max}")]
    TooLarge { width: u32, height: u32, max: u32 },
}

/// Byte source for script-referenced assets.
pub trait AssetStore {
    fn load_bytes(&self, id: &str) -> Result<Vec<u8>, AssetError>;
}

impl<T: AssetStore + ?Sized> AssetStore for Arc<T> {
    fn load_bytes(&self, id: &str) -> Result<Vec<u8>, AssetError> {
        (**self).load_bytes(id)
    }
}

impl<T: AssetStore + ?Sized> AssetStore for Box<T> {
    fn load_bytes(&self, id: &str) -> Result<Vec<u8>, AssetError> {
        (**self).load_bytes(id)
    }
}

/// Reads assets relative to a root directory.
#[derive(Clone, Debug)]
pub struct FileAssetStore {
    root: PathBuf,
}

impl FileAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetStore for FileAssetStore {
    fn load_bytes(&self, id: &str) -> Result<Vec<u8>, AssetError> {
        let rel = sanitize_rel_path(id)?;
        let path = self.root.join(rel);
        if !path.is_file() {
            return Err(AssetError::NotFound(id.to_string()));
        }
        Ok(fs::read(path)?)
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryAssetStore {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryAssetStore {
    pub fn insert(&mut self, id: impl Into<String>, data: Vec<u8>) {
        self.assets.insert(id.into(), data);
    }
}

impl AssetStore for MemoryAssetStore {
    fn load_bytes(&self, id: &str) -> Result<Vec<u8>, AssetError> {
        self.assets
            .get(id)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(id.to_string()))
    }
}

/// Rejects absolute paths and parent components.
fn sanitize_rel_path(id: &str) -> Result<PathBuf, AssetError> {
    let path = Path::new(id);
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            _ => return Err(AssetError::Traversal(id.to_string())),
        }
    }
    if clean.as_os_str().is_empty() {
        return Err(AssetError::NotFound(id.to_string()));
    }
    Ok(clean)
}

/// Largest accepted edge of a decoded image.
pub const MAX_IMAGE_EDGE: u32 = 4096;

/// Decoded RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Sprite {
    pub fn decode(bytes: &[u8]) -> Result<Self, AssetError> {
        let image =
            image::load_from_memory(bytes).map_err(|err| AssetError::Decode(err.to_string()))?;
        let rgba = image.to_rgba8();
        let (width, height) = (rgba.width(), rgba.height());
        if width > MAX_IMAGE_EDGE || height > MAX_IMAGE_EDGE {
            return Err(AssetError::TooLarge {
                width,
                height,
                max: MAX_IMAGE_EDGE,
            });
        }
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// RGBA of pixel `(x, y)`; callers keep coordinates in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[idx..idx + 4]);
        out
    }
}
