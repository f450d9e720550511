//! Typed clipboard payloads

use std::fmt;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::ImageDataError;
use super::flavor::DataFlavor;

/// Immutable, ordered list of file paths.
///
/// Cloning is cheap and never copies the paths. There is no way to mutate a
/// `FileList` in place; to edit clipboard files take [`FileList::to_vec`],
/// change the vector and copy it back.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FileList(Arc<[PathBuf]>);

impl FileList {
    /// Copy the given paths, preserving order and duplicates
    pub fn new<P: AsRef<Path>>(files: &[P]) -> Self {
        files.iter().map(|p| p.as_ref().to_path_buf()).collect()
    }

    /// An empty list
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Owned, mutable copy of the paths
    pub fn to_vec(&self) -> Vec<PathBuf> {
        self.0.to_vec()
    }

    /// Render the paths joined by `delimiter`.
    ///
    /// Paths are rendered as-is (no canonicalization); the delimiter only
    /// appears between elements, so an empty list renders as `""`.
    pub fn join(&self, delimiter: &str) -> String {
        let mut out = String::new();
        for (i, path) in self.0.iter().enumerate() {
            if i > 0 {
                out.push_str(delimiter);
            }
            out.push_str(&path.to_string_lossy());
        }
        out
    }
}

impl Deref for FileList {
    type Target = [PathBuf];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for FileList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let files: Vec<PathBuf> = iter.into_iter().map(Into::into).collect();
        Self(Arc::from(files))
    }
}

impl From<Vec<PathBuf>> for FileList {
    fn from(files: Vec<PathBuf>) -> Self {
        Self(Arc::from(files))
    }
}

impl<'a> IntoIterator for &'a FileList {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Debug for FileList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Decoded RGBA8 raster
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData {
    width: usize,
    height: usize,
    bytes: Arc<[u8]>,
}

impl ImageData {
    /// Bytes per pixel (RGBA, 8 bits per channel)
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Wrap an RGBA8 buffer, checking it matches the dimensions
    pub fn from_rgba8(
        width: usize,
        height: usize,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<Self, ImageDataError> {
        let bytes = bytes.into();
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(Self::BYTES_PER_PIXEL))
            .ok_or(ImageDataError::TooLarge { width, height })?;
        if bytes.len() != expected {
            return Err(ImageDataError::SizeMismatch {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bytes,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA8 pixels, row-major
    pub fn rgba(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Value produced for a requested flavor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferData {
    Text(String),
    Files(FileList),
    Image(ImageData),
}

impl TransferData {
    /// Flavor this value belongs to
    pub fn flavor(&self) -> DataFlavor {
        match self {
            Self::Text(_) => DataFlavor::Text,
            Self::Files(_) => DataFlavor::FileList,
            Self::Image(_) => DataFlavor::Image,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_files(self) -> Option<FileList> {
        match self {
            Self::Files(files) => Some(files),
            _ => None,
        }
    }

    pub fn into_image(self) -> Option<ImageData> {
        match self {
            Self::Image(image) => Some(image),
            _ => None,
        }
    }
}
