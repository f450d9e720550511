//! Transferable content installed on or read from a clipboard
//!
//! A [`Transferable`] is immutable once built: the flavor set it advertises
//! never changes for its lifetime. The clipboard holds at most one at a time
//! and every copy or clear replaces it wholesale.

use std::path::{Path, PathBuf};

use super::error::ClipboardError;
use super::flavor::DataFlavor;
use super::payload::{FileList, ImageData, TransferData};

/// Adapter carrying a file list; supports only [`DataFlavor::FileList`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListSelection {
    files: FileList,
}

impl FileListSelection {
    const FLAVORS: &'static [DataFlavor] = &[DataFlavor::FileList];

    /// Build from a slice of paths (order and duplicates preserved)
    pub fn new<P: AsRef<Path>>(files: &[P]) -> Self {
        Self {
            files: FileList::new(files),
        }
    }

    pub fn files(&self) -> &FileList {
        &self.files
    }

    pub fn flavors(&self) -> &'static [DataFlavor] {
        Self::FLAVORS
    }

    pub fn is_flavor_supported(&self, flavor: DataFlavor) -> bool {
        flavor == DataFlavor::FileList
    }

    pub fn transfer_data(&self, flavor: DataFlavor) -> Result<FileList, ClipboardError> {
        if self.is_flavor_supported(flavor) {
            Ok(self.files.clone())
        } else {
            Err(ClipboardError::UnsupportedFlavor(flavor))
        }
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for FileListSelection {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl From<FileList> for FileListSelection {
    fn from(files: FileList) -> Self {
        Self { files }
    }
}

/// Adapter carrying a single image; supports only [`DataFlavor::Image`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSelection {
    image: ImageData,
}

impl ImageSelection {
    const FLAVORS: &'static [DataFlavor] = &[DataFlavor::Image];

    pub fn new(image: ImageData) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &ImageData {
        &self.image
    }

    pub fn flavors(&self) -> &'static [DataFlavor] {
        Self::FLAVORS
    }

    pub fn is_flavor_supported(&self, flavor: DataFlavor) -> bool {
        flavor == DataFlavor::Image
    }

    pub fn transfer_data(&self, flavor: DataFlavor) -> Result<ImageData, ClipboardError> {
        if self.is_flavor_supported(flavor) {
            Ok(self.image.clone())
        } else {
            Err(ClipboardError::UnsupportedFlavor(flavor))
        }
    }
}

/// Content bundle offered to or read from the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transferable {
    /// Clear sentinel: advertises nothing, refuses every flavor
    Empty,
    /// Plain string
    Text(String),
    /// File list adapter
    Files(FileListSelection),
    /// Image adapter
    Image(ImageSelection),
    /// Read-only capture of native content, possibly carrying several
    /// flavors at once (one value per flavor, in advertisement order)
    Snapshot(Vec<TransferData>),
}

impl Transferable {
    /// Advertised flavors, in order
    pub fn flavors(&self) -> Vec<DataFlavor> {
        match self {
            Self::Empty => Vec::new(),
            Self::Text(_) => vec![DataFlavor::Text],
            Self::Files(selection) => selection.flavors().to_vec(),
            Self::Image(selection) => selection.flavors().to_vec(),
            Self::Snapshot(values) => values.iter().map(TransferData::flavor).collect(),
        }
    }

    pub fn is_flavor_supported(&self, flavor: DataFlavor) -> bool {
        match self {
            Self::Empty => false,
            Self::Text(_) => flavor == DataFlavor::Text,
            Self::Files(selection) => selection.is_flavor_supported(flavor),
            Self::Image(selection) => selection.is_flavor_supported(flavor),
            Self::Snapshot(values) => values.iter().any(|v| v.flavor() == flavor),
        }
    }

    /// Produce the value for `flavor`, or `UnsupportedFlavor`
    pub fn transfer_data(&self, flavor: DataFlavor) -> Result<TransferData, ClipboardError> {
        match self {
            Self::Empty => Err(ClipboardError::UnsupportedFlavor(flavor)),
            Self::Text(text) if flavor == DataFlavor::Text => Ok(TransferData::Text(text.clone())),
            Self::Text(_) => Err(ClipboardError::UnsupportedFlavor(flavor)),
            Self::Files(selection) => selection.transfer_data(flavor).map(TransferData::Files),
            Self::Image(selection) => selection.transfer_data(flavor).map(TransferData::Image),
            Self::Snapshot(values) => values
                .iter()
                .find(|v| v.flavor() == flavor)
                .cloned()
                .ok_or(ClipboardError::UnsupportedFlavor(flavor)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flavors().is_empty()
    }
}
