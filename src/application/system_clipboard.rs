//! System clipboard facade
//!
//! Thin, stateless operations over a [`NativeClipboard`]: copy text, file
//! lists or images, inspect what is there, listen for flavor changes and
//! clear.
//!
//! Error boundaries:
//!
//! - `copy_*` and the pass-through accessors propagate every failure.
//! - `clear` swallows [`ClipboardError::Unavailable`]; clearing is best-effort.
//! - `as_*` and [`SystemClipboard::get_clipboard`] absorb `UnsupportedFlavor`
//!   and `DataRetrieval` into `Ok(None)` and propagate `Unavailable`.
//! - `is_*` propagate `Unavailable` only.
//!
//! Passing `None` to any `copy_*` means "clear the clipboard".

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{
    ClipboardError, DataFlavor, FileList, FileListSelection, ImageData, ImageSelection,
    TransferData, Transferable, LINE_SEPARATOR,
};

use super::ports::{ClipboardOwner, FlavorListener, NativeClipboard};

/// Facade over a native clipboard handle
pub struct SystemClipboard<C: NativeClipboard> {
    native: C,
}

impl<C: NativeClipboard> SystemClipboard<C> {
    /// Bind the facade to a clipboard handle
    pub fn new(native: C) -> Self {
        Self { native }
    }

    /// The underlying clipboard handle
    pub fn native(&self) -> &C {
        &self.native
    }

    // Mutation

    /// Replace the content with an empty sentinel. Never fails.
    pub fn clear(&self) {
        match self.native.set_contents(Transferable::Empty, None) {
            Ok(()) => debug!(clipboard = self.native.name(), "clipboard cleared"),
            Err(ClipboardError::Unavailable(reason)) => {
                debug!(clipboard = self.native.name(), %reason, "clear skipped, clipboard unavailable");
            }
            Err(e) => warn!(clipboard = self.native.name(), error = %e, "clear failed"),
        }
    }

    /// Alias for [`SystemClipboard::clear`]
    pub fn empty(&self) {
        self.clear();
    }

    /// Copy a string; `None` clears
    pub fn copy_text(&self, text: Option<&str>) -> Result<(), ClipboardError> {
        let Some(text) = text else {
            self.clear();
            return Ok(());
        };
        debug!(chars = text.chars().count(), "copying text");
        self.native.set_contents(Transferable::Text(text.to_owned()), None)
    }

    /// Copy a slice of paths (order and duplicates kept); `None` clears
    pub fn copy_files<P: AsRef<Path>>(&self, files: Option<&[P]>) -> Result<(), ClipboardError> {
        let Some(files) = files else {
            self.clear();
            return Ok(());
        };
        self.install_files(FileListSelection::new(files))
    }

    /// Copy any collection of paths (order and duplicates kept); `None` clears
    pub fn copy_file_collection<I>(&self, files: Option<I>) -> Result<(), ClipboardError>
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        let Some(files) = files else {
            self.clear();
            return Ok(());
        };
        self.install_files(files.into_iter().collect())
    }

    fn install_files(&self, selection: FileListSelection) -> Result<(), ClipboardError> {
        debug!(files = selection.files().len(), "copying file list");
        self.native.set_contents(Transferable::Files(selection), None)
    }

    /// Copy an image; `None` clears
    pub fn copy_image(&self, image: Option<ImageData>) -> Result<(), ClipboardError> {
        let Some(image) = image else {
            self.clear();
            return Ok(());
        };
        debug!(width = image.width(), height = image.height(), "copying image");
        self.native
            .set_contents(Transferable::Image(ImageSelection::new(image)), None)
    }

    // Inspection

    /// True when no flavor is advertised
    pub fn is_empty(&self) -> Result<bool, ClipboardError> {
        Ok(self.native.available_flavors()?.is_empty())
    }

    /// True when a string or a file list is available
    pub fn is_text(&self) -> Result<bool, ClipboardError> {
        Ok(self.native.is_flavor_available(DataFlavor::Text)?
            || self.native.is_flavor_available(DataFlavor::FileList)?)
    }

    /// The string if present, otherwise the file list rendered with the
    /// platform line separator, otherwise `None`
    pub fn as_text(&self) -> Result<Option<String>, ClipboardError> {
        if let Some(text) = self.as_string()? {
            return Ok(Some(text));
        }
        self.as_filenames()
    }

    pub fn is_string(&self) -> Result<bool, ClipboardError> {
        self.native.is_flavor_available(DataFlavor::Text)
    }

    pub fn as_string(&self) -> Result<Option<String>, ClipboardError> {
        Ok(self
            .get_clipboard(DataFlavor::Text)?
            .and_then(TransferData::into_text))
    }

    pub fn is_files(&self) -> Result<bool, ClipboardError> {
        self.native.is_flavor_available(DataFlavor::FileList)
    }

    /// The file list, read-only. Edit via [`FileList::to_vec`] and re-copy.
    pub fn as_files(&self) -> Result<Option<FileList>, ClipboardError> {
        Ok(self
            .get_clipboard(DataFlavor::FileList)?
            .and_then(TransferData::into_files))
    }

    /// File list joined by the platform line separator
    pub fn as_filenames(&self) -> Result<Option<String>, ClipboardError> {
        self.as_filenames_with(LINE_SEPARATOR)
    }

    /// File list joined by `delimiter`.
    ///
    /// An empty list renders as `Some("")`, a missing one as `None`.
    pub fn as_filenames_with(&self, delimiter: &str) -> Result<Option<String>, ClipboardError> {
        Ok(self.as_files()?.map(|files| files.join(delimiter)))
    }

    pub fn is_image(&self) -> Result<bool, ClipboardError> {
        self.native.is_flavor_available(DataFlavor::Image)
    }

    pub fn as_image(&self) -> Result<Option<ImageData>, ClipboardError> {
        Ok(self
            .get_clipboard(DataFlavor::Image)?
            .and_then(TransferData::into_image))
    }

    /// Value for any flavor, or `None` when the content does not carry it
    /// or it could not be materialized
    pub fn get_clipboard(&self, flavor: DataFlavor) -> Result<Option<TransferData>, ClipboardError> {
        match self.native.data(flavor) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_absent() => {
                debug!(%flavor, reason = %e, "flavor not readable");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    // Listeners and pass-through

    pub fn add_flavor_listener(&self, listener: Arc<dyn FlavorListener>) {
        self.native.add_flavor_listener(listener);
    }

    pub fn remove_flavor_listener(&self, listener: &Arc<dyn FlavorListener>) {
        self.native.remove_flavor_listener(listener);
    }

    pub fn flavor_listeners(&self) -> Vec<Arc<dyn FlavorListener>> {
        self.native.flavor_listeners()
    }

    pub fn available_flavors(&self) -> Result<Vec<DataFlavor>, ClipboardError> {
        self.native.available_flavors()
    }

    pub fn is_flavor_available(&self, flavor: DataFlavor) -> Result<bool, ClipboardError> {
        self.native.is_flavor_available(flavor)
    }

    pub fn contents(&self) -> Result<Option<Transferable>, ClipboardError> {
        self.native.contents()
    }

    pub fn set_contents(
        &self,
        contents: Transferable,
        owner: Option<Arc<dyn ClipboardOwner>>,
    ) -> Result<(), ClipboardError> {
        self.native.set_contents(contents, owner)
    }

    /// Raw value for `flavor`; unlike `get_clipboard` nothing is absorbed
    pub fn data(&self, flavor: DataFlavor) -> Result<TransferData, ClipboardError> {
        self.native.data(flavor)
    }

    pub fn name(&self) -> &str {
        self.native.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mock clipboard that answers every call with a scripted result
    struct MockClipboard {
        flavors: Result<Vec<DataFlavor>, ClipboardError>,
        data: Result<TransferData, ClipboardError>,
        set_result: Result<(), ClipboardError>,
        installed: Mutex<Vec<Transferable>>,
    }

    impl MockClipboard {
        fn answering(data: Result<TransferData, ClipboardError>) -> Self {
            Self {
                flavors: Ok(vec![]),
                data,
                set_result: Ok(()),
                installed: Mutex::new(Vec::new()),
            }
        }
    }

    impl NativeClipboard for MockClipboard {
        fn name(&self) -> &str {
            "mock"
        }

        fn contents(&self) -> Result<Option<Transferable>, ClipboardError> {
            Ok(None)
        }

        fn set_contents(
            &self,
            contents: Transferable,
            _owner: Option<Arc<dyn ClipboardOwner>>,
        ) -> Result<(), ClipboardError> {
            self.installed.lock().unwrap().push(contents);
            self.set_result.clone()
        }

        fn available_flavors(&self) -> Result<Vec<DataFlavor>, ClipboardError> {
            self.flavors.clone()
        }

        fn data(&self, _flavor: DataFlavor) -> Result<TransferData, ClipboardError> {
            self.data.clone()
        }

        fn add_flavor_listener(&self, _listener: Arc<dyn FlavorListener>) {}

        fn remove_flavor_listener(&self, _listener: &Arc<dyn FlavorListener>) {}

        fn flavor_listeners(&self) -> Vec<Arc<dyn FlavorListener>> {
            Vec::new()
        }
    }

    fn unavailable() -> ClipboardError {
        ClipboardError::Unavailable("held by another process".into())
    }

    #[test]
    fn data_retrieval_failure_reads_as_absent() {
        let clipboard = SystemClipboard::new(MockClipboard::answering(Err(
            ClipboardError::DataRetrieval {
                flavor: DataFlavor::Image,
                message: "conversion failed".into(),
            },
        )));

        assert_eq!(clipboard.as_image().unwrap(), None);
        assert_eq!(clipboard.get_clipboard(DataFlavor::Image).unwrap(), None);
    }

    #[test]
    fn unavailable_propagates_from_reads() {
        let clipboard = SystemClipboard::new(MockClipboard::answering(Err(unavailable())));

        assert_eq!(clipboard.as_string(), Err(unavailable()));
        assert_eq!(clipboard.get_clipboard(DataFlavor::Text), Err(unavailable()));
    }

    #[test]
    fn unavailable_propagates_from_flavor_queries() {
        let mut mock = MockClipboard::answering(Ok(TransferData::Text("x".into())));
        mock.flavors = Err(unavailable());
        let clipboard = SystemClipboard::new(mock);

        assert_eq!(clipboard.is_empty(), Err(unavailable()));
        assert_eq!(clipboard.is_string(), Err(unavailable()));
        assert_eq!(clipboard.available_flavors(), Err(unavailable()));
    }

    #[test]
    fn raw_data_does_not_absorb_unsupported_flavor() {
        let clipboard = SystemClipboard::new(MockClipboard::answering(Err(
            ClipboardError::UnsupportedFlavor(DataFlavor::Text),
        )));

        assert_eq!(
            clipboard.data(DataFlavor::Text),
            Err(ClipboardError::UnsupportedFlavor(DataFlavor::Text))
        );
        assert_eq!(clipboard.as_string().unwrap(), None);
    }

    #[test]
    fn clear_swallows_unavailable() {
        let mut mock = MockClipboard::answering(Ok(TransferData::Text("x".into())));
        mock.set_result = Err(unavailable());
        let clipboard = SystemClipboard::new(mock);

        clipboard.clear();
        clipboard.empty();

        let installed = clipboard.native().installed.lock().unwrap();
        assert_eq!(*installed, vec![Transferable::Empty, Transferable::Empty]);
    }

    #[test]
    fn copy_propagates_unavailable() {
        let mut mock = MockClipboard::answering(Ok(TransferData::Text("x".into())));
        mock.set_result = Err(unavailable());
        let clipboard = SystemClipboard::new(mock);

        assert_eq!(clipboard.copy_text(Some("hello")), Err(unavailable()));
    }

    #[test]
    fn copy_none_installs_the_empty_sentinel() {
        let clipboard = SystemClipboard::new(MockClipboard::answering(Ok(TransferData::Text(
            "x".into(),
        ))));

        clipboard.copy_text(None).unwrap();
        clipboard.copy_files::<PathBuf>(None).unwrap();
        clipboard.copy_file_collection::<Vec<PathBuf>>(None).unwrap();
        clipboard.copy_image(None).unwrap();

        let installed = clipboard.native().installed.lock().unwrap();
        assert_eq!(installed.len(), 4);
        assert!(installed.iter().all(|t| *t == Transferable::Empty));
    }

    #[test]
    fn copy_file_collection_wraps_a_file_list_selection() {
        let clipboard = SystemClipboard::new(MockClipboard::answering(Ok(TransferData::Text(
            "x".into(),
        ))));

        clipboard
            .copy_file_collection(Some(vec!["b", "a", "b"]))
            .unwrap();

        let installed = clipboard.native().installed.lock().unwrap();
        match &installed[0] {
            Transferable::Files(selection) => assert_eq!(selection.files().join(","), "b,a,b"),
            other => panic!("expected file selection, got {:?}", other),
        }
    }
}
