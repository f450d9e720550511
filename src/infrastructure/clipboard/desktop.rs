//! Desktop clipboard adapter
//!
//! Strings and images go through arboard, file lists and flavor probing go
//! through clipboard-rs. Works on Windows, macOS and Linux (X11/Wayland).
//!
//! The arboard handle is created on first use and kept for the life of the
//! adapter; on Linux the clipboard content we own is only served while that
//! handle is alive.

use std::borrow::Cow;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use clipboard_rs::{
    Clipboard as _, ClipboardContext, ClipboardHandler, ClipboardWatcher as _,
    ClipboardWatcherContext, ContentFormat, WatcherShutdown,
};
use tracing::{debug, info, warn};
use url::Url;

use crate::application::ports::{ClipboardOwner, FlavorEvent, FlavorListener, NativeClipboard};
use crate::domain::{
    ClipboardError, DataFlavor, FileList, ImageData, TransferData, Transferable,
};

use super::memory::same_listener;

type Listeners = Arc<Mutex<Vec<Arc<dyn FlavorListener>>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn unavailable(err: impl Display) -> ClipboardError {
    ClipboardError::Unavailable(err.to_string())
}

fn map_arboard_error(err: &arboard::Error, flavor: DataFlavor) -> ClipboardError {
    match err {
        arboard::Error::ContentNotAvailable => ClipboardError::UnsupportedFlavor(flavor),
        arboard::Error::ConversionFailure => ClipboardError::DataRetrieval {
            flavor,
            message: err.to_string(),
        },
        other => unavailable(other),
    }
}

fn file_context() -> Result<ClipboardContext, ClipboardError> {
    ClipboardContext::new().map_err(unavailable)
}

/// Flavors currently advertised by the OS clipboard, in text-priority order
fn query_flavors() -> Result<Vec<DataFlavor>, ClipboardError> {
    let ctx = file_context()?;
    let mut flavors = Vec::new();
    if ctx.has(ContentFormat::Text) {
        flavors.push(DataFlavor::Text);
    }
    if ctx.has(ContentFormat::Files) {
        flavors.push(DataFlavor::FileList);
    }
    if ctx.has(ContentFormat::Image) {
        flavors.push(DataFlavor::Image);
    }
    Ok(flavors)
}

fn conversion_error(message: impl Display) -> ClipboardError {
    ClipboardError::DataRetrieval {
        flavor: DataFlavor::FileList,
        message: message.to_string(),
    }
}

/// Clipboard file entry to a path; `file:` URIs are percent-decoded
fn path_from_native(entry: &str) -> Result<PathBuf, ClipboardError> {
    if !entry.starts_with("file:") {
        return Ok(PathBuf::from(entry));
    }
    let url = Url::parse(entry).map_err(|e| conversion_error(format!("{entry}: {e}")))?;
    url.to_file_path()
        .map_err(|()| conversion_error(format!("{entry}: not a local file URI")))
}

fn absolute(path: &Path) -> Result<PathBuf, ClipboardError> {
    std::path::absolute(path).map_err(|e| conversion_error(format!("{}: {e}", path.display())))
}

/// Path to the entry form the platform expects; relative paths are resolved
/// against the working directory first
#[cfg(target_os = "linux")]
fn path_to_native(path: &Path) -> Result<String, ClipboardError> {
    let path = absolute(path)?;
    Url::from_file_path(&path).map(String::from).map_err(|()| {
        conversion_error(format!("{}: cannot be written as a file URI", path.display()))
    })
}

#[cfg(not(target_os = "linux"))]
fn path_to_native(path: &Path) -> Result<String, ClipboardError> {
    Ok(absolute(path)?.to_string_lossy().into_owned())
}

fn read_files() -> Result<FileList, ClipboardError> {
    let ctx = file_context()?;
    if !ctx.has(ContentFormat::Files) {
        return Err(ClipboardError::UnsupportedFlavor(DataFlavor::FileList));
    }
    let entries = ctx.get_files().map_err(conversion_error)?;
    entries.iter().map(|entry| path_from_native(entry)).collect()
}

fn write_files(files: &FileList) -> Result<(), ClipboardError> {
    let entries = files
        .iter()
        .map(|path| path_to_native(path))
        .collect::<Result<Vec<_>, _>>()?;
    file_context()?.set_files(entries).map_err(unavailable)
}

/// Watcher callback turning OS change notifications into flavor events
struct FlavorWatch {
    name: String,
    listeners: Listeners,
    last: Vec<DataFlavor>,
}

impl ClipboardHandler for FlavorWatch {
    fn on_clipboard_change(&mut self) {
        let flavors = match query_flavors() {
            Ok(flavors) => flavors,
            Err(e) => {
                warn!(error = %e, "failed to query clipboard flavors");
                return;
            }
        };
        if flavors == self.last {
            return;
        }
        self.last = flavors.clone();

        let event = FlavorEvent {
            clipboard: self.name.clone(),
            flavors,
        };
        let listeners = lock(&self.listeners).clone();
        for listener in listeners {
            listener.flavors_changed(&event);
        }
    }
}

/// Adapter for the operating system clipboard
pub struct DesktopClipboard {
    name: String,
    handle: Mutex<Option<arboard::Clipboard>>,
    owner: Mutex<Option<(Arc<dyn ClipboardOwner>, Transferable)>>,
    listeners: Listeners,
    watcher: Mutex<Option<WatcherShutdown>>,
}

impl DesktopClipboard {
    /// Create the adapter; the OS handle is acquired lazily
    pub fn new() -> Self {
        Self {
            name: "System".to_string(),
            handle: Mutex::new(None),
            owner: Mutex::new(None),
            listeners: Arc::new(Mutex::new(Vec::new())),
            watcher: Mutex::new(None),
        }
    }

    /// Check that the OS clipboard can be reached at all
    pub fn check_access(&self) -> Result<(), ClipboardError> {
        self.with_handle(DataFlavor::Text, |_| Ok(()))?;
        file_context().map(|_| ())
    }

    fn with_handle<T>(
        &self,
        flavor: DataFlavor,
        op: impl FnOnce(&mut arboard::Clipboard) -> Result<T, arboard::Error>,
    ) -> Result<T, ClipboardError> {
        let mut slot = lock(&self.handle);
        if slot.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|e| unavailable(&e))?;
            debug!(clipboard = %self.name, "acquired clipboard handle");
            *slot = Some(clipboard);
        }
        match slot.as_mut() {
            Some(clipboard) => op(clipboard).map_err(|e| map_arboard_error(&e, flavor)),
            None => Err(unavailable("clipboard handle missing")),
        }
    }

    fn read_image(&self) -> Result<ImageData, ClipboardError> {
        let image = self.with_handle(DataFlavor::Image, |cb| cb.get_image())?;
        ImageData::from_rgba8(image.width, image.height, image.bytes.into_owned()).map_err(|e| {
            ClipboardError::DataRetrieval {
                flavor: DataFlavor::Image,
                message: e.to_string(),
            }
        })
    }

    fn write(&self, value: &TransferData) -> Result<(), ClipboardError> {
        match value {
            TransferData::Text(text) => {
                self.with_handle(DataFlavor::Text, |cb| cb.set_text(text.as_str()))
            }
            TransferData::Files(files) => write_files(files),
            TransferData::Image(image) => self.with_handle(DataFlavor::Image, |cb| {
                cb.set_image(arboard::ImageData {
                    width: image.width(),
                    height: image.height(),
                    bytes: Cow::Borrowed(image.rgba()),
                })
            }),
        }
    }

    fn start_watcher(&self) -> Result<(), ClipboardError> {
        let mut slot = lock(&self.watcher);
        if slot.is_some() {
            return Ok(());
        }

        let mut ctx: ClipboardWatcherContext<FlavorWatch> =
            ClipboardWatcherContext::new().map_err(unavailable)?;
        let handler = FlavorWatch {
            name: self.name.clone(),
            listeners: Arc::clone(&self.listeners),
            last: query_flavors().unwrap_or_default(),
        };
        let shutdown = ctx.add_handler(handler).get_shutdown_channel();

        thread::Builder::new()
            .name("sysclip-watch".to_string())
            .spawn(move || {
                debug!("clipboard watch started");
                ctx.start_watch();
                debug!("clipboard watch stopped");
            })
            .map_err(unavailable)?;

        *slot = Some(shutdown);
        info!(clipboard = %self.name, "watching clipboard for flavor changes");
        Ok(())
    }

    fn stop_watcher(&self) {
        if let Some(shutdown) = lock(&self.watcher).take() {
            shutdown.stop();
        }
    }
}

impl Default for DesktopClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DesktopClipboard {
    fn drop(&mut self) {
        self.stop_watcher();
    }
}

impl NativeClipboard for DesktopClipboard {
    fn name(&self) -> &str {
        &self.name
    }

    fn contents(&self) -> Result<Option<Transferable>, ClipboardError> {
        let mut values = Vec::new();
        for flavor in self.available_flavors()? {
            match self.data(flavor) {
                Ok(value) => values.push(value),
                Err(e) if e.is_absent() => debug!(%flavor, reason = %e, "skipping flavor"),
                Err(e) => return Err(e),
            }
        }
        if values.is_empty() {
            return Ok(Some(Transferable::Empty));
        }
        Ok(Some(Transferable::Snapshot(values)))
    }

    fn set_contents(
        &self,
        contents: Transferable,
        owner: Option<Arc<dyn ClipboardOwner>>,
    ) -> Result<(), ClipboardError> {
        match &contents {
            Transferable::Empty => self.with_handle(DataFlavor::Text, |cb| cb.clear())?,
            Transferable::Text(text) => self.write(&TransferData::Text(text.clone()))?,
            Transferable::Files(selection) => write_files(selection.files())?,
            Transferable::Image(selection) => {
                self.write(&TransferData::Image(selection.image().clone()))?
            }
            // The OS clipboard takes one representation per write: keep the first
            Transferable::Snapshot(values) => match values.first() {
                Some(value) => self.write(value)?,
                None => self.with_handle(DataFlavor::Text, |cb| cb.clear())?,
            },
        }
        debug!(clipboard = %self.name, flavors = ?contents.flavors(), "contents replaced");

        let previous = {
            let mut slot = lock(&self.owner);
            let next = owner.clone().map(|o| (o, contents));
            std::mem::replace(&mut *slot, next)
        };
        if let Some((previous_owner, old_contents)) = previous {
            let same = owner
                .as_ref()
                .is_some_and(|o| std::ptr::addr_eq(Arc::as_ptr(o), Arc::as_ptr(&previous_owner)));
            if !same {
                previous_owner.lost_ownership(&self.name, &old_contents);
            }
        }
        Ok(())
    }

    fn available_flavors(&self) -> Result<Vec<DataFlavor>, ClipboardError> {
        query_flavors()
    }

    fn data(&self, flavor: DataFlavor) -> Result<TransferData, ClipboardError> {
        match flavor {
            DataFlavor::Text => self
                .with_handle(flavor, |cb| cb.get_text())
                .map(TransferData::Text),
            DataFlavor::FileList => read_files().map(TransferData::Files),
            DataFlavor::Image => self.read_image().map(TransferData::Image),
        }
    }

    fn add_flavor_listener(&self, listener: Arc<dyn FlavorListener>) {
        lock(&self.listeners).push(listener);
        if let Err(e) = self.start_watcher() {
            warn!(error = %e, "flavor listener registered but clipboard watch failed to start");
        }
    }

    fn remove_flavor_listener(&self, listener: &Arc<dyn FlavorListener>) {
        let now_empty = {
            let mut listeners = lock(&self.listeners);
            if let Some(pos) = listeners.iter().position(|l| same_listener(l, listener)) {
                listeners.remove(pos);
            }
            listeners.is_empty()
        };
        if now_empty {
            self.stop_watcher();
        }
    }

    fn flavor_listeners(&self) -> Vec<Arc<dyn FlavorListener>> {
        lock(&self.listeners).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipboard_creates_without_touching_the_os() {
        let clipboard = DesktopClipboard::new();
        assert_eq!(clipboard.name(), "System");
        assert!(clipboard.flavor_listeners().is_empty());
    }

    #[test]
    fn clipboard_default_creates() {
        let _clipboard = DesktopClipboard::default();
    }

    #[test]
    fn arboard_errors_map_onto_the_taxonomy() {
        assert_eq!(
            map_arboard_error(&arboard::Error::ContentNotAvailable, DataFlavor::Text),
            ClipboardError::UnsupportedFlavor(DataFlavor::Text)
        );
        assert!(matches!(
            map_arboard_error(&arboard::Error::ConversionFailure, DataFlavor::Image),
            ClipboardError::DataRetrieval {
                flavor: DataFlavor::Image,
                ..
            }
        ));
        assert!(matches!(
            map_arboard_error(&arboard::Error::ClipboardOccupied, DataFlavor::Text),
            ClipboardError::Unavailable(_)
        ));
    }

    #[test]
    #[cfg(unix)]
    fn file_uris_are_percent_decoded() {
        assert_eq!(
            path_from_native("file:///home/u/My%20Docs/a.txt").unwrap(),
            PathBuf::from("/home/u/My Docs/a.txt")
        );
        assert_eq!(
            path_from_native("file:///tmp/100%25.txt").unwrap(),
            PathBuf::from("/tmp/100%.txt")
        );
        assert_eq!(
            path_from_native("file:///tmp/caf%C3%A9.txt").unwrap(),
            PathBuf::from("/tmp/café.txt")
        );
    }

    #[test]
    fn plain_entries_are_kept_as_paths() {
        assert_eq!(
            path_from_native("/tmp/b c.txt").unwrap(),
            PathBuf::from("/tmp/b c.txt")
        );
    }

    #[test]
    #[cfg(unix)]
    fn remote_file_uris_are_rejected() {
        assert!(matches!(
            path_from_native("file://server/share/a.txt"),
            Err(ClipboardError::DataRetrieval {
                flavor: DataFlavor::FileList,
                ..
            })
        ));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn paths_are_written_as_encoded_file_uris() {
        assert_eq!(
            path_to_native(Path::new("/tmp/My Docs/a.txt")).unwrap(),
            "file:///tmp/My%20Docs/a.txt"
        );
        assert_eq!(
            path_to_native(Path::new("/tmp/100%.txt")).unwrap(),
            "file:///tmp/100%25.txt"
        );
        assert_eq!(
            path_to_native(Path::new("/tmp/café.txt")).unwrap(),
            "file:///tmp/caf%C3%A9.txt"
        );
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn relative_paths_are_written_absolute() {
        let uri = path_to_native(Path::new("rel/a b.txt")).unwrap();
        assert!(uri.starts_with("file:///"), "got {uri}");
        assert!(uri.ends_with("/rel/a%20b.txt"), "got {uri}");

        let expected = std::env::current_dir().unwrap().join("rel/a b.txt");
        assert_eq!(path_from_native(&uri).unwrap(), expected);
    }

    #[test]
    fn unconvertible_paths_fail_as_data_retrieval() {
        let err = write_files(&FileList::new(&[""])).unwrap_err();
        assert!(matches!(
            err,
            ClipboardError::DataRetrieval {
                flavor: DataFlavor::FileList,
                ..
            }
        ));
    }

    #[test]
    #[cfg(not(target_os = "linux"))]
    fn relative_paths_are_written_absolute() {
        let entry = path_to_native(Path::new("rel/a b.txt")).unwrap();
        assert!(Path::new(&entry).is_absolute(), "got {entry}");
    }
}
