//! Clipboard port interface

use std::sync::Arc;

use crate::domain::{ClipboardError, DataFlavor, TransferData, Transferable};

/// Notification that the set of available flavors changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavorEvent {
    /// Name of the clipboard that changed
    pub clipboard: String,
    /// Flavors advertised after the change
    pub flavors: Vec<DataFlavor>,
}

/// Callback for flavor-set changes.
///
/// Delivery thread and timing are up to the clipboard implementation.
pub trait FlavorListener: Send + Sync {
    fn flavors_changed(&self, event: &FlavorEvent);
}

impl<F> FlavorListener for F
where
    F: Fn(&FlavorEvent) + Send + Sync,
{
    fn flavors_changed(&self, event: &FlavorEvent) {
        self(event)
    }
}

/// Callback for the installer of clipboard content
pub trait ClipboardOwner: Send + Sync {
    /// Called once `contents` has been replaced by someone else's content
    fn lost_ownership(&self, clipboard: &str, contents: &Transferable);
}

impl<F> ClipboardOwner for F
where
    F: Fn(&str, &Transferable) + Send + Sync,
{
    fn lost_ownership(&self, clipboard: &str, contents: &Transferable) {
        self(clipboard, contents)
    }
}

/// Port for the process-wide native clipboard resource.
///
/// Calls are synchronous. Any call may fail with
/// [`ClipboardError::Unavailable`] while another process holds the clipboard;
/// implementations never retry or block waiting for it.
pub trait NativeClipboard: Send + Sync {
    /// Display name of the clipboard
    fn name(&self) -> &str;

    /// Whether content lives only inside this process and is gone on exit
    fn is_process_local(&self) -> bool {
        false
    }

    /// Current content, or `None` if nothing has ever been installed
    fn contents(&self) -> Result<Option<Transferable>, ClipboardError>;

    /// Replace the current content.
    ///
    /// If the previous content was installed by a different owner, that
    /// owner is told it lost ownership.
    fn set_contents(
        &self,
        contents: Transferable,
        owner: Option<Arc<dyn ClipboardOwner>>,
    ) -> Result<(), ClipboardError>;

    /// Flavors the current content advertises (empty when cleared)
    fn available_flavors(&self) -> Result<Vec<DataFlavor>, ClipboardError>;

    fn is_flavor_available(&self, flavor: DataFlavor) -> Result<bool, ClipboardError> {
        Ok(self.available_flavors()?.contains(&flavor))
    }

    /// Value for `flavor` from the current content
    fn data(&self, flavor: DataFlavor) -> Result<TransferData, ClipboardError>;

    fn add_flavor_listener(&self, listener: Arc<dyn FlavorListener>);

    /// Remove a listener previously added (matched by identity)
    fn remove_flavor_listener(&self, listener: &Arc<dyn FlavorListener>);

    fn flavor_listeners(&self) -> Vec<Arc<dyn FlavorListener>>;
}

/// Blanket implementation for boxed clipboard types
impl NativeClipboard for Box<dyn NativeClipboard> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn is_process_local(&self) -> bool {
        self.as_ref().is_process_local()
    }

    fn contents(&self) -> Result<Option<Transferable>, ClipboardError> {
        self.as_ref().contents()
    }

    fn set_contents(
        &self,
        contents: Transferable,
        owner: Option<Arc<dyn ClipboardOwner>>,
    ) -> Result<(), ClipboardError> {
        self.as_ref().set_contents(contents, owner)
    }

    fn available_flavors(&self) -> Result<Vec<DataFlavor>, ClipboardError> {
        self.as_ref().available_flavors()
    }

    fn is_flavor_available(&self, flavor: DataFlavor) -> Result<bool, ClipboardError> {
        self.as_ref().is_flavor_available(flavor)
    }

    fn data(&self, flavor: DataFlavor) -> Result<TransferData, ClipboardError> {
        self.as_ref().data(flavor)
    }

    fn add_flavor_listener(&self, listener: Arc<dyn FlavorListener>) {
        self.as_ref().add_flavor_listener(listener)
    }

    fn remove_flavor_listener(&self, listener: &Arc<dyn FlavorListener>) {
        self.as_ref().remove_flavor_listener(listener)
    }

    fn flavor_listeners(&self) -> Vec<Arc<dyn FlavorListener>> {
        self.as_ref().flavor_listeners()
    }
}

/// Shared handles delegate to the inner clipboard
impl<T: NativeClipboard + ?Sized> NativeClipboard for Arc<T> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn is_process_local(&self) -> bool {
        self.as_ref().is_process_local()
    }

    fn contents(&self) -> Result<Option<Transferable>, ClipboardError> {
        self.as_ref().contents()
    }

    fn set_contents(
        &self,
        contents: Transferable,
        owner: Option<Arc<dyn ClipboardOwner>>,
    ) -> Result<(), ClipboardError> {
        self.as_ref().set_contents(contents, owner)
    }

    fn available_flavors(&self) -> Result<Vec<DataFlavor>, ClipboardError> {
        self.as_ref().available_flavors()
    }

    fn is_flavor_available(&self, flavor: DataFlavor) -> Result<bool, ClipboardError> {
        self.as_ref().is_flavor_available(flavor)
    }

    fn data(&self, flavor: DataFlavor) -> Result<TransferData, ClipboardError> {
        self.as_ref().data(flavor)
    }

    fn add_flavor_listener(&self, listener: Arc<dyn FlavorListener>) {
        self.as_ref().add_flavor_listener(listener)
    }

    fn remove_flavor_listener(&self, listener: &Arc<dyn FlavorListener>) {
        self.as_ref().remove_flavor_listener(listener)
    }

    fn flavor_listeners(&self) -> Vec<Arc<dyn FlavorListener>> {
        self.as_ref().flavor_listeners()
    }
}
