//! Process-local clipboard
//!
//! Holds content in memory. Used as the substitute clipboard in tests and as
//! a fallback when no desktop clipboard can be reached. Listeners and owners
//! are called synchronously on the mutating thread, after the internal lock
//! is released.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::application::ports::{ClipboardOwner, FlavorEvent, FlavorListener, NativeClipboard};
use crate::domain::{ClipboardError, DataFlavor, TransferData, Transferable};

#[derive(Default)]
struct State {
    contents: Option<Transferable>,
    owner: Option<Arc<dyn ClipboardOwner>>,
}

/// In-memory clipboard adapter
pub struct InMemoryClipboard {
    name: String,
    state: Mutex<State>,
    listeners: Mutex<Vec<Arc<dyn FlavorListener>>>,
    available: AtomicBool,
}

impl InMemoryClipboard {
    /// Create an empty in-memory clipboard
    pub fn new() -> Self {
        Self::with_name("memory")
    }

    /// Create with a custom display name
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(State::default()),
            listeners: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate another process holding the clipboard.
    ///
    /// While unavailable, content access fails with `Unavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), ClipboardError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ClipboardError::Unavailable(format!(
                "{} clipboard is held by another process",
                self.name
            )))
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn listener_list(&self) -> MutexGuard<'_, Vec<Arc<dyn FlavorListener>>> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn flavors_of(contents: &Option<Transferable>) -> Vec<DataFlavor> {
        contents.as_ref().map(Transferable::flavors).unwrap_or_default()
    }
}

impl Default for InMemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn same_listener(a: &Arc<dyn FlavorListener>, b: &Arc<dyn FlavorListener>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

fn same_owner(a: &Arc<dyn ClipboardOwner>, b: &Arc<dyn ClipboardOwner>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl NativeClipboard for InMemoryClipboard {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_process_local(&self) -> bool {
        true
    }

    fn contents(&self) -> Result<Option<Transferable>, ClipboardError> {
        self.check_available()?;
        Ok(self.state().contents.clone())
    }

    fn set_contents(
        &self,
        contents: Transferable,
        owner: Option<Arc<dyn ClipboardOwner>>,
    ) -> Result<(), ClipboardError> {
        self.check_available()?;

        let new_flavors = contents.flavors();
        let (old_flavors, old_contents, old_owner) = {
            let mut state = self.state();
            let old_flavors = Self::flavors_of(&state.contents);
            let old_contents = state.contents.replace(contents);
            let old_owner = std::mem::replace(&mut state.owner, owner.clone());
            (old_flavors, old_contents, old_owner)
        };
        debug!(clipboard = %self.name, flavors = ?new_flavors, "contents replaced");

        if let (Some(previous), Some(old_contents)) = (old_owner, old_contents) {
            let same = owner.as_ref().is_some_and(|o| same_owner(o, &previous));
            if !same {
                previous.lost_ownership(&self.name, &old_contents);
            }
        }

        if old_flavors != new_flavors {
            let event = FlavorEvent {
                clipboard: self.name.clone(),
                flavors: new_flavors,
            };
            for listener in self.flavor_listeners() {
                listener.flavors_changed(&event);
            }
        }

        Ok(())
    }

    fn available_flavors(&self) -> Result<Vec<DataFlavor>, ClipboardError> {
        self.check_available()?;
        Ok(Self::flavors_of(&self.state().contents))
    }

    fn data(&self, flavor: DataFlavor) -> Result<TransferData, ClipboardError> {
        self.check_available()?;
        match &self.state().contents {
            Some(contents) => contents.transfer_data(flavor),
            None => Err(ClipboardError::UnsupportedFlavor(flavor)),
        }
    }

    fn add_flavor_listener(&self, listener: Arc<dyn FlavorListener>) {
        self.listener_list().push(listener);
    }

    fn remove_flavor_listener(&self, listener: &Arc<dyn FlavorListener>) {
        let mut listeners = self.listener_list();
        if let Some(pos) = listeners.iter().position(|l| same_listener(l, listener)) {
            listeners.remove(pos);
        }
    }

    fn flavor_listeners(&self) -> Vec<Arc<dyn FlavorListener>> {
        self.listener_list().clone()
    }
}
