use std::cell::RefCell;

/// Holds the one widget a page may mount.
///
/// A second mount would inject a second stylesheet and duplicate the fixed
/// element ids, so later callers get the existing handle back instead.
pub struct MountSlot<T> {
    handle: RefCell<Option<T>>,
}

impl<T: Clone> MountSlot<T> {
    pub const fn new() -> Self {
        Self {
            handle: RefCell::new(None),
        }
    }

    pub fn current(&self) -> Option<T> {
        self.handle.borrow().clone()
    }

    /// Runs `mount` only while the slot is empty; a failed mount leaves it empty.
    pub fn get_or_mount<E>(&self, mount: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        if let Some(existing) = self.current() {
            tracing::debug!("widget already mounted, reusing its handle");
            return Ok(existing);
        }

        let handle = mount()?;
        *self.handle.borrow_mut() = Some(handle.clone());
        Ok(handle)
    }
}

impl<T: Clone> Default for MountSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
