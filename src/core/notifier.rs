//! Cart change notification.
//!
//! Listeners are called synchronously, in subscription order, on the thread that
//! mutated the cart. The first listener error stops the round and is returned to
//! the caller.

use crate::core::cart::CartSnapshot;
use crate::errors::{Error, Result};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{trace, warn};

/// Something interested in cart changes (typically the cart view).
pub trait CartListener: Send + Sync {
    /// Called after every cart mutation with a copy of the new contents.
    ///
    /// # Errors
    /// An error aborts the notification round; later listeners are not called.
    fn cart_updated(&self, snapshot: &CartSnapshot) -> Result<()>;
}

impl<F> CartListener for F
where
    F: Fn(&CartSnapshot) -> Result<()> + Send + Sync,
{
    fn cart_updated(&self, snapshot: &CartSnapshot) -> Result<()> {
        self(snapshot)
    }
}

/// Ordered registry of cart listeners.
///
/// Subscribing the same listener twice registers it twice, and it is then
/// notified twice per change.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Mutex<Vec<Arc<dyn CartListener>>>,
}

impl ChangeNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener at the end of the notification order.
    pub fn subscribe(&self, listener: Arc<dyn CartListener>) {
        self.lock().push(listener);
    }

    /// Removes the earliest registration of `listener`. Returns whether one was
    /// found.
    pub fn unsubscribe(&self, listener: &Arc<dyn CartListener>) -> bool {
        let mut listeners = self.lock();
        let position = listeners
            .iter()
            .position(|registered| Arc::ptr_eq(registered, listener));
        position.map(|index| listeners.remove(index)).is_some()
    }

    /// Number of registrations, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Calls every listener in subscription order.
    ///
    /// The registry lock is released before any listener runs, so a listener
    /// may subscribe, unsubscribe, or read the cart without deadlocking.
    ///
    /// # Errors
    /// Returns `Error::Listener` (or the listener's own error) from the first
    /// listener that fails.
    pub fn notify(&self, snapshot: &CartSnapshot) -> Result<()> {
        let listeners: Vec<Arc<dyn CartListener>> = self.lock().clone();
        trace!("Notifying {} cart listeners", listeners.len());

        for (index, listener) in listeners.iter().enumerate() {
            listener.cart_updated(snapshot).inspect_err(|e| {
                warn!(
                    "Cart listener {index} failed, skipping {} remaining: {e}",
                    listeners.len() - index - 1
                );
            })?;
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Arc<dyn CartListener>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.len())
            .finish()
    }
}

/// Builds a listener failure from any displayable cause.
pub fn listener_error(message: impl std::fmt::Display) -> Error {
    Error::Listener {
        message: message.to_string(),
    }
}
