//! Shopping cart - the single mutable aggregate of a session.
//!
//! The cart maps resolved items to positive quantities, keeping lines in the
//! order they were first added. Keys follow [`SimpleItem`] equality: items with
//! the same catalog id share a line, and the fields stored with the first add
//! are kept (a later add with different fields only bumps the quantity, and the
//! stored price is what an order commits).
//!
//! Contents are never handed out by reference. Every read returns a
//! [`CartSnapshot`], an independent copy taken under the cart's lock. Listeners
//! run after that lock is released.

use crate::core::catalog::SimpleItem;
use crate::core::notifier::{CartListener, ChangeNotifier};
use crate::core::packaging::{PackagedItem, PackagingAnnotation};
use crate::errors::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// One cart entry: a resolved item and how many of it.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// The item as stored on first add
    pub item: SimpleItem,
    /// Always at least 1
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.item.price() * f64::from(self.quantity)
    }
}

/// Point-in-time copy of the cart contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    lines: Vec<CartLine>,
}

impl CartSnapshot {
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Quantity held for `item`, 0 when absent.
    #[must_use]
    pub fn quantity_of(&self, item: &SimpleItem) -> u32 {
        self.lines
            .iter()
            .find(|line| line.item == *item)
            .map_or(0, |line| line.quantity)
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of unit price times quantity; 0.0 for an empty cart.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Display rows, e.g. `2 x Margherita @ $9.50 = $19.00`.
    #[must_use]
    pub fn display_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| {
                format!(
                    "{} x {} @ ${:.2} = ${:.2}",
                    line.quantity,
                    line.item.name(),
                    line.item.price(),
                    line.subtotal()
                )
            })
            .collect()
    }
}

/// What can be put in the cart: a bare item or one decorated with packaging.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAddition {
    /// No packaging annotation; the generic notice is shown
    Plain(SimpleItem),
    /// Shows the item's packaging annotation
    Packaged(PackagedItem),
}

impl From<SimpleItem> for CartAddition {
    fn from(item: SimpleItem) -> Self {
        Self::Plain(item)
    }
}

impl From<PackagedItem> for CartAddition {
    fn from(item: PackagedItem) -> Self {
        Self::Packaged(item)
    }
}

/// Result of a successful add, carrying the notice to show the user.
#[derive(Debug, Clone, PartialEq)]
pub struct AddOutcome {
    /// Name of the added item
    pub item_name: String,
    /// Quantity held after the add
    pub quantity: u32,
    /// Packaging text, present when the item was added packaged
    pub annotation: Option<PackagingAnnotation>,
}

impl AddOutcome {
    /// Whether the packaging annotation should be shown.
    #[must_use]
    pub const fn shows_annotation(&self) -> bool {
        self.annotation.is_some()
    }

    /// The notice text: the packaging annotation, or "<name> added to cart!".
    #[must_use]
    pub fn message(&self) -> String {
        self.annotation.as_ref().map_or_else(
            || format!("{} added to cart!", self.item_name),
            ToString::to_string,
        )
    }
}

/// The session's shopping cart.
///
/// Construct one per session and share it (`Arc<Cart>`) with every consumer.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Mutex<Vec<CartLine>>,
    notifier: ChangeNotifier,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener notified after every mutation.
    pub fn subscribe(&self, listener: Arc<dyn CartListener>) {
        self.notifier.subscribe(listener);
    }

    /// Removes the earliest registration of `listener`.
    pub fn unsubscribe(&self, listener: &Arc<dyn CartListener>) -> bool {
        self.notifier.unsubscribe(listener)
    }

    /// Adds one unit of the item, creating its line at quantity 1 if absent.
    ///
    /// The mutation always happens. Listeners are then notified.
    ///
    /// # Errors
    /// Returns the error of the first failing listener. The item has already
    /// been added when this happens.
    pub fn add(&self, addition: impl Into<CartAddition>) -> Result<AddOutcome> {
        let (item, annotation) = match addition.into() {
            CartAddition::Plain(item) => (item, None),
            CartAddition::Packaged(packaged) => {
                let (item, annotation) = packaged.into_parts();
                (item, Some(annotation))
            }
        };

        let (quantity, snapshot) = {
            let mut lines = self.lock();
            let quantity = if let Some(line) = lines.iter_mut().find(|line| line.item == item) {
                line.quantity = line.quantity.saturating_add(1);
                line.quantity
            } else {
                lines.push(CartLine {
                    item: item.clone(),
                    quantity: 1,
                });
                1
            };
            (quantity, snapshot_of(&lines))
        };

        debug!("Added {} to cart (quantity now {quantity})", item.name());
        self.notifier.notify(&snapshot)?;

        Ok(AddOutcome {
            item_name: item.name().to_string(),
            quantity,
            annotation,
        })
    }

    /// Removes one unit of the item; the line disappears when it reaches 0.
    ///
    /// Absent items are a no-op and notify nobody. Returns whether the cart
    /// changed.
    ///
    /// # Errors
    /// Returns the error of the first failing listener.
    pub fn remove(&self, item: &SimpleItem) -> Result<bool> {
        let snapshot = {
            let mut lines = self.lock();
            let Some(index) = lines.iter().position(|line| line.item == *item) else {
                return Ok(false);
            };

            if let Some(line) = lines.get_mut(index).filter(|line| line.quantity > 1) {
                line.quantity -= 1;
            } else {
                lines.remove(index);
            }
            snapshot_of(&lines)
        };

        debug!("Removed one {} from cart", item.name());
        self.notifier.notify(&snapshot)?;
        Ok(true)
    }

    /// Empties the cart. Listeners are notified even if it was already empty.
    ///
    /// # Errors
    /// Returns the error of the first failing listener.
    pub fn clear(&self) -> Result<()> {
        let snapshot = {
            let mut lines = self.lock();
            lines.clear();
            snapshot_of(&lines)
        };

        debug!("Cart cleared");
        self.notifier.notify(&snapshot)
    }

    /// Independent copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        snapshot_of(&self.lock())
    }

    /// Sum of unit price times quantity over the current contents.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.snapshot().total()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CartLine>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn snapshot_of(lines: &[CartLine]) -> CartSnapshot {
    CartSnapshot {
        lines: lines.to_vec(),
    }
}
