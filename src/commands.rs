//! Command wrappers used by the front end.
//!
//! Each command binds its arguments up front and performs exactly one core call
//! when executed, so the console never reaches into cart or committer internals.

use crate::{
    core::{
        cart::{AddOutcome, Cart, CartAddition},
        order::{CustomerDetails, OrderCommitter, OrderReceipt},
    },
    errors::Result,
};
use tracing::{info, warn};

/// Adds one unit of a resolved item to a cart.
#[derive(Debug)]
pub struct AddToCart<'a> {
    addition: CartAddition,
    cart: &'a Cart,
}

impl<'a> AddToCart<'a> {
    #[must_use]
    pub fn new(addition: impl Into<CartAddition>, cart: &'a Cart) -> Self {
        Self {
            addition: addition.into(),
            cart,
        }
    }

    /// Performs the add.
    ///
    /// # Errors
    /// Returns `Error::Listener` if a cart listener fails; the item has been
    /// added regardless.
    pub fn execute(self) -> Result<AddOutcome> {
        self.cart.add(self.addition)
    }
}

/// Commits a cart as an order and empties the cart once the order is stored.
#[derive(Debug)]
pub struct PlaceOrder<'a> {
    cart: &'a Cart,
    committer: &'a OrderCommitter,
    customer_name: String,
    customer_address: String,
}

impl<'a> PlaceOrder<'a> {
    #[must_use]
    pub fn new(
        cart: &'a Cart,
        committer: &'a OrderCommitter,
        customer_name: impl Into<String>,
        customer_address: impl Into<String>,
    ) -> Self {
        Self {
            cart,
            committer,
            customer_name: customer_name.into(),
            customer_address: customer_address.into(),
        }
    }

    /// Commits the current cart contents.
    ///
    /// On failure the cart is left exactly as it was, so the same order can be
    /// retried. A listener failure while clearing the cart after a successful
    /// commit is logged and the receipt is still returned, since the order
    /// already exists.
    ///
    /// # Errors
    /// Returns an error if the customer details are blank, the cart is empty,
    /// or the order cannot be persisted.
    pub async fn execute(self) -> Result<OrderReceipt> {
        let customer = CustomerDetails::new(&self.customer_name, &self.customer_address)?;
        let snapshot = self.cart.snapshot();

        let receipt = self.committer.commit(&snapshot, &customer).await?;

        if let Err(e) = self.cart.clear() {
            warn!("Order {} placed but a cart listener failed: {e}", receipt.order_id);
        }
        info!("Order {} placed, cart cleared", receipt.order_id);
        Ok(receipt)
    }
}
