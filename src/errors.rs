//! Unified error type for the ordering core.
//!
//! Every fallible operation in the crate returns [`Result`]. Variants are grouped
//! by who should react to them: protocol misuse (`InvalidState`), user-facing
//! conditions (`EmptyCart`, `InvalidInput`), and store failures
//! (`PersistenceFailure`, `ResourceUnavailable`, `Database`).

use thiserror::Error;

/// Errors produced by the catalog, cart, and order-commit subsystems.
#[derive(Debug, Error)]
pub enum Error {
    /// A component was used out of its required protocol order.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// What was attempted out of order
        message: String,
    },

    /// An order commit was attempted with no line items.
    #[error("Cannot place an order: the cart is empty")]
    EmptyCart,

    /// Writing the order header, a line, or the commit itself failed.
    /// The transaction has been rolled back when this is returned.
    #[error("Failed to persist order: {message}")]
    PersistenceFailure {
        /// Stage that failed and the underlying cause
        message: String,
    },

    /// The transactional store could not be reached or opened.
    #[error("Order store unavailable: {message}")]
    ResourceUnavailable {
        /// Underlying connection error
        message: String,
    },

    /// User-supplied input was rejected before reaching the store.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the rejected input
        message: String,
    },

    /// A price was negative or not finite.
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// The offending price
        price: f64,
    },

    /// No category with the given name exists.
    #[error("Category not found: {name}")]
    CategoryNotFound {
        /// Category name that was looked up
        name: String,
    },

    /// No order or food item with the given id exists.
    #[error("Item not found: {id}")]
    ItemNotFound {
        /// Id that was looked up
        id: i64,
    },

    /// A cart listener reported a failure; remaining listeners were skipped.
    #[error("Cart listener failed: {message}")]
    Listener {
        /// Failure reported by the listener
        message: String,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Raw database error outside of the order-commit protocol.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
