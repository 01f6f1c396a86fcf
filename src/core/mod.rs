//! Core business logic - framework-agnostic ordering operations.
//!
//! Nothing here knows about the console front end. The cart and catalog are
//! plain in-memory types; `menu` and `order` talk to the database.

pub mod cart;
pub mod catalog;
pub mod menu;
pub mod notifier;
pub mod order;
pub mod packaging;

pub use cart::{AddOutcome, Cart, CartAddition, CartLine, CartSnapshot};
pub use catalog::{CatalogItem, CategoryGroup, ItemIdentity, MultiVariantItem, SimpleItem};
pub use notifier::{CartListener, ChangeNotifier};
pub use order::{CommitPhase, CustomerDetails, OrderCommitter, OrderReceipt};
pub use packaging::{PackagedItem, PackagingAnnotation, PackagingResolver};
