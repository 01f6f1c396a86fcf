//! Packaging messages shown when an item is added to the cart.
//!
//! [`PackagingResolver`] is a two-step builder: bind a resolved item, then
//! resolve. The result is a [`PackagedItem`], a plain pair of the item and its
//! [`PackagingAnnotation`]. The annotation is recomputed from the item's
//! category and name each time and never stored on the item.

use crate::core::catalog::SimpleItem;
use crate::errors::{Error, Result};
use std::fmt;

/// Transient, category-derived text describing how an item is packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagingAnnotation(String);

impl PackagingAnnotation {
    /// Builds the annotation for an item in `category_name` named `item_name`.
    #[must_use]
    pub fn for_category(category_name: &str, item_name: &str) -> Self {
        Self(wrapper_message(category_name, item_name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackagingAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved item together with the packaging text to show when it is added.
#[derive(Debug, Clone, PartialEq)]
pub struct PackagedItem {
    item: SimpleItem,
    annotation: PackagingAnnotation,
}

impl PackagedItem {
    #[must_use]
    pub const fn item(&self) -> &SimpleItem {
        &self.item
    }

    #[must_use]
    pub const fn annotation(&self) -> &PackagingAnnotation {
        &self.annotation
    }

    #[must_use]
    pub fn into_parts(self) -> (SimpleItem, PackagingAnnotation) {
        (self.item, self.annotation)
    }
}

/// Builder that decorates a resolved item with its packaging annotation.
#[derive(Debug, Clone, Default)]
pub struct PackagingResolver {
    item: Option<SimpleItem>,
}

impl PackagingResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the item to decorate. Must be called before [`Self::resolve`] or
    /// [`Self::build`].
    #[must_use]
    pub fn with_item(mut self, item: SimpleItem) -> Self {
        self.item = Some(item);
        self
    }

    /// Computes the annotation for the bound item.
    ///
    /// # Errors
    /// Returns `Error::InvalidState` if no item has been bound.
    pub fn resolve(&self) -> Result<PackagingAnnotation> {
        let item = self.bound_item()?;
        Ok(PackagingAnnotation::for_category(
            item.category_name(),
            item.name(),
        ))
    }

    /// Consumes the builder, producing the decorated item.
    ///
    /// # Errors
    /// Returns `Error::InvalidState` if no item has been bound.
    pub fn build(self) -> Result<PackagedItem> {
        let annotation = self.resolve()?;
        let item = self.item.ok_or_else(unbound)?;
        Ok(PackagedItem { item, annotation })
    }

    fn bound_item(&self) -> Result<&SimpleItem> {
        self.item.as_ref().ok_or_else(unbound)
    }
}

fn unbound() -> Error {
    Error::InvalidState {
        message: "an item must be bound with with_item() before resolving packaging".to_string(),
    }
}

/// Packaging text for an item, chosen by category name. Unknown categories get
/// a generic message.
#[must_use]
pub fn wrapper_message(category_name: &str, item_name: &str) -> String {
    match category_name {
        "Burgers" => format!("Your delicious {item_name} is securely nestled in a sturdy box!"),
        "Cold Drinks" => format!("Refreshing {item_name} is perfectly bottled and chilled!"),
        "Desserts" => format!(
            "A sweet {item_name} has been delicately placed in a charming dessert container!"
        ),
        "Fried Chicken" => {
            format!("Your crispy {item_name} feast is hot and ready in a specialized bucket!")
        }
        "Fries" => format!("Golden {item_name} are crisply bagged for your enjoyment!"),
        "Noodles" => {
            format!("Steaming {item_name} are carefully sealed in a convenient takeout bowl!")
        }
        "Pizzas" => format!("Your freshly baked {item_name} is snug in its signature delivery box!"),
        "Salads" => format!("The vibrant {item_name} is packed in a clear, eco-friendly container!"),
        "Sandwiches" => format!("Your gourmet {item_name} is neatly wrapped and ready for a bite!"),
        "Wraps & Rolls" => {
            format!("The flavorful {item_name} is tightly rolled and secured for delivery!")
        }
        _ => format!("{item_name} has been thoughtfully packaged for your order!"),
    }
}
