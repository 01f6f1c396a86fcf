//! Session wiring - the single cart, committer and catalog shared by every
//! consumer of one ordering session.

use crate::{
    core::{
        cart::Cart,
        catalog::{CatalogItem, CategoryGroup, SimpleItem},
        menu,
        order::OrderCommitter,
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::info;

/// Shared state for one ordering session.
///
/// Holds the only cart of the session. Consumers get it through
/// [`SessionContext::cart`] rather than any global.
#[derive(Debug)]
pub struct SessionContext {
    cart: Arc<Cart>,
    committer: OrderCommitter,
    catalog: CategoryGroup,
    items: Vec<SimpleItem>,
}

impl SessionContext {
    /// Builds a session around an already loaded catalog.
    ///
    /// Purchasable items are resolved once here, so repeated selections of the
    /// same size variant land on the same cart line.
    #[must_use]
    pub fn new(database: DatabaseConnection, catalog: CategoryGroup) -> Self {
        let items = catalog
            .children()
            .iter()
            .flat_map(CatalogItem::flatten)
            .collect();
        Self {
            cart: Arc::new(Cart::new()),
            committer: OrderCommitter::new(database),
            catalog,
            items,
        }
    }

    /// Loads the catalog from the database and builds a session around it.
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be read.
    pub async fn open(database: DatabaseConnection) -> Result<Self> {
        let catalog = menu::load_catalog(&database).await?;
        let session = Self::new(database, catalog);
        info!(
            "Session opened with {} purchasable items",
            session.items.len()
        );
        Ok(session)
    }

    #[must_use]
    pub fn cart(&self) -> Arc<Cart> {
        Arc::clone(&self.cart)
    }

    #[must_use]
    pub const fn committer(&self) -> &OrderCommitter {
        &self.committer
    }

    #[must_use]
    pub const fn database(&self) -> &DatabaseConnection {
        self.committer.connection()
    }

    #[must_use]
    pub const fn catalog(&self) -> &CategoryGroup {
        &self.catalog
    }

    /// Every purchasable unit in menu order.
    #[must_use]
    pub fn items(&self) -> &[SimpleItem] {
        &self.items
    }

    /// Looks up a purchasable unit by its 1-based menu number.
    #[must_use]
    pub fn item_by_number(&self, number: usize) -> Option<&SimpleItem> {
        number.checked_sub(1).and_then(|index| self.items.get(index))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_open_resolves_items_once() -> Result<()> {
        let db = setup_with_sample_menu().await?;
        let session = SessionContext::open(db).await?;

        assert!(!session.items().is_empty());
        assert!(session.item_by_number(0).is_none());
        assert!(session.item_by_number(session.items().len() + 1).is_none());

        let large = session
            .items()
            .iter()
            .position(|item| item.name() == "Pepperoni (Large)")
            .unwrap();
        let first = session.item_by_number(large + 1).unwrap().clone();
        let second = session.item_by_number(large + 1).unwrap().clone();

        let cart = session.cart();
        cart.add(first)?;
        cart.add(second)?;
        assert_eq!(cart.snapshot().len(), 1);
        assert_eq!(cart.snapshot().item_count(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_cart_handle_is_shared() -> Result<()> {
        let db = setup_test_db().await?;
        let session = SessionContext::new(db, CategoryGroup::new("Menu", 0));

        session
            .cart()
            .add(SimpleItem::unsaved("Tea", 1.0, "", "Cold Drinks"))?;
        assert_eq!(session.cart().snapshot().len(), 1);
        Ok(())
    }
}
