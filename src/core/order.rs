//! Order commit - persists a cart snapshot as one order.
//!
//! [`OrderCommitter::commit`] writes the order header and every line inside a
//! single transaction. Any failure rolls the whole transaction back, so an order
//! header never exists without all of its lines. The committer never touches the
//! cart; clearing it after a successful commit is the caller's job.

use crate::{
    core::{cart::CartSnapshot, catalog::ItemIdentity},
    entities::{Order, OrderLine, order, order_line},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{
    DatabaseTransaction, QueryOrder, Set, TransactionTrait, prelude::*,
};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, error, info, instrument, warn};

/// Where the most recent commit attempt got to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPhase {
    /// No commit attempted yet
    #[default]
    Idle,
    /// Checking the cart and customer details
    Validating,
    /// Transaction open, rows being written
    Persisting,
    /// Transaction committed
    Committed,
    /// Rejected or rolled back
    Failed,
}

/// Name and delivery address entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    name: String,
    address: String,
}

impl CustomerDetails {
    /// Builds trimmed customer details.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the name or address is blank.
    pub fn new(name: &str, address: &str) -> Result<Self> {
        let name = name.trim();
        let address = address.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput {
                message: "Customer name cannot be empty".to_string(),
            });
        }
        if address.is_empty() {
            return Err(Error::InvalidInput {
                message: "Delivery address cannot be empty".to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            address: address.to_string(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Summary of a committed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    /// Store-assigned order id
    pub order_id: i64,
    /// Order total in dollars
    pub total: f64,
    /// Number of distinct lines written
    pub line_count: usize,
    /// Commit timestamp
    pub placed_at: DateTime<Utc>,
}

/// Writes orders to the store, one transaction per order.
#[derive(Debug)]
pub struct OrderCommitter {
    db: DatabaseConnection,
    phase: Mutex<CommitPhase>,
}

impl OrderCommitter {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            phase: Mutex::new(CommitPhase::Idle),
        }
    }

    /// Phase reached by the most recent commit attempt.
    #[must_use]
    pub fn phase(&self) -> CommitPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Gives the connection back, e.g. to inspect a mock transaction log.
    #[must_use]
    pub fn into_connection(self) -> DatabaseConnection {
        self.db
    }

    /// Persists `snapshot` as a new order for `customer`.
    ///
    /// Line prices come from the snapshot, never from the current menu.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The snapshot is empty (`Error::EmptyCart`, the store is not contacted)
    /// - The transaction cannot be opened (`Error::ResourceUnavailable`)
    /// - The header, a line, or the commit fails (`Error::PersistenceFailure`,
    ///   after the transaction has been rolled back)
    #[instrument(skip(self, snapshot, customer), fields(lines = snapshot.len()))]
    pub async fn commit(
        &self,
        snapshot: &CartSnapshot,
        customer: &CustomerDetails,
    ) -> Result<OrderReceipt> {
        self.set_phase(CommitPhase::Validating);
        if snapshot.is_empty() {
            warn!("Refusing to commit an empty cart");
            self.set_phase(CommitPhase::Failed);
            return Err(Error::EmptyCart);
        }

        debug!("Starting order commit for {}", customer.name());
        let txn = match self.db.begin().await {
            Ok(txn) => txn,
            Err(e) => {
                error!("Could not open order transaction: {e}");
                self.set_phase(CommitPhase::Failed);
                return Err(Error::ResourceUnavailable {
                    message: format!("Failed to begin transaction: {e}"),
                });
            }
        };
        self.set_phase(CommitPhase::Persisting);

        let receipt = match write_order(&txn, snapshot, customer).await {
            Ok(receipt) => receipt,
            Err(e) => {
                error!("Order persistence failed: {e}");
                warn!("Rolling back order transaction");
                if let Err(rollback_error) = txn.rollback().await {
                    error!("Rollback failed after persistence failure: {rollback_error}");
                }
                self.set_phase(CommitPhase::Failed);
                return Err(e);
            }
        };

        if let Err(e) = txn.commit().await {
            error!("Order transaction commit failed: {e}");
            self.set_phase(CommitPhase::Failed);
            return Err(persistence_failure("transaction commit", &e));
        }

        self.set_phase(CommitPhase::Committed);
        info!(
            "Order {} committed: {} lines, total ${:.2}",
            receipt.order_id, receipt.line_count, receipt.total
        );
        Ok(receipt)
    }

    fn set_phase(&self, phase: CommitPhase) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = phase;
    }
}

async fn write_order(
    txn: &DatabaseTransaction,
    snapshot: &CartSnapshot,
    customer: &CustomerDetails,
) -> Result<OrderReceipt> {
    let placed_at = Utc::now();
    let total = snapshot.total();

    let header = order::ActiveModel {
        customer_name: Set(customer.name().to_string()),
        customer_address: Set(customer.address().to_string()),
        placed_at: Set(placed_at),
        total_amount: Set(total),
        ..Default::default()
    };
    let order_id = Order::insert(header)
        .exec(txn)
        .await
        .map_err(|e| persistence_failure("order header insert", &e))?
        .last_insert_id;
    if order_id <= 0 {
        return Err(Error::PersistenceFailure {
            message: "order header insert returned no generated id".to_string(),
        });
    }
    info!("Order header {order_id} inserted");

    for (index, line) in snapshot.lines().iter().enumerate() {
        let quantity = i32::try_from(line.quantity).map_err(|_| Error::PersistenceFailure {
            message: format!("quantity {} of '{}' is too large", line.quantity, line.item.name()),
        })?;
        let food_item_id = match line.item.identity() {
            ItemIdentity::Catalog(id) => Some(id),
            ItemIdentity::Unsaved(_) => None,
        };

        let row = order_line::ActiveModel {
            order_id: Set(order_id),
            food_item_id: Set(food_item_id),
            item_name: Set(line.item.name().to_string()),
            quantity: Set(quantity),
            price_per_item: Set(line.item.price()),
            ..Default::default()
        };
        OrderLine::insert(row)
            .exec(txn)
            .await
            .map_err(|e| persistence_failure(&format!("line {} insert", index + 1), &e))?;
    }

    Ok(OrderReceipt {
        order_id,
        total,
        line_count: snapshot.len(),
        placed_at,
    })
}

fn persistence_failure(stage: &str, cause: &DbErr) -> Error {
    Error::PersistenceFailure {
        message: format!("{stage} failed: {cause}"),
    }
}

/// Retrieves a placed order header by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_order_by_id(db: &DatabaseConnection, order_id: i64) -> Result<Option<order::Model>> {
    Order::find_by_id(order_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the lines of an order in the order they were written.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_lines_for_order(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<order_line::Model>> {
    OrderLine::find()
        .filter(order_line::Column::OrderId.eq(order_id))
        .order_by_asc(order_line::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::cart::Cart;
    use crate::core::catalog::SimpleItem;
    use crate::core::menu;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn customer() -> CustomerDetails {
        CustomerDetails::new("Ada", "12 Analytical Row").unwrap()
    }

    fn exec_ok(last_insert_id: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id,
            rows_affected: 1,
        }
    }

    #[test]
    fn test_customer_details_rejects_blank_fields() {
        assert!(matches!(
            CustomerDetails::new("  ", "Somewhere"),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            CustomerDetails::new("Ada", ""),
            Err(Error::InvalidInput { .. })
        ));
        let details = CustomerDetails::new(" Ada ", " 1 Main St ").unwrap();
        assert_eq!(details.name(), "Ada");
        assert_eq!(details.address(), "1 Main St");
    }

    #[tokio::test]
    async fn test_empty_cart_never_touches_store() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let committer = OrderCommitter::new(db);

        let result = committer
            .commit(&CartSnapshot::default(), &customer())
            .await;
        assert!(matches!(result, Err(Error::EmptyCart)));
        assert_eq!(committer.phase(), CommitPhase::Failed);

        let log = committer.into_connection().into_transaction_log();
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_commit_persists_header_and_lines() -> Result<()> {
        let (db, category) = setup_with_category("Pizzas").await?;
        let margherita = create_test_item(&db, category.id, "Margherita", 9.5).await?;
        let margherita = menu::get_item_by_id(&db, margherita.id).await?.unwrap();
        let large = SimpleItem::unsaved("Pepperoni (Large)", 12.0, "Spicy (Large size)", "Pizzas");

        let cart = Cart::new();
        cart.add(margherita.clone())?;
        cart.add(margherita)?;
        cart.add(large)?;

        let committer = OrderCommitter::new(db);
        assert_eq!(committer.phase(), CommitPhase::Idle);
        let receipt = committer.commit(&cart.snapshot(), &customer()).await?;
        assert_eq!(committer.phase(), CommitPhase::Committed);
        assert_eq!(receipt.total, 31.0);
        assert_eq!(receipt.line_count, 2);

        let db = committer.connection();
        let order = get_order_by_id(db, receipt.order_id).await?.unwrap();
        assert_eq!(order.customer_name, "Ada");
        assert_eq!(order.total_amount, 31.0);

        let lines = get_lines_for_order(db, receipt.order_id).await?;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].price_per_item, 9.5);
        assert!(lines[0].food_item_id.is_some());
        assert_eq!(lines[1].item_name, "Pepperoni (Large)");
        assert_eq!(lines[1].food_item_id, None);

        // Committing does not empty the cart
        assert_eq!(cart.snapshot().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_line_insert_rolls_back_everything() -> Result<()> {
        let (db, category) = setup_with_category("Burgers").await?;
        let classic = create_test_item(&db, category.id, "Classic", 8.0).await?;
        let cheese = create_test_item(&db, category.id, "Cheese", 9.0).await?;

        // Line 2 references a menu row that does not exist
        let cart = Cart::new();
        cart.add(SimpleItem::new(classic.id, "Classic", 8.0, "", "Burgers", category.id))?;
        cart.add(SimpleItem::new(999, "Ghost", 1.0, "", "Burgers", category.id))?;
        cart.add(SimpleItem::new(cheese.id, "Cheese", 9.0, "", "Burgers", category.id))?;
        let before = cart.snapshot();

        let committer = OrderCommitter::new(db);
        let result = committer.commit(&before, &customer()).await;
        assert!(matches!(result, Err(Error::PersistenceFailure { .. })));
        assert_eq!(committer.phase(), CommitPhase::Failed);

        let db = committer.connection();
        assert!(Order::find().all(db).await?.is_empty());
        assert!(OrderLine::find().all(db).await?.is_empty());
        assert_eq!(cart.snapshot(), before);
        Ok(())
    }

    #[tokio::test]
    async fn test_commit_uses_price_stored_in_cart() -> Result<()> {
        let (db, category) = setup_with_category("Desserts").await?;
        let brownie = create_test_item(&db, category.id, "Brownie", 3.0).await?;
        let item = menu::get_item_by_id(&db, brownie.id).await?.unwrap();

        let cart = Cart::new();
        cart.add(item)?;

        // Menu price changes after the item went into the cart
        let mut active: crate::entities::food_item::ActiveModel = brownie.into();
        active.price = Set(4.5);
        active.update(&db).await?;

        let committer = OrderCommitter::new(db);
        let receipt = committer.commit(&cart.snapshot(), &customer()).await?;
        let lines = get_lines_for_order(committer.connection(), receipt.order_id).await?;
        assert_eq!(lines[0].price_per_item, 3.0);
        assert_eq!(receipt.total, 3.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_mock_store_failure_on_second_line() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([exec_ok(7), exec_ok(1)])
            .append_exec_errors([DbErr::Custom("disk I/O error".to_string())])
            .into_connection();

        let cart = Cart::new();
        cart.add(SimpleItem::new(1, "Fries", 2.5, "", "Fries", 1)).unwrap();
        cart.add(SimpleItem::new(2, "Cola", 1.75, "", "Cold Drinks", 2)).unwrap();
        cart.add(SimpleItem::new(3, "Wrap", 6.0, "", "Wraps & Rolls", 3)).unwrap();

        let committer = OrderCommitter::new(db);
        let result = committer.commit(&cart.snapshot(), &customer()).await;
        match result {
            Err(Error::PersistenceFailure { message }) => {
                assert!(message.contains("line 2"), "unexpected message: {message}");
            }
            other => panic!("expected persistence failure, got {other:?}"),
        }
        assert_eq!(committer.phase(), CommitPhase::Failed);
        assert_eq!(cart.snapshot().len(), 3);
    }

    #[tokio::test]
    async fn test_mock_missing_generated_id_fails() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let cart = Cart::new();
        cart.add(SimpleItem::new(1, "Fries", 2.5, "", "Fries", 1)).unwrap();

        let committer = OrderCommitter::new(db);
        let result = committer.commit(&cart.snapshot(), &customer()).await;
        assert!(matches!(result, Err(Error::PersistenceFailure { .. })));
        assert_eq!(committer.phase(), CommitPhase::Failed);
    }

    #[tokio::test]
    async fn test_mock_zero_rows_affected_fails() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([MockExecResult {
                last_insert_id: 5,
                rows_affected: 0,
            }])
            .into_connection();

        let cart = Cart::new();
        cart.add(SimpleItem::new(1, "Fries", 2.5, "", "Fries", 1)).unwrap();

        let committer = OrderCommitter::new(db);
        let result = committer.commit(&cart.snapshot(), &customer()).await;
        assert!(matches!(result, Err(Error::PersistenceFailure { .. })));
    }
}
