//! Order entity - The header row of a placed order.
//!
//! Written together with its `order_lines` inside one transaction; an order
//! header never exists without its lines.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order header database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Store-assigned order identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name entered at checkout
    pub customer_name: String,
    /// Delivery address entered at checkout
    pub customer_address: String,
    /// When the order was committed
    pub placed_at: DateTimeUtc,
    /// Cart total at commit time in dollars
    pub total_amount: f64,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order has many lines
    #[sea_orm(has_many = "super::order_line::Entity")]
    OrderLines,
}

impl Related<super::order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
