//! Food item entity - A fixed-price, purchasable menu entry.
//!
//! These rows back every cart key with a non-zero id. Order lines reference them
//! so a placed order can be traced back to the menu.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Food item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "food_items")]
pub struct Model {
    /// Unique identifier for the food item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name shown on the menu (e.g., "Margherita")
    pub name: String,
    /// Current unit price in dollars
    pub price: f64,
    /// Short description shown under the name
    pub description: String,
    /// ID of the category this item is listed under
    pub category_id: i64,
}

/// Defines relationships between FoodItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each food item belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// One food item appears on many order lines
    #[sea_orm(has_many = "super::order_line::Entity")]
    OrderLines,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
