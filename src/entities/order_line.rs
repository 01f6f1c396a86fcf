//! Order line entity - One cart entry captured at commit time.
//!
//! `price_per_item` is copied from the cart, so later menu price changes never
//! alter a placed order. `food_item_id` is `None` for sized selections, which
//! have no menu row of their own.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_lines")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the order header this line belongs to
    pub order_id: i64,
    /// ID of the menu item, `None` for sized selections
    pub food_item_id: Option<i64>,
    /// Resolved item name at sale time (e.g., "Pepperoni (Large)")
    pub item_name: String,
    /// Number of units ordered
    pub quantity: i32,
    /// Unit price at sale time in dollars
    pub price_per_item: f64,
}

/// Defines relationships between OrderLine and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    /// Each line optionally references one food item
    #[sea_orm(
        belongs_to = "super::food_item::Entity",
        from = "Column::FoodItemId",
        to = "super::food_item::Column::Id"
    )]
    FoodItem,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::food_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoodItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
