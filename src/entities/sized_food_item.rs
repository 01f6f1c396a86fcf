//! Sized food item entity - A menu entry sold in several sizes.
//!
//! The row only holds the base name; prices live in `size_options`. Selecting a
//! size produces an unsaved item, so sized items never appear on order lines.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sized food item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sized_food_items")]
pub struct Model {
    /// Unique identifier for the sized item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Base name without the size label (e.g., "Pepperoni")
    pub base_name: String,
    /// Description shared by every size
    pub description: String,
    /// ID of the category this item is listed under
    pub category_id: i64,
}

/// Defines relationships between SizedFoodItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each sized item belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// One sized item has many size options
    #[sea_orm(has_many = "super::size_option::Entity")]
    SizeOptions,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::size_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SizeOptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
