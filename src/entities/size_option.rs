//! Size option entity - One size label and its price for a sized food item.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Size option database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "size_options")]
pub struct Model {
    /// Unique identifier for the size option
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the sized item this option belongs to
    pub sized_food_item_id: i64,
    /// Size label (e.g., "Small", "Medium", "Large")
    pub label: String,
    /// Unit price for this size in dollars
    pub price: f64,
}

/// Defines relationships between SizeOption and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each size option belongs to one sized item
    #[sea_orm(
        belongs_to = "super::sized_food_item::Entity",
        from = "Column::SizedFoodItemId",
        to = "super::sized_food_item::Column::Id"
    )]
    SizedFoodItem,
}

impl Related<super::sized_food_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SizedFoodItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
