//! Category entity - Groups food items on the menu (e.g., "Pizzas", "Desserts").
//!
//! The category name also selects the packaging message shown when one of its
//! items is added to the cart.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, unique across the menu
    #[sea_orm(unique)]
    pub name: String,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category has many fixed-price food items
    #[sea_orm(has_many = "super::food_item::Entity")]
    FoodItems,
    /// One category has many sized food items
    #[sea_orm(has_many = "super::sized_food_item::Entity")]
    SizedFoodItems,
}

impl Related<super::food_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoodItems.def()
    }
}

impl Related<super::sized_food_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SizedFoodItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
