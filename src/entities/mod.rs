//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the menu tables and the order tables.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod food_item;
pub mod order;
pub mod order_line;
pub mod size_option;
pub mod sized_food_item;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use food_item::{Column as FoodItemColumn, Entity as FoodItem, Model as FoodItemModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_line::{Column as OrderLineColumn, Entity as OrderLine, Model as OrderLineModel};
pub use size_option::{Column as SizeOptionColumn, Entity as SizeOption, Model as SizeOptionModel};
pub use sized_food_item::{
    Column as SizedFoodItemColumn, Entity as SizedFoodItem, Model as SizedFoodItemModel,
};
