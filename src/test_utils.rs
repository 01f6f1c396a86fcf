//! Shared test utilities for the ordering crate.
//!
//! This module provides common helper functions for setting up test databases
//! and creating menu rows with sensible defaults.

use crate::{
    config::menu::{CategoryConfig, ItemConfig, MenuConfig, SizedItemConfig},
    core::menu,
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test category with the given name.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    menu::create_category(db, name).await
}

/// Creates a fixed-price test item.
///
/// # Defaults
/// * `description`: "Test item"
pub async fn create_test_item(
    db: &DatabaseConnection,
    category_id: i64,
    name: &str,
    price: f64,
) -> Result<entities::food_item::Model> {
    menu::create_food_item(db, category_id, name, price, "Test item").await
}

/// Sets up a database holding one category.
/// Returns (db, category) for common test scenarios.
pub async fn setup_with_category(
    name: &str,
) -> Result<(DatabaseConnection, entities::category::Model)> {
    let db = setup_test_db().await?;
    let category = create_test_category(&db, name).await?;
    Ok((db, category))
}

/// A small menu: "Pizzas" with Margherita and a sized Pepperoni, and
/// "Cold Drinks" with Cola.
#[must_use]
pub fn sample_menu_config() -> MenuConfig {
    MenuConfig {
        categories: vec![
            CategoryConfig {
                name: "Pizzas".to_string(),
                items: vec![ItemConfig {
                    name: "Margherita".to_string(),
                    price: 9.5,
                    description: "Tomato and mozzarella".to_string(),
                }],
                sized_items: vec![SizedItemConfig {
                    name: "Pepperoni".to_string(),
                    description: "Spicy salami".to_string(),
                    sizes: BTreeMap::from([
                        ("Small".to_string(), 8.0),
                        ("Medium".to_string(), 10.0),
                        ("Large".to_string(), 12.0),
                    ]),
                }],
            },
            CategoryConfig {
                name: "Cold Drinks".to_string(),
                items: vec![ItemConfig {
                    name: "Cola".to_string(),
                    price: 1.75,
                    description: "Chilled can".to_string(),
                }],
                sized_items: Vec::new(),
            },
        ],
    }
}

/// Sets up a database seeded with [`sample_menu_config`].
pub async fn setup_with_sample_menu() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    menu::seed_menu(&db, &sample_menu_config()).await?;
    Ok(db)
}
