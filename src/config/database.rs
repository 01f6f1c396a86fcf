//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs, foreign keys included.

use crate::entities::{Category, FoodItem, Order, OrderLine, SizeOption, SizedFoodItem};
use crate::errors::{Error, Result};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

/// Fallback used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://food_ordering.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the order store at `database_url`.
///
/// # Errors
/// Returns `Error::ResourceUnavailable` if the store cannot be opened.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to order store at {database_url}");
    Database::connect(database_url)
        .await
        .map_err(|e| Error::ResourceUnavailable {
            message: format!("Failed to open database at {database_url}: {e}"),
        })
}

/// Creates every menu and order table, parents before children.
///
/// # Errors
/// Returns an error if any `CREATE TABLE` statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(FoodItem),
        schema.create_table_from_entity(SizedFoodItem),
        schema.create_table_from_entity(SizeOption),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderLine),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    info!("Ensured {} tables exist", statements.len());
    Ok(())
}
