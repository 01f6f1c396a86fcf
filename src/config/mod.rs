/// Database connection and schema creation
pub mod database;

/// Menu seed loading from menu.toml
pub mod menu;
