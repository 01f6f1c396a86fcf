//! Menu configuration loading from menu.toml
//!
//! The menu file seeds the category, food item, and sized item tables on first
//! run. Seeding itself lives in [`crate::core::menu::seed_menu`]; this module only
//! reads and parses the file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Fallback used when `MENU_CONFIG` is not set.
pub const DEFAULT_MENU_PATH: &str = "menu.toml";

/// Configuration structure representing the entire menu.toml file
#[derive(Debug, Deserialize, Clone, Default)]
pub struct MenuConfig {
    /// Categories in the order they should be created
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

/// One menu category and the items listed under it
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Category name, also used to pick the packaging message
    pub name: String,
    /// Fixed-price items
    #[serde(default)]
    pub items: Vec<ItemConfig>,
    /// Items sold in several sizes
    #[serde(default)]
    pub sized_items: Vec<SizedItemConfig>,
}

/// A fixed-price menu item
#[derive(Debug, Deserialize, Clone)]
pub struct ItemConfig {
    /// Item name
    pub name: String,
    /// Unit price in dollars
    pub price: f64,
    /// Short description
    #[serde(default)]
    pub description: String,
}

/// A menu item with a price per size
#[derive(Debug, Deserialize, Clone)]
pub struct SizedItemConfig {
    /// Base name without the size label
    pub name: String,
    /// Description shared by every size
    #[serde(default)]
    pub description: String,
    /// Size label to unit price (e.g., `Small = 5.0`)
    pub sizes: BTreeMap<String, f64>,
}

/// Loads the menu configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_menu_config<P: AsRef<Path>>(path: P) -> Result<MenuConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load menu configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read menu file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse menu file {}: {e}", path_ref.display()),
    })
}

/// Loads the menu from `MENU_CONFIG`, falling back to `./menu.toml`
///
/// # Errors
/// Same as [`load_menu_config`].
pub fn load_default_menu_config() -> Result<MenuConfig> {
    let path = std::env::var("MENU_CONFIG").unwrap_or_else(|_| DEFAULT_MENU_PATH.to_string());
    load_menu_config(path)
}
