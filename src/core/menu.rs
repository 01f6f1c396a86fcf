//! Menu business logic - the catalog source.
//!
//! Reads categories and items from the database and assembles them into the
//! [`CategoryGroup`] tree the cart works from. Also validates new menu rows and
//! seeds the menu from `menu.toml` on first run. Creation functions are generic
//! over [`ConnectionTrait`] so seeding can run them inside one transaction.

use crate::{
    config::menu::MenuConfig,
    core::catalog::{CategoryGroup, MultiVariantItem, SimpleItem},
    entities::{
        Category, FoodItem, SizeOption, SizedFoodItem, category, food_item, size_option,
        sized_food_item,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Name of the root node returned by [`load_catalog`].
pub const ROOT_MENU_NAME: &str = "Menu";

/// Counts of rows inserted by [`seed_menu`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// New categories
    pub categories_created: usize,
    /// New fixed-price items
    pub items_created: usize,
    /// New sized items
    pub sized_items_created: usize,
}

/// Retrieves all categories, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_categories<C>(db: &C) -> Result<Vec<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its exact name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_category_by_name<C>(db: &C, name: &str) -> Result<Option<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find()
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the fixed-price items of a category as purchasable items, in the
/// order they were created.
///
/// # Errors
/// Returns `Error::CategoryNotFound` if the category does not exist, or an
/// error if the database query fails.
pub async fn list_items_in_category<C>(db: &C, category_id: i64) -> Result<Vec<SimpleItem>>
where
    C: ConnectionTrait,
{
    let category = find_category(db, category_id).await?;

    let items = FoodItem::find()
        .filter(food_item::Column::CategoryId.eq(category_id))
        .order_by_asc(food_item::Column::Id)
        .all(db)
        .await?;

    Ok(items
        .iter()
        .map(|item| to_simple_item(item, &category.name))
        .collect())
}

/// Retrieves the sized items of a category with all their size prices.
///
/// # Errors
/// Returns `Error::CategoryNotFound` if the category does not exist, or an
/// error if the database query fails.
pub async fn list_sized_items_in_category<C>(
    db: &C,
    category_id: i64,
) -> Result<Vec<MultiVariantItem>>
where
    C: ConnectionTrait,
{
    let category = find_category(db, category_id).await?;

    let rows = SizedFoodItem::find()
        .filter(sized_food_item::Column::CategoryId.eq(category_id))
        .order_by_asc(sized_food_item::Column::Id)
        .find_with_related(SizeOption)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(item, options)| {
            let sizes: BTreeMap<String, f64> = options
                .into_iter()
                .map(|option| (option.label, option.price))
                .collect();
            MultiVariantItem::new(
                item.base_name,
                item.description,
                category.name.clone(),
                category_id,
                sizes,
            )
        })
        .collect())
}

/// Looks up a single purchasable item by its catalog id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_item_by_id<C>(db: &C, item_id: i64) -> Result<Option<SimpleItem>>
where
    C: ConnectionTrait,
{
    let row = FoodItem::find_by_id(item_id)
        .find_also_related(Category)
        .one(db)
        .await?;

    Ok(row.map(|(item, category)| {
        let category_name = category.map(|c| c.name).unwrap_or_default();
        to_simple_item(&item, &category_name)
    }))
}

/// Builds the whole menu tree: one [`CategoryGroup`] per category (alphabetical),
/// each holding its fixed-price items followed by its sized items.
///
/// # Errors
/// Returns an error if any database query fails.
#[instrument(skip(db))]
pub async fn load_catalog(db: &DatabaseConnection) -> Result<CategoryGroup> {
    let mut root = CategoryGroup::new(ROOT_MENU_NAME, 0);

    for category in list_categories(db).await? {
        let mut group = CategoryGroup::new(category.name.clone(), category.id);
        for item in list_items_in_category(db, category.id).await? {
            group.add(item);
        }
        for item in list_sized_items_in_category(db, category.id).await? {
            group.add(item);
        }
        debug!(
            "Loaded category '{}' with {} entries",
            group.name(),
            group.children().len()
        );
        root.add(group);
    }

    info!("Catalog loaded with {} categories", root.children().len());
    Ok(root)
}

/// Creates a category after validating its name.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The database insert fails (including a duplicate name)
pub async fn create_category<C>(db: &C, name: &str) -> Result<category::Model>
where
    C: ConnectionTrait,
{
    let name = validate_name(name, "Category name")?;

    category::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a fixed-price item in a category, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - The item name is empty or whitespace-only
/// - The price is negative or not finite (NaN, infinity)
/// - The database insert fails
pub async fn create_food_item<C>(
    db: &C,
    category_id: i64,
    name: &str,
    price: f64,
    description: &str,
) -> Result<food_item::Model>
where
    C: ConnectionTrait,
{
    let name = validate_name(name, "Item name")?;
    validate_price(price)?;

    food_item::ActiveModel {
        name: Set(name),
        price: Set(price),
        description: Set(description.trim().to_string()),
        category_id: Set(category_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a sized item and one size option per entry of `sizes`.
///
/// # Errors
/// Returns an error if:
/// - The base name or any size label is empty or whitespace-only
/// - `sizes` is empty
/// - Any price is negative or not finite
/// - A database insert fails
pub async fn create_sized_food_item<C>(
    db: &C,
    category_id: i64,
    base_name: &str,
    description: &str,
    sizes: &BTreeMap<String, f64>,
) -> Result<sized_food_item::Model>
where
    C: ConnectionTrait,
{
    let base_name = validate_name(base_name, "Item name")?;
    if sizes.is_empty() {
        return Err(Error::InvalidInput {
            message: format!("Sized item '{base_name}' needs at least one size"),
        });
    }
    for (label, price) in sizes {
        validate_name(label, "Size label")?;
        validate_price(*price)?;
    }

    let item = sized_food_item::ActiveModel {
        base_name: Set(base_name),
        description: Set(description.trim().to_string()),
        category_id: Set(category_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    for (label, price) in sizes {
        size_option::ActiveModel {
            sized_food_item_id: Set(item.id),
            label: Set(label.trim().to_string()),
            price: Set(*price),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(item)
}

/// Seeds categories and items from the menu configuration.
///
/// Categories are matched by name and items by name within their category;
/// anything already present is left untouched, so running this on every start
/// is safe. All inserts happen in one transaction.
///
/// # Errors
/// Returns an error if validation or any database operation fails; nothing is
/// inserted in that case.
#[instrument(skip(db, config))]
pub async fn seed_menu(db: &DatabaseConnection, config: &MenuConfig) -> Result<SeedSummary> {
    let txn = db.begin().await?;
    let mut summary = SeedSummary::default();

    for category_config in &config.categories {
        let category = if let Some(existing) = get_category_by_name(&txn, &category_config.name).await? {
            existing
        } else {
            summary.categories_created += 1;
            create_category(&txn, &category_config.name).await?
        };

        for item in &category_config.items {
            let exists = FoodItem::find()
                .filter(food_item::Column::CategoryId.eq(category.id))
                .filter(food_item::Column::Name.eq(item.name.trim()))
                .one(&txn)
                .await?
                .is_some();
            if !exists {
                create_food_item(&txn, category.id, &item.name, item.price, &item.description)
                    .await?;
                summary.items_created += 1;
            }
        }

        for sized in &category_config.sized_items {
            let exists = SizedFoodItem::find()
                .filter(sized_food_item::Column::CategoryId.eq(category.id))
                .filter(sized_food_item::Column::BaseName.eq(sized.name.trim()))
                .one(&txn)
                .await?
                .is_some();
            if !exists {
                create_sized_food_item(
                    &txn,
                    category.id,
                    &sized.name,
                    &sized.description,
                    &sized.sizes,
                )
                .await?;
                summary.sized_items_created += 1;
            }
        }
    }

    txn.commit().await?;
    info!(
        "Menu seeded: {} categories, {} items, {} sized items created",
        summary.categories_created, summary.items_created, summary.sized_items_created
    );
    Ok(summary)
}

async fn find_category<C>(db: &C, category_id: i64) -> Result<category::Model>
where
    C: ConnectionTrait,
{
    Category::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CategoryNotFound {
            name: category_id.to_string(),
        })
}

fn to_simple_item(item: &food_item::Model, category_name: &str) -> SimpleItem {
    SimpleItem::new(
        item.id,
        item.name.clone(),
        item.price,
        item.description.clone(),
        category_name,
        item.category_id,
    )
}

fn validate_name(name: &str, what: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput {
            message: format!("{what} cannot be empty"),
        });
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidPrice { price });
    }
    Ok(())
}
