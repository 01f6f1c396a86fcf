use dotenvy::dotenv;
use food_ordering::{
    config::{database, menu as menu_config},
    console,
    core::menu,
    errors::Result,
    session::SessionContext,
};
use std::io;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Open the store and make sure the schema exists
    let database_url = database::get_database_url();
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to open database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 4. Seed the menu (idempotent)
    let menu_file = menu_config::load_default_menu_config()
        .inspect_err(|e| error!("Failed to load menu configuration: {e}"))?;
    menu::seed_menu(&db, &menu_file)
        .await
        .inspect_err(|e| error!("Failed to seed menu: {e}"))?;

    // 5. Run the session
    let session = SessionContext::open(db).await?;
    console::run(&session, io::stdin().lock(), io::stdout().lock()).await
}
