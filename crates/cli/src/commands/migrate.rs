//! Database migration command.

use tracing::info;

use bazaar_api::db;

/// Run pending migrations against the configured database.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running migrations...");
    db::migrator().run(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
