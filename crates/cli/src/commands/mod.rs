//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Read the database URL the way the API server does: `API_DATABASE_URL`
/// with `DATABASE_URL` as fallback.
pub(crate) fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    std::env::var("API_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "API_DATABASE_URL (or DATABASE_URL) not set".into())
}
