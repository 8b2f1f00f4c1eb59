mod data_store;
mod errors;
mod schema_validation;

use data_store::StoreBackend;
use errors::StorageError;

/// Open the configured database and check that it answers
pub(crate) async fn init() -> Result<(), StorageError> {
    match GENERIC_DATA_STORE.backend() {
        StoreBackend::Sqlite(pool) => {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        StoreBackend::Postgres(pool) => {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
    }

    tracing::info!("Data store ready");
    Ok(())
}

pub(crate) use data_store::{DB_TABLE_PREFIX, GENERIC_DATA_STORE};

pub(crate) use schema_validation::{validate_postgres_table_schema, validate_sqlite_table_schema};
