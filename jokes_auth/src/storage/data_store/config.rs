use std::{env, str::FromStr, sync::LazyLock};

use crate::storage::errors::StorageError;

use super::types::{DataStore, PostgresDataStore, SqliteDataStore, StoreKind};

static GENERIC_DATA_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_DATA_STORE_TYPE").expect("GENERIC_DATA_STORE_TYPE must be set")
});

static GENERIC_DATA_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_DATA_STORE_URL").expect("GENERIC_DATA_STORE_URL must be set")
});

/// Users database shared by every request
///
/// Pools are created lazily; nothing connects until the first query.
pub(crate) static GENERIC_DATA_STORE: LazyLock<Box<dyn DataStore>> = LazyLock::new(|| {
    tracing::info!(store_type = %*GENERIC_DATA_STORE_TYPE, "Initializing data store");

    match open_store(&GENERIC_DATA_STORE_TYPE, &GENERIC_DATA_STORE_URL) {
        Ok(store) => store,
        Err(e) => panic!("Failed to configure data store: {e}"),
    }
});

pub(crate) static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "jokes_".to_string()));

fn open_store(store_type: &str, store_url: &str) -> Result<Box<dyn DataStore>, StorageError> {
    match store_type.parse::<StoreKind>()? {
        StoreKind::Sqlite => {
            let opts = sqlx::sqlite::SqliteConnectOptions::from_str(store_url)?
                .create_if_missing(true);
            Ok(Box::new(SqliteDataStore {
                pool: sqlx::sqlite::SqlitePool::connect_lazy_with(opts),
            }))
        }
        StoreKind::Postgres => Ok(Box::new(PostgresDataStore {
            pool: sqlx::PgPool::connect_lazy(store_url)?,
        })),
    }
}
