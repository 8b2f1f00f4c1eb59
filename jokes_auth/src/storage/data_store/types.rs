use std::str::FromStr;

use sqlx::{Pool, Postgres, Sqlite};

use crate::storage::errors::StorageError;

/// Database engines the users table can live in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreKind {
    Sqlite,
    Postgres,
}

impl FromStr for StoreKind {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreKind::Sqlite),
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            other => Err(StorageError::UnsupportedBackend(other.to_string())),
        }
    }
}

/// Borrowed view of the pool behind a [`DataStore`]
pub(crate) enum StoreBackend<'a> {
    Sqlite(&'a Pool<Sqlite>),
    Postgres(&'a Pool<Postgres>),
}

/// Backend-neutral handle on the users database
pub(crate) trait DataStore: Send + Sync {
    fn backend(&self) -> StoreBackend<'_>;

    fn as_sqlite(&self) -> Option<&Pool<Sqlite>> {
        match self.backend() {
            StoreBackend::Sqlite(pool) => Some(pool),
            StoreBackend::Postgres(_) => None,
        }
    }

    fn as_postgres(&self) -> Option<&Pool<Postgres>> {
        match self.backend() {
            StoreBackend::Postgres(pool) => Some(pool),
            StoreBackend::Sqlite(_) => None,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct SqliteDataStore {
    pub(super) pool: Pool<Sqlite>,
}

#[derive(Clone, Debug)]
pub(crate) struct PostgresDataStore {
    pub(super) pool: Pool<Postgres>,
}

impl DataStore for SqliteDataStore {
    fn backend(&self) -> StoreBackend<'_> {
        StoreBackend::Sqlite(&self.pool)
    }
}

impl DataStore for PostgresDataStore {
    fn backend(&self) -> StoreBackend<'_> {
        StoreBackend::Postgres(&self.pool)
    }
}
