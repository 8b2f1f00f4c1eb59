use crate::storage::GENERIC_DATA_STORE;
use crate::userdb::{
    errors::UserError,
    types::{User, UserSearchField},
};

use super::postgres::*;
use super::sqlite::*;

/// Lookup/insert access to the users table
///
/// The credential verifier only ever reads users and inserts new ones.
pub(crate) struct UserStore;

impl UserStore {
    /// Create the users table if needed and check its schema
    pub(crate) async fn init() -> Result<(), UserError> {
        let store = &*GENERIC_DATA_STORE;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_user_tables_sqlite(pool).await
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_user_tables_postgres(pool).await
            }
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Get a user by their ID
    pub(crate) async fn get_user(id: &str) -> Result<Option<User>, UserError> {
        Self::get_user_by(UserSearchField::Id(id.to_string())).await
    }

    /// Get a user by exact username
    pub(crate) async fn get_user_by_username(username: &str) -> Result<Option<User>, UserError> {
        Self::get_user_by(UserSearchField::Username(username.to_string())).await
    }

    #[tracing::instrument(fields(user_field = %field))]
    pub(crate) async fn get_user_by(field: UserSearchField) -> Result<Option<User>, UserError> {
        let store = &*GENERIC_DATA_STORE;

        let result = if let Some(pool) = store.as_sqlite() {
            get_user_by_field_sqlite(pool, &field).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_by_field_postgres(pool, &field).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(found) => tracing::debug!(found = found.is_some(), "User lookup completed"),
            Err(e) => tracing::error!(error = %e, "User lookup failed"),
        }

        result
    }

    /// Insert a new user
    ///
    /// Fails with [`UserError::Conflict`] when the username is already taken.
    #[tracing::instrument(skip(user), fields(user_id = %user.id, username = %user.username))]
    pub(crate) async fn create_user(user: User) -> Result<User, UserError> {
        let store = &*GENERIC_DATA_STORE;

        let result = if let Some(pool) = store.as_sqlite() {
            insert_user_sqlite(pool, user).await
        } else if let Some(pool) = store.as_postgres() {
            insert_user_postgres(pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(user) => tracing::info!(user_id = %user.id, "User created"),
            Err(e) => tracing::error!(error = %e, "User creation failed"),
        }

        result
    }

    #[cfg(test)]
    pub(crate) async fn delete_user(id: &str) -> Result<(), UserError> {
        let store = &*GENERIC_DATA_STORE;

        if let Some(pool) = store.as_sqlite() {
            delete_user_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_user_postgres(pool, id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}
