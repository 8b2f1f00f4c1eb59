use sqlx::{Pool, Sqlite};

use crate::storage::validate_sqlite_table_schema;
use crate::userdb::{
    errors::UserError,
    types::{User, UserSearchField},
};

use super::config::DB_TABLE_USERS;

pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

pub(super) async fn validate_user_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let expected_columns = [
        ("id", "TEXT"),
        ("username", "TEXT"),
        ("password_hash", "TEXT"),
        ("created_at", "TIMESTAMP"),
    ];

    validate_sqlite_table_schema(
        pool,
        DB_TABLE_USERS.as_str(),
        &expected_columns,
        UserError::Storage,
    )
    .await
}

pub(super) async fn get_user_by_field_sqlite(
    pool: &Pool<Sqlite>,
    field: &UserSearchField,
) -> Result<Option<User>, UserError> {
    // In-memory databases lose their tables when the last connection closes.
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    let user = match field {
        UserSearchField::Id(id) => {
            sqlx::query_as::<_, User>(&format!("SELECT * FROM {table_name} WHERE id = ?"))
                .bind(id)
                .fetch_optional(pool)
                .await?
        }
        UserSearchField::Username(username) => {
            sqlx::query_as::<_, User>(&format!("SELECT * FROM {table_name} WHERE username = ?"))
                .bind(username)
                .fetch_optional(pool)
                .await?
        }
    };

    Ok(user)
}

pub(super) async fn insert_user_sqlite(pool: &Pool<Sqlite>, user: User) -> Result<User, UserError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (id, username, password_hash, created_at)
        VALUES (?, ?, ?, ?)
        "#
    ))
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .execute(pool)
    .await?;

    let stored = sqlx::query_as::<_, User>(&format!("SELECT * FROM {table_name} WHERE id = ?"))
        .bind(&user.id)
        .fetch_one(pool)
        .await?;

    Ok(stored)
}

#[cfg(test)]
pub(super) async fn delete_user_sqlite(pool: &Pool<Sqlite>, id: &str) -> Result<(), UserError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!("DELETE FROM {table_name} WHERE id = ?"))
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
