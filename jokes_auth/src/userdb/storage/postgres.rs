use sqlx::{Pool, Postgres};

use crate::storage::validate_postgres_table_schema;
use crate::userdb::{
    errors::UserError,
    types::{User, UserSearchField},
};

use super::config::DB_TABLE_USERS;

pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

pub(super) async fn validate_user_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let expected_columns = [
        ("id", "text"),
        ("username", "text"),
        ("password_hash", "text"),
        ("created_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(
        pool,
        DB_TABLE_USERS.as_str(),
        &expected_columns,
        UserError::Storage,
    )
    .await
}

pub(super) async fn get_user_by_field_postgres(
    pool: &Pool<Postgres>,
    field: &UserSearchField,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let user = match field {
        UserSearchField::Id(id) => {
            sqlx::query_as::<_, User>(&format!("SELECT * FROM {table_name} WHERE id = $1"))
                .bind(id)
                .fetch_optional(pool)
                .await?
        }
        UserSearchField::Username(username) => {
            sqlx::query_as::<_, User>(&format!("SELECT * FROM {table_name} WHERE username = $1"))
                .bind(username)
                .fetch_optional(pool)
                .await?
        }
    };

    Ok(user)
}

pub(super) async fn insert_user_postgres(
    pool: &Pool<Postgres>,
    user: User,
) -> Result<User, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let stored = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO {table_name} (id, username, password_hash, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#
    ))
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .fetch_one(pool)
    .await?;

    Ok(stored)
}

#[cfg(test)]
pub(super) async fn delete_user_postgres(pool: &Pool<Postgres>, id: &str) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!("DELETE FROM {table_name} WHERE id = $1"))
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
