use sqlx::{Pool, Postgres, Row, Sqlite};

/// Validates that a PostgreSQL table schema matches what we expect
pub(crate) async fn validate_postgres_table_schema<E>(
    pool: &Pool<Postgres>,
    table_name: &str,
    expected_columns: &[(&str, &str)],
    error_mapper: impl Fn(String) -> E,
) -> Result<(), E> {
    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT FROM information_schema.tables WHERE table_name = $1)",
    )
    .bind(table_name)
    .fetch_one(pool)
    .await
    .map_err(|e| error_mapper(e.to_string()))?;

    if !table_exists {
        return Err(error_mapper(format!(
            "Schema validation failed: Table '{table_name}' does not exist"
        )));
    }

    let rows = sqlx::query(
        "SELECT column_name, data_type FROM information_schema.columns
         WHERE table_name = $1 ORDER BY column_name",
    )
    .bind(table_name)
    .fetch_all(pool)
    .await
    .map_err(|e| error_mapper(e.to_string()))?;

    let actual_columns: Vec<(String, String)> = rows
        .iter()
        .map(|row| (row.get("column_name"), row.get("data_type")))
        .collect();

    compare_columns(table_name, expected_columns, &actual_columns, error_mapper)
}

/// Validates that a SQLite table schema matches what we expect
pub(crate) async fn validate_sqlite_table_schema<E>(
    pool: &Pool<Sqlite>,
    table_name: &str,
    expected_columns: &[(&str, &str)],
    error_mapper: impl Fn(String) -> E,
) -> Result<(), E> {
    let rows = sqlx::query(&format!("PRAGMA table_info({table_name})"))
        .fetch_all(pool)
        .await
        .map_err(|e| error_mapper(e.to_string()))?;

    if rows.is_empty() {
        return Err(error_mapper(format!(
            "Schema validation failed: Table '{table_name}' does not exist"
        )));
    }

    let actual_columns: Vec<(String, String)> = rows
        .iter()
        .map(|row| (row.get("name"), row.get("type")))
        .collect();

    compare_columns(table_name, expected_columns, &actual_columns, error_mapper)
}

fn compare_columns<E>(
    table_name: &str,
    expected_columns: &[(&str, &str)],
    actual_columns: &[(String, String)],
    error_mapper: impl Fn(String) -> E,
) -> Result<(), E> {
    for (expected_name, expected_type) in expected_columns {
        let found = actual_columns
            .iter()
            .find(|(name, _)| name == expected_name);

        match found {
            Some((_, actual_type)) if actual_type.eq_ignore_ascii_case(expected_type) => {}
            Some((_, actual_type)) => {
                return Err(error_mapper(format!(
                    "Schema validation failed: Column '{expected_name}' has type '{actual_type}' but expected '{expected_type}'"
                )));
            }
            None => {
                return Err(error_mapper(format!(
                    "Schema validation failed: Missing column '{expected_name}'"
                )));
            }
        }
    }

    for (actual_name, _) in actual_columns {
        if !expected_columns
            .iter()
            .any(|(name, _)| *name == actual_name)
        {
            tracing::warn!(
                "Extra column '{}' found in table '{}'",
                actual_name,
                table_name
            );
        }
    }

    Ok(())
}
