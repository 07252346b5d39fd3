//! Database bootstrap: create the database if missing, then the four entity tables.

use crate::domain::{Demo, Demo1, Demo2, Demo3, Entity};
use crate::error::AppError;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Column DDL per entity; the id column is added by [`create_table_sql`].
fn column_defs<E: Entity>() -> Vec<String> {
    E::COLUMNS
        .iter()
        .map(|c| {
            let typ = match *c {
                "level" => "INTEGER",
                _ => "VARCHAR(255)",
            };
            format!("{} {}", quote(c), typ)
        })
        .collect()
}

pub fn create_table_sql<E: Entity>() -> String {
    let mut cols = vec![format!("{} BIGSERIAL PRIMARY KEY", quote(crate::domain::ID_COLUMN))];
    cols.extend(column_defs::<E>());
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote(E::TABLE),
        cols.join(", ")
    )
}

/// Idempotent: every statement is `CREATE TABLE IF NOT EXISTS`.
pub async fn ensure_entity_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in [
        create_table_sql::<Demo>(),
        create_table_sql::<Demo1>(),
        create_table_sql::<Demo2>(),
        create_table_sql::<Demo3>(),
    ] {
        tracing::debug!(sql = %ddl, "migration");
        sqlx::query(&ddl).execute(pool).await?;
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = admin_options(database_url)?;
    let db_name = match db_name {
        Some(name) if !name.is_empty() && name != "postgres" => name,
        _ => return Ok(()),
    };
    let mut conn = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` maintenance database on the same server, plus the
/// database named in `url`. Every other setting of `url` (credentials, TLS) is kept.
fn admin_options(url: &str) -> Result<(PgConnectOptions, Option<String>), AppError> {
    let opts = PgConnectOptions::from_str(url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let db_name = opts.get_database().map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_table_ddl() {
        assert_eq!(
            create_table_sql::<Demo>(),
            r#"CREATE TABLE IF NOT EXISTS "demo" ("id" BIGSERIAL PRIMARY KEY, "title" VARCHAR(255), "level" INTEGER)"#
        );
        assert_eq!(
            create_table_sql::<Demo3>(),
            r#"CREATE TABLE IF NOT EXISTS "demo_3" ("id" BIGSERIAL PRIMARY KEY, "name" VARCHAR(255))"#
        );
    }

    #[test]
    fn admin_options_switch_database_only() {
        let (admin, db) = admin_options(
            "postgres://u:p@localhost:5432/shop?sslmode=disable&sslrootcert=/etc/ssl/ca.pem",
        )
        .unwrap();
        assert_eq!(db.as_deref(), Some("shop"));
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "localhost");
        assert_eq!(admin.get_port(), 5432);
        assert_eq!(admin.get_username(), "u");
    }

    #[test]
    fn url_without_database_has_no_name() {
        let (admin, db) = admin_options("postgres://u:p@localhost:5432").unwrap();
        assert_eq!(db, None);
        assert_eq!(admin.get_database(), Some("postgres"));
    }

    #[test]
    fn malformed_url_is_rejected() {
        assert!(admin_options("localhost").is_err());
    }
}
