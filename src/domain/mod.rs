//! Entity records and the trait the generic CRUD layers are written against.

mod demo;
mod named;

pub use demo::Demo;
pub use named::{Demo1, Demo2, Demo3};

use crate::sql::SqlValue;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use std::fmt::Debug;

/// Name of the surrogate key column shared by every table.
pub const ID_COLUMN: &str = "id";

/// How the collection endpoint of an entity returns its rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingMode {
    /// `page`/`size`/`sort` query parameters, pagination headers on the response.
    Paged,
    /// Every row, ordered by id, no pagination headers.
    Unpaged,
}

/// A persisted record type with a server-assigned `i64` identifier.
///
/// Implementors list their non-id columns in [`Entity::COLUMNS`]; [`Entity::values`]
/// must return one value per column in the same order.
pub trait Entity:
    Clone
    + Debug
    + Serialize
    + DeserializeOwned
    + for<'r> sqlx::FromRow<'r, PgRow>
    + Send
    + Sync
    + Unpin
    + 'static
{
    /// Name used in alert headers (e.g. `demo1`).
    const NAME: &'static str;
    /// Type name used in log lines (e.g. `Demo1`).
    const LABEL: &'static str;
    const TABLE: &'static str;
    /// Collection path below `/api` (e.g. `/demo-1-s`).
    const PATH: &'static str;
    /// Non-id columns, in bind order.
    const COLUMNS: &'static [&'static str];
    const LISTING: ListingMode;

    fn id(&self) -> Option<i64>;

    /// Returns the record carrying `id`. Only the stores call this, on insert.
    fn with_id(self, id: i64) -> Self;

    /// Column values in [`Entity::COLUMNS`] order.
    fn values(&self) -> Vec<SqlValue>;

    /// Value of a sortable property (`id` or one of the columns).
    fn sort_value(&self, property: &str) -> Option<SqlValue> {
        if property == ID_COLUMN {
            return Some(SqlValue::BigInt(self.id()));
        }
        let idx = Self::COLUMNS.iter().position(|c| *c == property)?;
        self.values().into_iter().nth(idx)
    }

    fn is_sortable(property: &str) -> bool {
        property == ID_COLUMN || Self::COLUMNS.contains(&property)
    }
}

/// Identity equality: both ids populated and equal. Two unpersisted records are never equal.
pub fn same_identity(a: Option<i64>, b: Option<i64>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}
