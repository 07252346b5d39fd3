//! Column values that can be bound to a PostgreSQL query with their SQL type intact.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::{Query, QueryAs};
use std::cmp::Ordering;

/// One nullable column value. Each variant keeps its type so NULL binds as the right SQL type.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Int(Option<i32>),
    BigInt(Option<i64>),
    Text(Option<String>),
}

impl SqlValue {
    pub fn bind<'q>(self, query: Query<'q, Postgres, PgArguments>) -> Query<'q, Postgres, PgArguments> {
        match self {
            SqlValue::Int(v) => query.bind(v),
            SqlValue::BigInt(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
        }
    }

    pub fn bind_as<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            SqlValue::Int(v) => query.bind(v),
            SqlValue::BigInt(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
        }
    }

    /// Ascending order as PostgreSQL sorts it: NULL after every value.
    pub fn compare(&self, other: &SqlValue) -> Ordering {
        fn nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
            match (a, b) {
                (Some(a), Some(b)) => a.cmp(b),
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
            }
        }
        match (self, other) {
            (SqlValue::Int(a), SqlValue::Int(b)) => nulls_last(a, b),
            (SqlValue::BigInt(a), SqlValue::BigInt(b)) => nulls_last(a, b),
            (SqlValue::Text(a), SqlValue::Text(b)) => nulls_last(a, b),
            _ => Ordering::Equal,
        }
    }
}
