//! [`Repository`] over a PostgreSQL pool.

use super::Repository;
use crate::domain::Entity;
use crate::error::AppError;
use crate::page::{Page, PageRequest};
use crate::sql::{self, QueryBuf, SqlValue};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use std::marker::PhantomData;

pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        PgRepository {
            pool,
            _entity: PhantomData,
        }
    }

    async fn fetch_returning(conn: &mut PgConnection, q: QueryBuf) -> Result<Option<E>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query (tx)");
        let mut query = sqlx::query_as::<_, E>(&q.sql);
        for p in q.params {
            query = p.bind_as(query);
        }
        Ok(query.fetch_optional(&mut *conn).await?)
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for PgRepository<E> {
    async fn save(&self, record: E) -> Result<E, AppError> {
        let mut tx = self.pool.begin().await?;
        let updated = match record.id() {
            Some(id) => Self::fetch_returning(&mut tx, sql::update(&record, id)).await?,
            None => None,
        };
        let saved = match updated {
            Some(row) => row,
            None => Self::fetch_returning(&mut tx, sql::insert(&record))
                .await?
                .ok_or_else(|| AppError::Internal(format!("insert into {} returned no row", E::TABLE)))?,
        };
        tx.commit().await?;
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, AppError> {
        let sql = sql::select_by_id::<E>();
        tracing::debug!(sql = %sql, id, "query");
        let row = SqlValue::BigInt(Some(id))
            .bind_as(sqlx::query_as::<_, E>(&sql))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self) -> Result<Vec<E>, AppError> {
        let sql = sql::select_all::<E>();
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<E>, AppError> {
        let count_sql = sql::count::<E>();
        let page_sql = sql::select_page::<E>(request);
        tracing::debug!(sql = %page_sql, "query (read-only tx)");
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION READ ONLY").execute(&mut *tx).await?;
        let (total,): (i64,) = sqlx::query_as(&count_sql).fetch_one(&mut *tx).await?;
        let rows = sqlx::query_as::<_, E>(&page_sql).fetch_all(&mut *tx).await?;
        tx.commit().await?;
        Ok(Page::new(rows, request, u64::try_from(total).unwrap_or(0)))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let sql = sql::delete::<E>();
        tracing::debug!(sql = %sql, id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let result = SqlValue::BigInt(Some(id))
            .bind(sqlx::query(&sql))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        if result.rows_affected() == 0 {
            tracing::debug!(table = E::TABLE, id, "delete matched no row");
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, AppError> {
        let (total,): (i64,) = sqlx::query_as(&sql::count::<E>())
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
