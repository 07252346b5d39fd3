//! Storage gateway: CRUD primitives per entity type, keyed by id.

mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use crate::domain::Entity;
use crate::error::AppError;
use crate::page::{Page, PageRequest};
use async_trait::async_trait;

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Insert when the record has no id, else overwrite the stored row with that id.
    /// An id with no stored row is inserted as a new row with a fresh id.
    async fn save(&self, record: E) -> Result<E, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, AppError>;

    /// Every row, ordered by id.
    async fn find_all(&self) -> Result<Vec<E>, AppError>;

    /// Sort properties must already be checked with [`PageRequest::ensure_sortable`].
    async fn find_page(&self, request: &PageRequest) -> Result<Page<E>, AppError>;

    /// Deleting an absent id is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;

    async fn count(&self) -> Result<u64, AppError>;

    /// Readiness check for the backing store.
    async fn ping(&self) -> Result<(), AppError>;
}
