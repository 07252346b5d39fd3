//! Generic CRUD service over a storage gateway.

use crate::domain::Entity;
use crate::error::AppError;
use crate::page::{Page, PageRequest};
use crate::store::Repository;
use std::sync::Arc;

pub struct CrudService<E: Entity> {
    repo: Arc<dyn Repository<E>>,
}

impl<E: Entity> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        CrudService {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<E: Entity> CrudService<E> {
    pub fn new(repo: Arc<dyn Repository<E>>) -> Self {
        CrudService { repo }
    }

    /// Save a record; insert when it has no id.
    pub async fn save(&self, record: E) -> Result<E, AppError> {
        tracing::debug!(record = ?record, "Request to save {}", E::LABEL);
        self.repo.save(record).await
    }

    pub async fn find_all(&self) -> Result<Vec<E>, AppError> {
        tracing::debug!("Request to get all {}s", E::LABEL);
        self.repo.find_all().await
    }

    pub async fn find_page(&self, request: &PageRequest) -> Result<Page<E>, AppError> {
        tracing::debug!(page = request.page, size = request.size, "Request to get a page of {}s", E::LABEL);
        self.repo.find_page(request).await
    }

    /// `None` when no record has this id.
    pub async fn find_one(&self, id: i64) -> Result<Option<E>, AppError> {
        tracing::debug!(id, "Request to get {}", E::LABEL);
        self.repo.find_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        tracing::debug!(id, "Request to delete {}", E::LABEL);
        self.repo.delete_by_id(id).await
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        self.repo.count().await
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.repo.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Demo1;
    use crate::store::MemoryRepository;

    #[tokio::test]
    async fn round_trip_through_service() {
        let service = CrudService::<Demo1>::new(Arc::new(MemoryRepository::new()));
        let saved = service.save(Demo1::new("AAAAA")).await.unwrap();
        let id = saved.id.unwrap();
        assert_eq!(service.find_one(id).await.unwrap(), Some(saved));
        service.delete(id).await.unwrap();
        assert_eq!(service.find_one(id).await.unwrap(), None);
        assert_eq!(service.count().await.unwrap(), 0);
    }
}
