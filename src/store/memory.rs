//! In-process [`Repository`]: the `memory` storage backend.

use super::Repository;
use crate::domain::Entity;
use crate::error::AppError;
use crate::page::{Direction, Page, PageRequest, SortOrder};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Table<E> {
    rows: BTreeMap<i64, E>,
    /// Last id handed out; ids are never reused after delete.
    last_id: i64,
}

/// Rows live in process memory and vanish on restart.
///
/// Sorting follows PostgreSQL for NULLs (last when ascending, first when descending),
/// but text compares by UTF-8 byte order, so `"B"` sorts before `"a"`. A PostgreSQL
/// store orders text by the database collation instead.
pub struct MemoryRepository<E> {
    table: RwLock<Table<E>>,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        MemoryRepository {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_by<E: Entity>(a: &E, b: &E, orders: &[SortOrder]) -> Ordering {
    for order in orders {
        let (Some(x), Some(y)) = (a.sort_value(&order.property), b.sort_value(&order.property)) else {
            continue;
        };
        let ord = match order.direction {
            Direction::Asc => x.compare(&y),
            Direction::Desc => y.compare(&x),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn save(&self, record: E) -> Result<E, AppError> {
        let mut table = self.table.write().await;
        if let Some(id) = record.id() {
            if let Some(row) = table.rows.get_mut(&id) {
                *row = record.clone();
                return Ok(record);
            }
        }
        table.last_id += 1;
        let id = table.last_id;
        let saved = record.with_id(id);
        table.rows.insert(id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, AppError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<E>, AppError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<E>, AppError> {
        let table = self.table.read().await;
        let mut rows: Vec<&E> = table.rows.values().collect();
        let orders = request.effective_sort();
        rows.sort_by(|a, b| compare_by(*a, *b, &orders));
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = rows
            .into_iter()
            .skip(offset)
            .take(request.size as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, request, table.rows.len() as u64))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.table.read().await.rows.len() as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Demo, Demo2};

    #[tokio::test]
    async fn ids_are_assigned_and_not_reused() {
        let repo = MemoryRepository::<Demo2>::new();
        let a = repo.save(Demo2::new("AAAAA")).await.unwrap();
        assert_eq!(a.id, Some(1));
        repo.delete_by_id(1).await.unwrap();
        let b = repo.save(Demo2::new("BBBBB")).await.unwrap();
        assert_eq!(b.id, Some(2));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn save_with_unknown_id_inserts_fresh_row() {
        let repo = MemoryRepository::<Demo2>::new();
        let saved = repo
            .save(Demo2 { id: Some(99), name: Some("AAAAA".into()) })
            .await
            .unwrap();
        assert_eq!(saved.id, Some(1));
        assert!(repo.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_whole_record() {
        let repo = MemoryRepository::<Demo>::new();
        let saved = repo.save(Demo::new("AAAAA", 1)).await.unwrap();
        let update = Demo { id: saved.id, title: None, level: Some(2) };
        repo.save(update).await.unwrap();
        let stored = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.title, None);
        assert_eq!(stored.level, Some(2));
    }

    #[tokio::test]
    async fn page_sorts_nulls_last_and_slices() {
        let repo = MemoryRepository::<Demo>::new();
        repo.save(Demo { id: None, title: Some("b".into()), level: None }).await.unwrap();
        repo.save(Demo::new("a", 3)).await.unwrap();
        repo.save(Demo::new("c", 1)).await.unwrap();

        let req = PageRequest::new(0, 2).sorted_by("level", Direction::Asc);
        let page = repo.find_page(&req).await.unwrap();
        let levels: Vec<_> = page.content.iter().map(|d| d.level).collect();
        assert_eq!(levels, vec![Some(1), Some(3)]);
        assert_eq!(page.total_elements, 3);

        let req = PageRequest::new(1, 2).sorted_by("level", Direction::Asc);
        let page = repo.find_page(&req).await.unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].level, None);
    }

    #[tokio::test]
    async fn page_descending_by_id() {
        let repo = MemoryRepository::<Demo2>::new();
        for name in ["a", "b", "c"] {
            repo.save(Demo2::new(name)).await.unwrap();
        }
        let req = PageRequest::new(0, 20).sorted_by("id", Direction::Desc);
        let ids: Vec<_> = repo
            .find_page(&req)
            .await
            .unwrap()
            .content
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![Some(3), Some(2), Some(1)]);
    }

    #[tokio::test]
    async fn text_sorts_by_byte_order() {
        let repo = MemoryRepository::<Demo2>::new();
        for name in ["a", "B", "á", "C"] {
            repo.save(Demo2::new(name)).await.unwrap();
        }
        let req = PageRequest::new(0, 20).sorted_by("name", Direction::Asc);
        let names: Vec<_> = repo
            .find_page(&req)
            .await
            .unwrap()
            .content
            .into_iter()
            .filter_map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["B", "C", "a", "á"]);
    }

    #[tokio::test]
    async fn delete_missing_id_is_ok() {
        let repo = MemoryRepository::<Demo2>::new();
        assert!(repo.delete_by_id(42).await.is_ok());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
