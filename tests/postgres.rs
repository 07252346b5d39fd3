//! Storage gateway against a real database. Runs only when `TEST_DATABASE_URL` is set.

use shop_demo::page::Direction;
use shop_demo::{ensure_database_exists, ensure_entity_tables, Demo, PageRequest, PgRepository, Repository};
use sqlx::postgres::PgPoolOptions;

async fn repository() -> Option<PgRepository<Demo>> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            println!("TEST_DATABASE_URL not set, skipping");
            return None;
        }
    };
    ensure_database_exists(&url).await.unwrap();
    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.unwrap();
    ensure_entity_tables(&pool).await.unwrap();
    Some(PgRepository::new(pool))
}

#[tokio::test]
async fn demo_gateway_round_trip() {
    let Some(repo) = repository().await else { return };
    let before = repo.count().await.unwrap();

    let saved = repo.save(Demo::new("AAAAA", 1)).await.unwrap();
    let id = saved.id.expect("id assigned");
    assert_eq!(repo.count().await.unwrap(), before + 1);

    let fetched = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(fetched, saved);
    assert_eq!(fetched.title.as_deref(), Some("AAAAA"));

    let updated = repo
        .save(Demo { id: Some(id), title: Some("BBBBB".into()), level: None })
        .await
        .unwrap();
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.level, None);
    assert_eq!(repo.count().await.unwrap(), before + 1);

    let page = repo
        .find_page(&PageRequest::new(0, 1).sorted_by("id", Direction::Desc))
        .await
        .unwrap();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.total_elements, before + 1);

    repo.delete_by_id(id).await.unwrap();
    assert!(repo.find_by_id(id).await.unwrap().is_none());
    repo.delete_by_id(id).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), before);
}
