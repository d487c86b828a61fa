//! Integration tests for persistence layer using real SQLite databases
//!
//! These tests exercise the stores through their application ports, the way
//! the services use them.

#![allow(clippy::expect_used)]

use std::sync::Arc;

use application::ports::{CityStore, DatabaseHealthPort, SearchHistoryStore};
use domain::{City, CityPopularity, SearchEvent, UserKey};
use infrastructure::persistence::{
    AsyncDatabase, AsyncDatabaseConfig, SqliteCityStore, SqliteDatabaseHealth,
    SqliteSearchHistoryStore,
};
use tokio_test::{assert_err, assert_ok};

// ============================================================================
// Test Helpers
// ============================================================================

async fn create_test_db() -> AsyncDatabase {
    let db = AsyncDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Failed to run migrations");
    db
}

async fn create_file_db(dir: &tempfile::TempDir) -> AsyncDatabase {
    let config = AsyncDatabaseConfig {
        max_connections: 8,
        ..AsyncDatabaseConfig::file(dir.path().join("citycast.db"))
    };
    let db = AsyncDatabase::new(&config)
        .await
        .expect("Failed to create file database");
    db.migrate().await.expect("Failed to run migrations");
    db
}

fn kazan() -> City {
    City::new("Казань", 55.78874, 49.12214)
        .with_external_id(551_487)
        .with_country("Россия")
        .with_admin1("Татарстан")
}

// ============================================================================
// City Store Tests
// ============================================================================

mod city_store_tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_then_find() {
        let db = create_test_db().await;
        let store: Arc<dyn CityStore> = Arc::new(SqliteCityStore::new(db.pool().clone()));

        let stored = store
            .upsert_by_external_id(&kazan())
            .await
            .expect("Failed to upsert");
        assert_eq!(stored, kazan());

        let found = store.find_by_name("КАЗАНЬ").await.expect("Failed to find");
        assert_eq!(found, Some(kazan()));
    }

    #[tokio::test]
    async fn test_concurrent_upserts_store_one_row() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db = create_file_db(&dir).await;
        let store = Arc::new(SqliteCityStore::new(db.pool().clone()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.upsert_by_external_id(&kazan()).await
            }));
        }

        for handle in handles {
            let stored = handle
                .await
                .expect("Task panicked")
                .expect("Upsert failed");
            assert_eq!(stored, kazan());
        }

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cities WHERE city_id = $1")
            .bind(551_487_i64)
            .fetch_one(db.pool())
            .await
            .expect("Failed to count");
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_rows_survive_reopen() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        {
            let db = create_file_db(&dir).await;
            let store = SqliteCityStore::new(db.pool().clone());
            assert_ok!(store.upsert_by_external_id(&kazan()).await);
            db.close().await;
        }

        let db = create_file_db(&dir).await;
        let store = SqliteCityStore::new(db.pool().clone());
        assert_eq!(
            store.find_by_name("казань").await.expect("Failed to find"),
            Some(kazan())
        );
    }
}

// ============================================================================
// Search History Store Tests
// ============================================================================

mod search_history_tests {
    use super::*;

    #[tokio::test]
    async fn test_history_and_ranking_together() {
        let db = create_test_db().await;
        let store: Arc<dyn SearchHistoryStore> =
            Arc::new(SqliteSearchHistoryStore::new(db.pool().clone()));

        let alice = UserKey::generate();
        let bob = UserKey::generate();
        let events = [
            (alice.clone(), "Казань", 100),
            (bob.clone(), "Казань", 101),
            (alice.clone(), "Тула", 102),
            (alice.clone(), "Казань", 103),
        ];
        for (user, city, t) in events {
            assert_ok!(store.append(&SearchEvent::new(user, city, t)).await);
        }

        assert_eq!(
            store
                .list_distinct_recent_first(&alice)
                .await
                .expect("Failed to list"),
            vec!["Казань", "Тула"]
        );
        assert_eq!(
            store.frequency_ranking().await.expect("Failed to rank"),
            vec![CityPopularity::new("Казань", 3), CityPopularity::new("Тула", 1)]
        );
    }

    #[tokio::test]
    async fn test_ranking_ties_sorted_by_name() {
        let db = create_test_db().await;
        let store = SqliteSearchHistoryStore::new(db.pool().clone());
        let user = UserKey::generate();

        for city in ["Самара", "Омск", "Самара", "Омск"] {
            assert_ok!(store.append(&SearchEvent::now(user.clone(), city)).await);
        }

        let ranking = store.frequency_ranking().await.expect("Failed to rank");
        assert_eq!(ranking[0].city, "Омск");
        assert_eq!(ranking[1].city, "Самара");
    }

    #[tokio::test]
    async fn test_append_fails_without_schema() {
        let db = AsyncDatabase::in_memory()
            .await
            .expect("Failed to create in-memory database");
        let store = SqliteSearchHistoryStore::new(db.pool().clone());

        assert_err!(
            store
                .append(&SearchEvent::now(UserKey::generate(), "Тула"))
                .await
        );
    }
}

// ============================================================================
// Database Health Tests
// ============================================================================

mod database_health_tests {
    use super::*;

    #[tokio::test]
    async fn test_file_database_is_healthy() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db = create_file_db(&dir).await;
        let health = SqliteDatabaseHealth::new(db.pool().clone());

        assert!(health.is_available().await);
        let report = health.check_health().await.expect("Health check failed");
        assert!(report.reachable);
    }
}
