use serde_json::json;
use storage::repository::{ProgressRecordRepository, RecordMap, Storage, StorageError};
use storage::sqlite::SqliteRepository;
use tally_core::model::ProgressRecord;
use tally_core::time::fixed_now;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn empty_store_loads_nothing() {
    let repo = connect("memdb_empty").await;
    assert!(repo.load_record().await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_roundtrip_persists_record() {
    let repo = connect("memdb_roundtrip").await;
    let today = fixed_now().date_naive();

    let mut record = ProgressRecord::new(today);
    record.best_streak = 17;
    record.daily_reviews = 40;
    record.daily_correct = 35;
    repo.save_record(&record.to_persisted()).await.unwrap();

    record.daily_reviews = 41;
    repo.save_record(&record.to_persisted()).await.unwrap();

    let loaded = repo.load_record().await.unwrap().expect("record stored");
    assert_eq!(ProgressRecord::from_persisted(&loaded, today), record);
}

#[tokio::test]
async fn migrations_are_rerunnable() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");

    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(row.0, 1);
}

#[tokio::test]
async fn non_object_body_is_a_serialization_error() {
    let repo = connect("memdb_bad_body").await;
    sqlx::query("INSERT INTO progress_record (id, body) VALUES (1, '[1, 2, 3]')")
        .execute(repo.pool())
        .await
        .unwrap();

    let err = repo.load_record().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn storage_facade_uses_sqlite_backend() {
    let storage = Storage::sqlite("sqlite:file:memdb_facade?mode=memory&cache=shared")
        .await
        .expect("sqlite storage");

    let mut map = RecordMap::new();
    map.insert("best_streak".into(), json!(3));
    storage.records.save_record(&map).await.unwrap();

    assert_eq!(storage.records.load_record().await.unwrap(), Some(map));
}
