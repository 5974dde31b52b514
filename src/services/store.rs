use sqlx::SqlitePool;

use crate::{
    dal::crawled_data_db::{self, ROWS_PER_INSERT},
    domain::section::{SectionRecord, StoredRow},
    error::StorageError,
};

/// Append-only access to the `crawled_data` table.
///
/// Every operation checks out its own connection from the pool and hands it
/// back when the call returns, on success or failure.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Store { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        let mut con = self.pool.acquire().await?;
        crawled_data_db::create_table(&mut con).await?;
        Ok(())
    }

    /// Inserts all `records` atomically and returns how many rows were written.
    pub async fn append(&self, records: Vec<SectionRecord>) -> Result<usize, StorageError> {
        if records.is_empty() {
            log::warn!("No data to save!");
            return Ok(0);
        }

        let total = records.len();
        log::info!("Saving {} items to the database.", total);

        let mut tx = self.pool.begin().await?;
        let mut records = records.into_iter();
        loop {
            let chunk: Vec<SectionRecord> = records.by_ref().take(ROWS_PER_INSERT).collect();
            if chunk.is_empty() {
                break;
            }
            crawled_data_db::insert_sections(&mut tx, chunk).await?;
        }
        tx.commit().await?;

        log::info!("Data saved successfully.");
        Ok(total)
    }

    pub async fn query_all(&self) -> Result<Vec<StoredRow>, StorageError> {
        let mut con = self.pool.acquire().await?;
        Ok(crawled_data_db::get_all_sections(&mut con).await?)
    }

    pub async fn count(&self) -> Result<i64, StorageError> {
        let mut con = self.pool.acquire().await?;
        Ok(crawled_data_db::count_sections(&mut con).await?)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use tempfile::TempDir;

    use super::Store;
    use crate::domain::section::SectionRecord;

    pub(crate) async fn temp_store() -> (Store, TempDir) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let options = SqliteConnectOptions::new()
            .filename(dir.path().join("crawler_data.db"))
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(2)
            .connect_with(options)
            .await
            .expect("Failed to open sqlite pool");

        (Store::new(pool), dir)
    }

    /// Makes the table abort any insert of a row with this title.
    pub(crate) async fn reject_title(store: &Store, title: &str) {
        store.ensure_schema().await.unwrap();
        sqlx::query(&format!(
            "create trigger reject_title before insert on crawled_data \
             when new.title = '{}' begin select raise(abort, 'rejected'); end",
            title
        ))
        .execute(&store.pool)
        .await
        .unwrap();
    }

    fn record(title: &str, content: &str, href: &str) -> SectionRecord {
        SectionRecord {
            title: title.to_string(),
            content: content.to_string(),
            href: href.to_string(),
        }
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let (store, _dir) = temp_store().await;

        store.ensure_schema().await.unwrap();
        store.ensure_schema().await.unwrap();

        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn append_empty_is_noop() {
        let (store, _dir) = temp_store().await;
        store.ensure_schema().await.unwrap();
        store
            .append(vec![record("Alpha", "One", "https://x/wiki/Page#a")])
            .await
            .unwrap();

        let written = store.append(vec![]).await.unwrap();

        assert_eq!(written, 0);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn append_then_query_preserves_values() {
        let (store, _dir) = temp_store().await;
        store.ensure_schema().await.unwrap();
        let records = vec![
            record("Alpha", "One x y", "https://x/wiki/Page#a"),
            record("Ünïcode — “quotes”", "  padded\tcontent  ", "https://x/wiki/Page#b"),
            record("", "", "https://x/wiki/Page#c"),
        ];

        let written = store.append(records.clone()).await.unwrap();
        let mut rows = store.query_all().await.unwrap();
        rows.sort_by_key(|r| r.id);

        assert_eq!(written, 3);
        let stored: Vec<SectionRecord> = rows.into_iter().map(SectionRecord::from).collect();
        assert_eq!(stored, records);
    }

    #[tokio::test]
    async fn ids_increase_across_appends() {
        let (store, _dir) = temp_store().await;
        store.ensure_schema().await.unwrap();

        store
            .append(vec![
                record("A", "1", "https://x/p#a"),
                record("B", "2", "https://x/p#b"),
            ])
            .await
            .unwrap();
        let first_max = store
            .query_all()
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap();

        store
            .append(vec![record("A", "1", "https://x/p#a")])
            .await
            .unwrap();
        let rows = store.query_all().await.unwrap();

        assert_eq!(rows.len(), 3);
        let newest: Vec<i64> = rows
            .iter()
            .filter(|r| r.id > first_max)
            .map(|r| r.id)
            .collect();
        assert_eq!(newest.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_records_are_not_merged() {
        let (store, _dir) = temp_store().await;
        store.ensure_schema().await.unwrap();
        let same = record("Alpha", "One", "https://x/wiki/Page#a");

        store.append(vec![same.clone()]).await.unwrap();
        store.append(vec![same.clone(), same]).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn append_larger_than_one_statement() {
        let (store, _dir) = temp_store().await;
        store.ensure_schema().await.unwrap();
        let total = super::ROWS_PER_INSERT + 5;
        let records: Vec<SectionRecord> = (0..total)
            .map(|i| record(&format!("T{}", i), "c", &format!("https://x/p#{}", i)))
            .collect();

        let written = store.append(records).await.unwrap();

        assert_eq!(written, total);
        assert_eq!(store.count().await.unwrap(), total as i64);
    }

    #[tokio::test]
    async fn rejected_batch_leaves_no_rows() {
        let (store, _dir) = temp_store().await;
        reject_title(&store, "Broken").await;
        let mut records: Vec<SectionRecord> = (0..super::ROWS_PER_INSERT)
            .map(|i| record(&format!("T{}", i), "c", &format!("https://x/p#{}", i)))
            .collect();
        records.push(record("Broken", "c", "https://x/p#broken"));

        let result = store.append(records).await;

        assert!(result.is_err());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn timestamp_is_assigned_by_store() {
        let (store, _dir) = temp_store().await;
        store.ensure_schema().await.unwrap();

        store
            .append(vec![record("Alpha", "One", "https://x/wiki/Page#a")])
            .await
            .unwrap();
        let rows = store.query_all().await.unwrap();

        let now = chrono::Utc::now().naive_utc();
        let age = now - rows[0].timestamp;
        assert!(age.num_minutes().abs() < 5);
    }

    #[tokio::test]
    async fn append_without_schema_fails() {
        let (store, _dir) = temp_store().await;

        let result = store
            .append(vec![record("Alpha", "One", "https://x/wiki/Page#a")])
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn query_all_on_fresh_table_is_empty() {
        let (store, _dir) = temp_store().await;
        store.ensure_schema().await.unwrap();

        assert!(store.query_all().await.unwrap().is_empty());
    }
}
