use sqlx::{sqlite::SqliteQueryResult, QueryBuilder, Sqlite, SqliteConnection};

use crate::domain::section::{SectionRecord, StoredRow};

// SQLITE_MAX_VARIABLE_NUMBER for the bundled engine, three binds per row.
const MAX_BINDS: usize = 32_766;
pub const ROWS_PER_INSERT: usize = MAX_BINDS / 3;

pub async fn create_table(con: &mut SqliteConnection) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r"
        create table if not exists crawled_data (
            id integer primary key autoincrement,
            title text,
            content text,
            href text,
            timestamp datetime default current_timestamp
        )
        ",
    )
    .execute(con)
    .await
}

/// Inserts `records` with a single multi-row statement.
///
/// Callers must keep `records.len()` at or below [`ROWS_PER_INSERT`].
pub async fn insert_sections(
    con: &mut SqliteConnection,
    records: Vec<SectionRecord>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("insert into crawled_data (title, content, href) ");

    builder.push_values(records, |mut row, record| {
        row.push_bind(record.title)
            .push_bind(record.content)
            .push_bind(record.href);
    });

    builder.build().execute(con).await
}

pub async fn get_all_sections(con: &mut SqliteConnection) -> Result<Vec<StoredRow>, sqlx::Error> {
    sqlx::query_as::<_, StoredRow>(
        r"
        select
            id,
            title,
            content,
            href,
            timestamp
        from
            crawled_data
        ",
    )
    .fetch_all(con)
    .await
}

pub async fn count_sections(con: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r"
        select
            count(*)
        from
            crawled_data
        ",
    )
    .fetch_one(con)
    .await
}
