use chrono::NaiveDateTime;
use serde::Serialize;

/// One titled section pulled out of a fetched page.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct SectionRecord {
    pub title: String,
    pub content: String,
    pub href: String,
}

/// A `SectionRecord` as it lives in the `crawled_data` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub href: String,
    pub timestamp: NaiveDateTime,
}

impl From<StoredRow> for SectionRecord {
    fn from(row: StoredRow) -> Self {
        SectionRecord {
            title: row.title,
            content: row.content,
            href: row.href,
        }
    }
}

/// Everything before the first `#`, or the whole url when it has no fragment.
pub fn strip_fragment(url: &str) -> &str {
    match url.split_once('#') {
        Some((base, _)) => base,
        None => url,
    }
}

pub fn section_href(base_url: &str, anchor_id: &str) -> String {
    format!("{}#{}", strip_fragment(base_url), anchor_id)
}
