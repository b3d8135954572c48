//! Collaborator contracts. The pipeline runner only ever talks to these
//! traits; production implementations live in gisource-channels and
//! gisource-store, tests supply in-memory fakes.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::PersistedRecord;

/// The intake spreadsheet: ordered rows with named columns.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Read all rows of a range; row 0 is the header. Trailing blank cells
    /// may be absent — callers pad short rows to header width.
    async fn fetch(&self, range: &str) -> Result<Vec<Vec<String>>>;

    /// Delete data rows by 1-based index (header excluded). Implementations
    /// delete back-to-front so indexes stay stable.
    async fn delete_rows(&self, sheet_id: i64, rows: Vec<usize>) -> Result<()>;

    /// Append rows after the last row of a range.
    async fn append(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()>;

    /// Overwrite a cell range.
    async fn update(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()>;
}

/// A (University_EN, University_CN, Country_CN) reference triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniversityTriple {
    pub university_en: String,
    pub university_cn: Option<String>,
    pub country_cn: Option<String>,
}

/// The relational reference store.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// Strip trailing whitespace from stored English university names.
    async fn clean_university_names(&self) -> Result<()>;

    /// All persisted (University_EN, University_CN, Country_CN) triples,
    /// in insertion order — the latest match wins during enrichment.
    async fn university_triples(&self) -> Result<Vec<UniversityTriple>>;

    /// Which of the given English names already exist in the universities
    /// reference table.
    async fn universities_exist(&self, names: &[String]) -> Result<HashSet<String>>;

    /// Max Event_ID among records carrying the most recent Date; 0 when the
    /// table is empty.
    async fn max_event_id(&self) -> Result<i64>;

    /// Insert one record atomically: either the full row lands or nothing.
    async fn insert_record(&self, record: &PersistedRecord) -> Result<()>;
}

/// The notification channel.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to_email: &str, to_name: &str, subject: &str, body: &str) -> Result<()>;
}

/// The durable document holding the public-account article archive.
#[async_trait]
pub trait Document: Send + Sync {
    /// Whether the document's current text contains the needle.
    async fn contains(&self, needle: &str) -> Result<bool>;

    /// Append text at the end; when a subtitle is given it is inserted
    /// first as a styled section header.
    async fn append(&self, text: &str, subtitle: Option<&str>) -> Result<()>;
}
