//! End-to-end pipeline runner: one invocation processes one posting.
//!
//! The runner only talks to the collaborator traits, so the whole flow is
//! testable against in-memory fakes. Each step confirms its preconditions
//! before writing anywhere; a collaborator failure aborts the run with no
//! downstream step executed.

use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;

use gisource_core::config::GisourceConfig;
use gisource_core::error::{GisourceError, Result};
use gisource_core::members::GroupMembers;
use gisource_core::traits::{CandidateSource, Document, Mailer, ReferenceStore};
use gisource_core::types::{Deadline, Posting};

use crate::ingest::SheetTable;
use crate::{dateloc, notices, selector, textgen, transformer, validator};

/// Everything one run needs.
pub struct RunContext<'a> {
    pub config: &'a GisourceConfig,
    pub members: &'a GroupMembers,
    pub source: &'a dyn CandidateSource,
    pub store: &'a dyn ReferenceStore,
    pub mailer: &'a dyn Mailer,
    pub document: &'a dyn Document,
}

/// How a run ended. Every variant is a normal termination; collaborator
/// failures surface as errors instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Record persisted, sheets updated, outputs rendered and routed.
    Completed { event_id: i64 },
    /// Empty selection pool; reminder broadcast sent.
    NoEligibleCandidates,
    /// Required field missing; the verifier was notified.
    ValidationFailed { verifier: String },
    /// Required field missing and the verifier is not in the directory.
    UnknownVerifier { verifier: String },
    /// No role flag produced an abbreviation; chat and article steps were
    /// skipped. The record was already persisted.
    AbbreviationUnavailable { event_id: i64 },
}

impl<'a> RunContext<'a> {
    /// Today in the configured timezone.
    fn today(&self) -> NaiveDate {
        (Utc::now() + Duration::hours(self.config.timezone_offset_hours as i64)).date_naive()
    }

    /// Process one posting end to end.
    pub async fn run<R: Rng + Send>(&self, rng: &mut R) -> Result<RunOutcome> {
        let today = self.today();

        let mut unfilled = self.load_intake(today).await?;
        self.enrich_universities(&mut unfilled).await?;
        self.sync_new_universities().await?;

        let pool: Vec<Posting> = unfilled
            .postings()
            .into_iter()
            .filter(Posting::is_eligible)
            .collect();
        let Some(posting) = selector::select_posting(&pool, today, rng).cloned() else {
            tracing::info!("⚠ No eligible postings, broadcasting reminder");
            self.broadcast_reminder().await?;
            return Ok(RunOutcome::NoEligibleCandidates);
        };
        tracing::info!("✓ Selected intake row {}", posting.row + 1);

        if !validator::required_fields_complete(&posting) {
            return self.notify_validation_failure(&posting, today).await;
        }
        tracing::info!("✓ Required fields complete");

        let event_id = self.store.max_event_id().await? + 1;
        let record = transformer::build_record(&posting, event_id, today);
        self.store.insert_record(&record).await?;
        tracing::info!("✓ Record persisted, event id {event_id}");

        self.republish_sheets(&mut unfilled, &posting).await?;

        let Some(abbreviation) = textgen::abbreviation(&posting) else {
            tracing::warn!("⚠ No role flag set, skipping chat and article output");
            return Ok(RunOutcome::AbbreviationUnavailable { event_id });
        };

        self.send_chat_prompt(&posting, &abbreviation, event_id, today)
            .await?;
        self.publish_article(&posting, &abbreviation, today).await?;

        Ok(RunOutcome::Completed { event_id })
    }

    /// Fetch the intake range, purge expired rows, and refetch.
    async fn load_intake(&self, today: NaiveDate) -> Result<SheetTable> {
        let range = &self.config.sheets.unfilled_range;
        let table = SheetTable::from_values(self.source.fetch(range).await?)?;

        let expired = table.expired_rows(today);
        if expired.is_empty() {
            tracing::info!("No expired rows to delete");
            return Ok(table);
        }

        tracing::info!("🧹 Deleting {} expired rows", expired.len());
        self.source
            .delete_rows(self.config.sheets.unfilled_sheet_id, expired)
            .await?;
        SheetTable::from_values(self.source.fetch(range).await?)
    }

    /// Fill missing Chinese names from the reference store, latest match
    /// first, and write repaired rows back.
    async fn enrich_universities(&self, table: &mut SheetTable) -> Result<()> {
        self.store.clean_university_names().await?;
        let triples = self.store.university_triples().await?;

        let mut modified = Vec::new();
        for row in 0..table.len() {
            let Some(university_en) = table
                .cell(row, "University_EN")
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
            else {
                continue;
            };
            let needs_cn = table.cell(row, "University_CN").is_none_or(|v| v.trim().is_empty());
            let needs_country = table.cell(row, "Country_CN").is_none_or(|v| v.trim().is_empty());
            if !needs_cn && !needs_country {
                continue;
            }
            let Some(triple) = triples
                .iter()
                .rev()
                .find(|t| t.university_en == university_en)
            else {
                continue;
            };
            if needs_cn {
                table.set_cell(row, "University_CN", triple.university_cn.clone());
            }
            if needs_country {
                table.set_cell(row, "Country_CN", triple.country_cn.clone());
            }
            modified.push(row);
        }

        for row in &modified {
            let range = format!(
                "{}!A{}:Z{}",
                self.config.sheets.unfilled_range,
                row + 2,
                row + 2
            );
            self.source
                .update(&range, vec![table.row_values(*row)])
                .await?;
        }
        if !modified.is_empty() {
            tracing::info!("✓ Enriched {} intake rows", modified.len());
        }
        Ok(())
    }

    /// Append universities seen in the Filled sheet but absent from both
    /// the reference store and the Universities sheet.
    async fn sync_new_universities(&self) -> Result<()> {
        let filled =
            SheetTable::from_values(self.source.fetch(&self.config.sheets.filled_range).await?)?;

        // Deduplicate by English name, first occurrence wins.
        let mut unique: Vec<(String, String, String)> = Vec::new();
        for row in 0..filled.len() {
            let Some(en) = filled.cell(row, "University_EN").filter(|v| !v.trim().is_empty())
            else {
                continue;
            };
            if unique.iter().any(|(seen, _, _)| seen.as_str() == en) {
                continue;
            }
            unique.push((
                en.to_string(),
                filled.cell(row, "University_CN").unwrap_or_default().to_string(),
                filled.cell(row, "Country_CN").unwrap_or_default().to_string(),
            ));
        }
        if unique.is_empty() {
            return Ok(());
        }

        let names: Vec<String> = unique.iter().map(|(en, _, _)| en.clone()).collect();
        let existing = self.store.universities_exist(&names).await?;
        let candidates: Vec<_> = unique
            .into_iter()
            .filter(|(en, _, _)| !existing.contains(en))
            .collect();
        if candidates.is_empty() {
            return Ok(());
        }

        let sheet_values = self
            .source
            .fetch(&self.config.sheets.universities_range)
            .await?;
        let universities_sheet = if sheet_values.is_empty() {
            SheetTable::empty(vec![
                "University_EN".into(),
                "University_CN".into(),
                "Country_CN".into(),
            ])
        } else {
            SheetTable::from_values(sheet_values)?
        };
        let on_sheet: Vec<String> = (0..universities_sheet.len())
            .filter_map(|row| universities_sheet.cell(row, "University_EN"))
            .map(str::to_string)
            .collect();

        let rows: Vec<Vec<String>> = candidates
            .into_iter()
            .filter(|(en, _, _)| !on_sheet.iter().any(|seen| seen == en))
            .map(|(en, cn, country)| vec![en, cn, country])
            .collect();
        if rows.is_empty() {
            return Ok(());
        }

        tracing::info!("✓ Adding {} new universities", rows.len());
        self.source
            .append(&self.config.sheets.universities_range, rows)
            .await
    }

    async fn broadcast_reminder(&self) -> Result<()> {
        let (subject, body) = notices::reminder(&self.config.spreadsheet_url());
        for (name, email) in self.members.iter() {
            self.mailer.send(email, name, &subject, &body).await?;
        }
        Ok(())
    }

    async fn notify_validation_failure(
        &self,
        posting: &Posting,
        today: NaiveDate,
    ) -> Result<RunOutcome> {
        // Eligibility guarantees a verifier name is present.
        let verifier = posting.verifier.clone().unwrap_or_default();
        let Some(email) = self.members.get(&verifier) else {
            tracing::warn!("⚠ Verifier {verifier} is not in the group member directory");
            return Ok(RunOutcome::UnknownVerifier { verifier });
        };

        let (subject, body) = notices::error_notice(
            &verifier,
            posting.university_cn.as_deref().unwrap_or_default(),
            posting.direction.as_deref().unwrap_or_default(),
            posting.source.as_deref().unwrap_or_default(),
            &today.format("%Y-%m-%d").to_string(),
        );
        self.mailer.send(email, &verifier, &subject, &body).await?;
        tracing::warn!("⚠ Validation failed, notified {verifier}");
        Ok(RunOutcome::ValidationFailed { verifier })
    }

    /// Move the processed posting from the intake sheet to the Filled sheet.
    async fn republish_sheets(&self, table: &mut SheetTable, posting: &Posting) -> Result<()> {
        // Re-fetch to locate the row: the sheet may have moved under us.
        let range = &self.config.sheets.unfilled_range;
        let current = SheetTable::from_values(self.source.fetch(range).await?)?;
        let rows_to_delete: Vec<usize> = (0..current.len())
            .filter(|&row| {
                current.cell(row, "Source") == posting.source.as_deref()
                    && current.cell(row, "Direction") == posting.direction.as_deref()
            })
            .map(|row| row + 1)
            .collect();
        if !rows_to_delete.is_empty() {
            self.source
                .delete_rows(self.config.sheets.unfilled_sheet_id, rows_to_delete)
                .await?;
        }

        // Republish with a cleared Error cell and a normalized date cell.
        table.set_cell(posting.row, "Error", Some(validator::CLEAN_MARKER.to_string()));
        if let Deadline::Date(_) = posting.deadline {
            table.set_cell(posting.row, "Deadline", Some(posting.deadline.display()));
        }
        self.source
            .append(
                &self.config.sheets.filled_range,
                vec![table.row_values(posting.row)],
            )
            .await?;
        tracing::info!("✓ Intake row moved to {}", self.config.sheets.filled_range);
        Ok(())
    }

    async fn send_chat_prompt(
        &self,
        posting: &Posting,
        abbreviation: &str,
        event_id: i64,
        today: NaiveDate,
    ) -> Result<()> {
        let text = textgen::chat_message(
            posting,
            abbreviation,
            event_id,
            &self.config.permalink_base,
        );
        tracing::info!("📨 Chat message:\n{text}");

        let operator = self.config.operator.as_str();
        let recipient = if self.members.contains(operator) {
            operator
        } else {
            "GISphere"
        };
        let email = self
            .members
            .get(recipient)
            .or_else(|| self.members.first_email())
            .ok_or_else(|| GisourceError::Mail("Group member directory is empty".into()))?;

        let (subject, body) = notices::chat_prompt(
            recipient,
            &text,
            posting.direction.as_deref().unwrap_or_default(),
            &today.format("%Y-%m-%d").to_string(),
        );
        self.mailer.send(email, recipient, &subject, &body).await?;
        tracing::info!("✓ Chat prompt sent to {recipient}");
        Ok(())
    }

    async fn publish_article(
        &self,
        posting: &Posting,
        abbreviation: &str,
        today: NaiveDate,
    ) -> Result<()> {
        let article = textgen::article(posting, abbreviation);
        tracing::info!("📰 Article:\n{article}");

        let (week_start, week_end) = dateloc::week_range(today);
        let subtitle = format!("Week: {week_start} to {week_end}");

        let subtitle_exists = self.document.contains(&subtitle).await?;
        let article_exists = self.document.contains(&article).await?;

        if !subtitle_exists && !article_exists {
            self.document.append(&article, Some(&subtitle)).await?;
            tracing::info!("✓ Date subtitle and article added to the document");
        } else if subtitle_exists && !article_exists {
            self.document.append(&article, None).await?;
            tracing::info!("✓ Article added under the existing date subtitle");
        } else {
            tracing::info!("No new content added; the article already exists in the document");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gisource_core::traits::UniversityTriple;
    use gisource_core::types::PersistedRecord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    const HEADERS: &[&str] = &[
        "Source",
        "Deadline",
        "Country_CN",
        "University_CN",
        "University_EN",
        "Direction",
        "Contact_Name",
        "Contact_Email",
        "Number_Places",
        "Verifier",
        "Error",
        "Master Student",
        "Doctoral Student",
        "PostDoc",
        "Research Assistant",
        "Competition",
        "Summer School",
        "Conference",
        "Workshop",
        "Physical_Geo",
        "Human_Geo",
        "Urban",
        "GIS",
        "RS",
        "GNSS",
    ];

    fn header_row() -> Vec<String> {
        HEADERS.iter().map(|h| h.to_string()).collect()
    }

    fn mit_row() -> Vec<String> {
        let mut row = vec![String::new(); HEADERS.len()];
        row[0] = "https://example.edu/mit-gis".into();
        row[1] = "Soon".into();
        row[2] = "美国".into();
        row[3] = "麻省理工学院".into();
        row[4] = "MIT".into();
        row[5] = "GIS".into();
        row[6] = "Dr. Smith".into();
        row[7] = "smith@mit.edu".into();
        row[8] = "2".into();
        row[9] = "王五".into();
        row[10] = "N".into();
        row[11] = "1".into();
        row[22] = "1".into();
        row
    }

    #[derive(Default)]
    struct FakeSource {
        tables: Mutex<HashMap<String, Vec<Vec<String>>>>,
        deleted: Mutex<Vec<usize>>,
        appended: Mutex<Vec<(String, Vec<Vec<String>>)>>,
        updated: Mutex<Vec<(String, Vec<Vec<String>>)>>,
    }

    impl FakeSource {
        fn with_unfilled(rows: Vec<Vec<String>>) -> Self {
            let mut values = vec![header_row()];
            values.extend(rows);
            let mut tables = HashMap::new();
            tables.insert("Unfilled".to_string(), values);
            tables.insert("Filled".to_string(), vec![header_row()]);
            tables.insert(
                "Universities".to_string(),
                vec![vec![
                    "University_EN".to_string(),
                    "University_CN".to_string(),
                    "Country_CN".to_string(),
                ]],
            );
            Self {
                tables: Mutex::new(tables),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl CandidateSource for FakeSource {
        async fn fetch(&self, range: &str) -> Result<Vec<Vec<String>>> {
            Ok(self
                .tables
                .lock()
                .unwrap()
                .get(range)
                .cloned()
                .unwrap_or_default())
        }

        async fn delete_rows(&self, _sheet_id: i64, rows: Vec<usize>) -> Result<()> {
            self.deleted.lock().unwrap().extend(rows);
            Ok(())
        }

        async fn append(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
            self.appended
                .lock()
                .unwrap()
                .push((range.to_string(), rows));
            Ok(())
        }

        async fn update(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
            self.updated
                .lock()
                .unwrap()
                .push((range.to_string(), rows));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeStore {
        triples: Vec<UniversityTriple>,
        existing: HashSet<String>,
        max_id: i64,
        fail_insert: bool,
        inserted: Mutex<Vec<PersistedRecord>>,
    }

    #[async_trait]
    impl ReferenceStore for FakeStore {
        async fn clean_university_names(&self) -> Result<()> {
            Ok(())
        }

        async fn university_triples(&self) -> Result<Vec<UniversityTriple>> {
            Ok(self.triples.clone())
        }

        async fn universities_exist(&self, names: &[String]) -> Result<HashSet<String>> {
            Ok(names
                .iter()
                .filter(|n| self.existing.contains(*n))
                .cloned()
                .collect())
        }

        async fn max_event_id(&self) -> Result<i64> {
            Ok(self.max_id)
        }

        async fn insert_record(&self, record: &PersistedRecord) -> Result<()> {
            if self.fail_insert {
                return Err(GisourceError::Database("insert failed".into()));
            }
            self.inserted.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeMailer {
        sent: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl Mailer for FakeMailer {
        async fn send(
            &self,
            to_email: &str,
            _to_name: &str,
            subject: &str,
            body: &str,
        ) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((to_email.to_string(), subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeDocument {
        text: Mutex<String>,
        appended: Mutex<Vec<(String, Option<String>)>>,
    }

    #[async_trait]
    impl Document for FakeDocument {
        async fn contains(&self, needle: &str) -> Result<bool> {
            Ok(self.text.lock().unwrap().contains(needle))
        }

        async fn append(&self, text: &str, subtitle: Option<&str>) -> Result<()> {
            self.appended
                .lock()
                .unwrap()
                .push((text.to_string(), subtitle.map(str::to_string)));
            let mut doc = self.text.lock().unwrap();
            if let Some(sub) = subtitle {
                doc.push_str(sub);
            }
            doc.push_str(text);
            Ok(())
        }
    }

    fn test_config() -> GisourceConfig {
        let mut config = GisourceConfig::default();
        config.operator = "李雷".into();
        config.sheets.spreadsheet_id = "sheet123".into();
        config
    }

    fn test_members() -> GroupMembers {
        GroupMembers::parse("王五,wangwu@example.com\n李雷,lilei@example.com\n")
    }

    #[tokio::test]
    async fn test_completed_run_persists_and_republishes() {
        let config = test_config();
        let members = test_members();
        let source = FakeSource::with_unfilled(vec![mit_row()]);
        let store = FakeStore {
            max_id: 1000,
            ..Default::default()
        };
        let mailer = FakeMailer::default();
        let document = FakeDocument::default();

        let ctx = RunContext {
            config: &config,
            members: &members,
            source: &source,
            store: &store,
            mailer: &mailer,
            document: &document,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = ctx.run(&mut rng).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed { event_id: 1001 });

        let inserted = store.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].event_id, 1001);
        assert_eq!(inserted[0].job_en.as_deref(), Some("Master Student"));

        // The intake row was deleted and re-appended to Filled.
        assert_eq!(*source.deleted.lock().unwrap(), vec![1]);
        let appended = source.appended.lock().unwrap();
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].0, "Filled");

        // Chat prompt went to the operator.
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "lilei@example.com");
        assert!(sent[0].1.starts_with("微信群信息发送通知"));
        assert!(sent[0].2.contains("美国麻省理工学院GIS方向2名MSc机会"));

        // Article landed in the document with a week subtitle.
        let doc_appends = document.appended.lock().unwrap();
        assert_eq!(doc_appends.len(), 1);
        assert!(doc_appends[0].1.as_deref().unwrap().starts_with("Week: "));
    }

    #[tokio::test]
    async fn test_empty_pool_broadcasts_reminder() {
        let config = test_config();
        let members = test_members();
        let source = FakeSource::with_unfilled(Vec::new());
        let store = FakeStore::default();
        let mailer = FakeMailer::default();
        let document = FakeDocument::default();

        let ctx = RunContext {
            config: &config,
            members: &members,
            source: &source,
            store: &store,
            mailer: &mailer,
            document: &document,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = ctx.run(&mut rng).await.unwrap();
        assert_eq!(outcome, RunOutcome::NoEligibleCandidates);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|(_, subject, _)| subject == "GISource提醒：添加内容"));
        assert!(store.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_validation_failure_notifies_verifier_only() {
        let config = test_config();
        let members = test_members();
        let mut row = mit_row();
        row[5] = String::new(); // Direction missing
        let source = FakeSource::with_unfilled(vec![row]);
        let store = FakeStore::default();
        let mailer = FakeMailer::default();
        let document = FakeDocument::default();

        let ctx = RunContext {
            config: &config,
            members: &members,
            source: &source,
            store: &store,
            mailer: &mailer,
            document: &document,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = ctx.run(&mut rng).await.unwrap();
        assert_eq!(
            outcome,
            RunOutcome::ValidationFailed {
                verifier: "王五".into()
            }
        );

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "wangwu@example.com");
        assert!(sent[0].1.starts_with("GISource信息错误提醒"));

        // Nothing persisted, nothing moved.
        assert!(store.inserted.lock().unwrap().is_empty());
        assert!(source.appended.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_verifier_sends_no_mail() {
        let config = test_config();
        let members = test_members();
        let mut row = mit_row();
        row[5] = String::new(); // Direction missing
        row[9] = "陌生人".into();
        let source = FakeSource::with_unfilled(vec![row]);
        let store = FakeStore::default();
        let mailer = FakeMailer::default();
        let document = FakeDocument::default();

        let ctx = RunContext {
            config: &config,
            members: &members,
            source: &source,
            store: &store,
            mailer: &mailer,
            document: &document,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = ctx.run(&mut rng).await.unwrap();
        assert_eq!(
            outcome,
            RunOutcome::UnknownVerifier {
                verifier: "陌生人".into()
            }
        );
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_aborts_before_sheet_moves() {
        let config = test_config();
        let members = test_members();
        let source = FakeSource::with_unfilled(vec![mit_row()]);
        let store = FakeStore {
            fail_insert: true,
            ..Default::default()
        };
        let mailer = FakeMailer::default();
        let document = FakeDocument::default();

        let ctx = RunContext {
            config: &config,
            members: &members,
            source: &source,
            store: &store,
            mailer: &mailer,
            document: &document,
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(ctx.run(&mut rng).await.is_err());

        // No downstream side effects after the failed insert.
        assert!(source.deleted.lock().unwrap().is_empty());
        assert!(source.appended.lock().unwrap().is_empty());
        assert!(mailer.sent.lock().unwrap().is_empty());
        assert!(document.appended.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_role_flag_persists_but_skips_outputs() {
        let config = test_config();
        let members = test_members();
        let mut row = mit_row();
        row[11] = String::new(); // no role flag at all
        let source = FakeSource::with_unfilled(vec![row]);
        let store = FakeStore::default();
        let mailer = FakeMailer::default();
        let document = FakeDocument::default();

        let ctx = RunContext {
            config: &config,
            members: &members,
            source: &source,
            store: &store,
            mailer: &mailer,
            document: &document,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = ctx.run(&mut rng).await.unwrap();
        assert_eq!(outcome, RunOutcome::AbbreviationUnavailable { event_id: 1 });

        // The record and the sheet move happened; chat and article did not.
        assert_eq!(store.inserted.lock().unwrap().len(), 1);
        assert_eq!(source.appended.lock().unwrap().len(), 1);
        assert!(mailer.sent.lock().unwrap().is_empty());
        assert!(document.appended.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_names_enriched_from_store() {
        let config = test_config();
        let members = test_members();
        let mut row = mit_row();
        row[2] = String::new();
        row[3] = String::new();
        let source = FakeSource::with_unfilled(vec![row]);
        let store = FakeStore {
            triples: vec![UniversityTriple {
                university_en: "MIT".into(),
                university_cn: Some("麻省理工学院".into()),
                country_cn: Some("美国".into()),
            }],
            max_id: 5,
            ..Default::default()
        };
        let mailer = FakeMailer::default();
        let document = FakeDocument::default();

        let ctx = RunContext {
            config: &config,
            members: &members,
            source: &source,
            store: &store,
            mailer: &mailer,
            document: &document,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = ctx.run(&mut rng).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed { event_id: 6 });

        // The repaired row was written back to the intake sheet.
        let updated = source.updated.lock().unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].0, "Unfilled!A2:Z2");
        assert_eq!(updated[0].1[0][2], "美国");
        assert_eq!(updated[0].1[0][3], "麻省理工学院");
    }
}
