//! # GISource Store
//! MySQL reference store: university triples, event ids, and the atomic
//! persisted-record insert.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::Row;

use gisource_core::config::DatabaseConfig;
use gisource_core::error::{GisourceError, Result};
use gisource_core::traits::{ReferenceStore, UniversityTriple};
use gisource_core::types::PersistedRecord;

/// MySQL-backed reference store.
pub struct MySqlStore {
    pool: MySqlPool,
    event_table: String,
    universities_table: String,
}

fn db_err(e: sqlx::Error) -> GisourceError {
    GisourceError::Database(e.to_string())
}

impl MySqlStore {
    /// Connect with a bounded wait; a down database fails the run here,
    /// before any external write happens.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_with(options)
            .await
            .map_err(db_err)?;
        tracing::info!("🗄 Connected to database {}", config.database);

        Ok(Self {
            pool,
            event_table: config.event_table.clone(),
            universities_table: config.universities_table.clone(),
        })
    }
}

#[async_trait]
impl ReferenceStore for MySqlStore {
    async fn clean_university_names(&self) -> Result<()> {
        let sql = format!(
            "UPDATE {} SET University_Name_EN = RTRIM(University_Name_EN)",
            self.universities_table
        );
        sqlx::query(&sql).execute(&self.pool).await.map_err(db_err)?;
        Ok(())
    }

    async fn university_triples(&self) -> Result<Vec<UniversityTriple>> {
        let sql = format!(
            "SELECT University_EN, University_CN, Country_CN FROM {}",
            self.event_table
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await.map_err(db_err)?;
        rows.into_iter()
            .map(|row| {
                Ok(UniversityTriple {
                    university_en: row
                        .try_get::<Option<String>, _>(0)
                        .map_err(db_err)?
                        .unwrap_or_default(),
                    university_cn: row.try_get(1).map_err(db_err)?,
                    country_cn: row.try_get(2).map_err(db_err)?,
                })
            })
            .collect()
    }

    async fn universities_exist(&self, names: &[String]) -> Result<HashSet<String>> {
        if names.is_empty() {
            return Ok(HashSet::new());
        }
        let placeholders = vec!["?"; names.len()].join(",");
        let sql = format!(
            "SELECT University_Name_EN FROM {} WHERE University_Name_EN IN ({placeholders})",
            self.universities_table
        );
        let mut query = sqlx::query(&sql);
        for name in names {
            query = query.bind(name);
        }
        let rows = query.fetch_all(&self.pool).await.map_err(db_err)?;
        rows.into_iter()
            .map(|row| row.try_get::<String, _>(0).map_err(db_err))
            .collect()
    }

    async fn max_event_id(&self) -> Result<i64> {
        // CAST keeps the decode at BIGINT regardless of the column type.
        let sql = format!(
            "SELECT CAST(MAX(Event_ID) AS SIGNED) FROM {table} \
             WHERE Date = (SELECT MAX(Date) FROM {table})",
            table = self.event_table
        );
        let row = sqlx::query(&sql).fetch_one(&self.pool).await.map_err(db_err)?;
        Ok(row.try_get::<Option<i64>, _>(0).map_err(db_err)?.unwrap_or(0))
    }

    async fn insert_record(&self, record: &PersistedRecord) -> Result<()> {
        let sql = format!(
            "INSERT INTO {} (Event_ID, University_CN, University_EN, Country_CN, Country_EN, \
             Job_CN, Job_EN, Description, Title_CN, Title_EN, Label_Physical_Geo, \
             Label_Human_Geo, Label_Urban, Label_GIS, Label_RS, Label_GNSS, Date, \
             University_ID, IS_Public, IS_Deleted, Event_CN, EVENT_EN) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            self.event_table
        );
        sqlx::query(&sql)
            .bind(record.event_id)
            .bind(&record.university_cn)
            .bind(&record.university_en)
            .bind(&record.country_cn)
            .bind(&record.country_en)
            .bind(&record.job_cn)
            .bind(&record.job_en)
            .bind(&record.description)
            .bind(&record.title_cn)
            .bind(&record.title_en)
            .bind(record.label_physical_geo)
            .bind(record.label_human_geo)
            .bind(record.label_urban)
            .bind(record.label_gis)
            .bind(record.label_rs)
            .bind(record.label_gnss)
            .bind(&record.date)
            .bind(record.university_id)
            .bind(record.is_public)
            .bind(record.is_deleted)
            .bind(&record.event_cn)
            .bind(&record.event_en)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        tracing::info!("✓ Event {} inserted into {}", record.event_id, self.event_table);
        Ok(())
    }
}
