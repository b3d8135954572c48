//! GISource configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GisourceError, Result};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GisourceConfig {
    /// Name of the person operating this run; chat prompts go to them.
    #[serde(default = "default_operator")]
    pub operator: String,
    /// Path to the group member directory file (one "name,email" per line).
    #[serde(default = "default_members_file")]
    pub group_members_file: String,
    /// Fixed UTC offset in hours for "today" computations (8 = Asia/Shanghai).
    #[serde(default = "default_tz_offset")]
    pub timezone_offset_hours: i32,
    /// Base URL for persisted-posting permalinks.
    #[serde(default = "default_permalink_base")]
    pub permalink_base: String,
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

fn default_operator() -> String { "GISphere".into() }
fn default_members_file() -> String { "~/.gisource/group_members.txt".into() }
fn default_tz_offset() -> i32 { 8 }
fn default_permalink_base() -> String { "https://gisphere.info/post/".into() }

impl Default for GisourceConfig {
    fn default() -> Self {
        Self {
            operator: default_operator(),
            group_members_file: default_members_file(),
            timezone_offset_hours: default_tz_offset(),
            permalink_base: default_permalink_base(),
            sheets: SheetsConfig::default(),
            docs: DocsConfig::default(),
            smtp: SmtpConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl GisourceConfig {
    /// Load config from the default path (~/.gisource/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GisourceError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| GisourceError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| GisourceError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the GISource home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gisource")
    }

    /// Intake spreadsheet URL, used in reminder emails.
    pub fn spreadsheet_url(&self) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/edit#gid={}",
            self.sheets.spreadsheet_id, self.sheets.unfilled_sheet_id
        )
    }
}

/// Google Sheets configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    /// Numeric sheet id of the intake tab (row deletion targets it).
    #[serde(default)]
    pub unfilled_sheet_id: i64,
    /// OAuth access token with the spreadsheets scope, provisioned externally.
    pub access_token: String,
    #[serde(default = "default_unfilled_range")]
    pub unfilled_range: String,
    #[serde(default = "default_filled_range")]
    pub filled_range: String,
    #[serde(default = "default_universities_range")]
    pub universities_range: String,
}

fn default_unfilled_range() -> String { "Unfilled".into() }
fn default_filled_range() -> String { "Filled".into() }
fn default_universities_range() -> String { "Universities".into() }

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            unfilled_sheet_id: 0,
            access_token: String::new(),
            unfilled_range: default_unfilled_range(),
            filled_range: default_filled_range(),
            universities_range: default_universities_range(),
        }
    }
}

/// Google Docs configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocsConfig {
    pub document_id: String,
    /// OAuth access token with the documents scope, provisioned externally.
    pub access_token: String,
}

/// SMTP configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
}

fn default_smtp_host() -> String { "smtp.gmail.com".into() }
fn default_smtp_port() -> u16 { 587 }

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
        }
    }
}

/// MySQL reference store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Target table for persisted records.
    #[serde(default = "default_event_table")]
    pub event_table: String,
    /// Universities reference table.
    #[serde(default = "default_universities_table")]
    pub universities_table: String,
    /// Bounded wait for the initial connection attempt.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_db_host() -> String { "localhost".into() }
fn default_db_port() -> u16 { 3306 }
fn default_event_table() -> String { "GISource".into() }
fn default_universities_table() -> String { "new_Universities".into() }
fn default_connect_timeout() -> u64 { 60 }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            user: String::new(),
            password: String::new(),
            database: String::new(),
            event_table: default_event_table(),
            universities_table: default_universities_table(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}
