//! Intake-sheet ingestion: header mapping, short-row padding, and the
//! one-time normalization of raw cells into typed `Posting`s.

use chrono::NaiveDate;
use gisource_core::error::{GisourceError, Result};
use gisource_core::types::{flag_is_set, Deadline, Posting, RoleFlags, SubjectFlags};

/// A fetched sheet range: header row + data rows padded to header width.
/// `None` cells mark values that were never present (short rows), as
/// opposed to cells holding an empty string.
#[derive(Debug, Clone)]
pub struct SheetTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl SheetTable {
    /// Build from raw fetched values. The first row is the header; every
    /// data row is padded with explicit no-value markers to header width.
    pub fn from_values(values: Vec<Vec<String>>) -> Result<Self> {
        let mut iter = values.into_iter();
        let headers = iter
            .next()
            .ok_or_else(|| GisourceError::Sheet("Range has no header row".into()))?;
        let rows = iter
            .map(|row| {
                let mut cells: Vec<Option<String>> = row.into_iter().map(Some).collect();
                cells.resize(headers.len(), None);
                cells
            })
            .collect();
        Ok(Self { headers, rows })
    }

    /// An empty table with the given headers; used when a range has no
    /// content yet.
    pub fn empty(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn col(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell by data-row index and column name. `None` for absent columns,
    /// padded cells, and out-of-range rows.
    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.col(name)?;
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Overwrite a cell; ignored when the column does not exist.
    pub fn set_cell(&mut self, row: usize, name: &str, value: Option<String>) {
        if let Some(col) = self.col(name) {
            if let Some(cells) = self.rows.get_mut(row) {
                cells[col] = value;
            }
        }
    }

    /// A data row flattened for sheet writes; no-value markers become
    /// empty cells.
    pub fn row_values(&self, row: usize) -> Vec<String> {
        self.rows
            .get(row)
            .map(|cells| {
                cells
                    .iter()
                    .map(|c| c.clone().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 1-based sheet delete indexes of rows whose dated deadline is
    /// strictly before today. "Soon" and malformed deadlines never expire.
    pub fn expired_rows(&self, today: NaiveDate) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|&row| {
                matches!(
                    Deadline::parse(self.cell(row, "Deadline")),
                    Deadline::Date(date) if date < today
                )
            })
            .map(|row| row + 1)
            .collect()
    }

    /// Parse one data row into a typed posting.
    pub fn posting(&self, row: usize) -> Posting {
        let text = |name: &str| {
            self.cell(row, name)
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        };
        let flag = |name: &str| flag_is_set(self.cell(row, name));

        Posting {
            row,
            source: text("Source"),
            deadline: Deadline::parse(self.cell(row, "Deadline")),
            country_cn: text("Country_CN"),
            university_cn: text("University_CN"),
            university_en: text("University_EN"),
            direction: text("Direction"),
            contact_name: text("Contact_Name"),
            contact_email: text("Contact_Email"),
            number_places: text("Number_Places").map(|v| v.trim().to_string()),
            verifier: text("Verifier"),
            error: text("Error"),
            roles: RoleFlags {
                master_student: flag("Master Student"),
                doctoral_student: flag("Doctoral Student"),
                postdoc: flag("PostDoc"),
                research_assistant: flag("Research Assistant"),
                competition: flag("Competition"),
                summer_school: flag("Summer School"),
                conference: flag("Conference"),
                workshop: flag("Workshop"),
            },
            subjects: SubjectFlags {
                physical_geo: flag("Physical_Geo"),
                human_geo: flag("Human_Geo"),
                urban: flag("Urban"),
                gis: flag("GIS"),
                rs: flag("RS"),
                gnss: flag("GNSS"),
            },
            extra_labels: [
                text("WX_Label1"),
                text("WX_Label2"),
                text("WX_Label3"),
                text("WX_Label4"),
                text("WX_Label5"),
            ],
        }
    }

    /// All data rows as postings.
    pub fn postings(&self) -> Vec<Posting> {
        (0..self.rows.len()).map(|row| self.posting(row)).collect()
    }
}
