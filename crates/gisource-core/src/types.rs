//! Domain types: postings, role/subject flags, deadlines, persisted records.
//!
//! Raw spreadsheet cells are messy ("1" vs 1 vs 1.0, date strings, blanks).
//! Everything is normalized here, once, at ingestion — downstream code only
//! sees the typed forms.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// True when a flag cell holds any of the accepted truthy spellings.
/// Flag columns round-trip through sheet cells as literal strings.
pub fn flag_is_set(cell: Option<&str>) -> bool {
    matches!(cell.map(str::trim), Some("1") | Some("1.0"))
}

/// Deadline cell, classified once at ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deadline {
    /// Parses as a calendar date.
    Date(NaiveDate),
    /// The literal cell value "Soon".
    Soon,
    /// Non-empty but not a date and not "Soon".
    Raw(String),
    /// Missing or blank cell.
    Missing,
}

impl Deadline {
    /// Classify a raw deadline cell.
    pub fn parse(cell: Option<&str>) -> Self {
        let Some(value) = cell.map(str::trim).filter(|v| !v.is_empty()) else {
            return Deadline::Missing;
        };
        if value == "Soon" {
            return Deadline::Soon;
        }
        match parse_date(value) {
            Some(date) => Deadline::Date(date),
            None => Deadline::Raw(value.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Deadline::Missing)
    }

    /// Render for the persisted Description and the Filled-sheet cell:
    /// dates as YYYY-MM-DD, "Soon" literally, raw values unchanged.
    pub fn display(&self) -> String {
        match self {
            Deadline::Date(d) => d.format("%Y-%m-%d").to_string(),
            Deadline::Soon => "Soon".to_string(),
            Deadline::Raw(s) => s.clone(),
            Deadline::Missing => String::new(),
        }
    }
}

/// Parse the date formats seen in intake cells.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    // Datetime cells keep a time suffix; take the date part.
    if let Some((day, _)) = value.split_once(' ') {
        return NaiveDate::parse_from_str(day, "%Y-%m-%d").ok();
    }
    None
}

/// Verb selection tag, attached to each role once instead of re-derived
/// from string membership at every render site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCategory {
    /// Degree programs: 招生 / "is recruiting".
    Enrolling,
    /// Paid positions: 招聘 / "is recruiting".
    Recruiting,
    /// Events: 举办 / "is hosting a".
    Hosting,
}

impl JobCategory {
    /// Category for an assembled job title. Multi-role titles always read
    /// as enrollment; single-role titles use the role's own category.
    pub fn for_roles(roles: &[Role]) -> Self {
        match roles {
            [single] => single.category(),
            _ => JobCategory::Enrolling,
        }
    }

    pub fn verb_cn(&self) -> &'static str {
        match self {
            JobCategory::Enrolling => "招生",
            JobCategory::Recruiting => "招聘",
            JobCategory::Hosting => "举办",
        }
    }

    pub fn verb_en(&self) -> &'static str {
        match self {
            JobCategory::Hosting => " is hosting a ",
            _ => " is recruiting ",
        }
    }
}

/// Opportunity role categories, one per role flag column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    MasterStudent,
    DoctoralStudent,
    PostDoc,
    ResearchAssistant,
    Competition,
    SummerSchool,
    Conference,
    Workshop,
}

impl Role {
    /// Column header / English title token.
    pub fn label(&self) -> &'static str {
        match self {
            Role::MasterStudent => "Master Student",
            Role::DoctoralStudent => "Doctoral Student",
            Role::PostDoc => "PostDoc",
            Role::ResearchAssistant => "Research Assistant",
            Role::Competition => "Competition",
            Role::SummerSchool => "Summer School",
            Role::Conference => "Conference",
            Role::Workshop => "Workshop",
        }
    }

    pub fn category(&self) -> JobCategory {
        match self {
            Role::MasterStudent | Role::DoctoralStudent => JobCategory::Enrolling,
            Role::PostDoc | Role::ResearchAssistant => JobCategory::Recruiting,
            Role::Competition | Role::SummerSchool | Role::Conference | Role::Workshop => {
                JobCategory::Hosting
            }
        }
    }
}

/// Role flag assembly order for job titles.
pub static TITLE_ROLE_ORDER: &[Role] = &[
    Role::MasterStudent,
    Role::DoctoralStudent,
    Role::PostDoc,
    Role::ResearchAssistant,
    Role::Competition,
    Role::SummerSchool,
    Role::Conference,
    Role::Workshop,
];

/// Role flag check order for abbreviations. Conference comes before
/// Summer School here, unlike the title order.
pub static ABBREV_ROLE_ORDER: &[Role] = &[
    Role::MasterStudent,
    Role::DoctoralStudent,
    Role::PostDoc,
    Role::ResearchAssistant,
    Role::Competition,
    Role::Conference,
    Role::SummerSchool,
    Role::Workshop,
];

/// Normalized role flags of one posting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleFlags {
    pub master_student: bool,
    pub doctoral_student: bool,
    pub postdoc: bool,
    pub research_assistant: bool,
    pub competition: bool,
    pub summer_school: bool,
    pub conference: bool,
    pub workshop: bool,
}

impl RoleFlags {
    pub fn is_set(&self, role: Role) -> bool {
        match role {
            Role::MasterStudent => self.master_student,
            Role::DoctoralStudent => self.doctoral_student,
            Role::PostDoc => self.postdoc,
            Role::ResearchAssistant => self.research_assistant,
            Role::Competition => self.competition,
            Role::SummerSchool => self.summer_school,
            Role::Conference => self.conference,
            Role::Workshop => self.workshop,
        }
    }

    /// Set roles in the given iteration order.
    pub fn active(&self, order: &[Role]) -> Vec<Role> {
        order.iter().copied().filter(|r| self.is_set(*r)).collect()
    }
}

/// Normalized subject flags of one posting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubjectFlags {
    pub physical_geo: bool,
    pub human_geo: bool,
    pub urban: bool,
    pub gis: bool,
    pub rs: bool,
    pub gnss: bool,
}

impl SubjectFlags {
    /// Flag value by subject column name.
    pub fn is_set(&self, subject: &str) -> bool {
        match subject {
            "Physical_Geo" => self.physical_geo,
            "Human_Geo" => self.human_geo,
            "Urban" => self.urban,
            "GIS" => self.gis,
            "RS" => self.rs,
            "GNSS" => self.gnss,
            _ => false,
        }
    }

    /// Any of the technical subjects that force the MSc abbreviation.
    pub fn any_technical(&self) -> bool {
        self.physical_geo || self.gis || self.rs || self.gnss
    }

    /// Any of the humanities subjects that select MA instead.
    pub fn any_humanities(&self) -> bool {
        self.human_geo || self.urban
    }
}

/// One candidate opportunity record, parsed from an intake-sheet row.
#[derive(Debug, Clone)]
pub struct Posting {
    /// 0-based data row index in the intake sheet (header excluded).
    pub row: usize,
    pub source: Option<String>,
    pub deadline: Deadline,
    pub country_cn: Option<String>,
    pub university_cn: Option<String>,
    pub university_en: Option<String>,
    pub direction: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    /// Raw cell; chat output uses it verbatim, titles parse it.
    pub number_places: Option<String>,
    pub verifier: Option<String>,
    /// Raw review marker cell; "N" means verified with no error.
    pub error: Option<String>,
    pub roles: RoleFlags,
    pub subjects: SubjectFlags,
    /// WX_Label1..WX_Label5 free-text cells.
    pub extra_labels: [Option<String>; 5],
}

impl Posting {
    /// Eligible for selection: reviewed clean, vouched by a human.
    pub fn is_eligible(&self) -> bool {
        self.error.as_deref() == Some("N")
            && self.verifier.as_deref().is_some_and(|v| !v.is_empty() && v != "LLM")
    }

    /// Position count as an integer, when the raw cell parses.
    pub fn number_places_int(&self) -> Option<i64> {
        self.number_places.as_deref()?.trim().parse().ok()
    }
}

/// The normalized record written to the reference store. Absent values are
/// `None`, never the empty string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedRecord {
    pub event_id: i64,
    pub university_cn: Option<String>,
    pub university_en: Option<String>,
    pub country_cn: Option<String>,
    pub country_en: Option<String>,
    pub job_cn: Option<String>,
    pub job_en: Option<String>,
    pub description: Option<String>,
    pub title_cn: Option<String>,
    pub title_en: Option<String>,
    pub label_physical_geo: i64,
    pub label_human_geo: i64,
    pub label_urban: i64,
    pub label_gis: i64,
    pub label_rs: i64,
    pub label_gnss: i64,
    /// Publication date, YYYY-MM-DD.
    pub date: String,
    pub university_id: Option<i64>,
    pub is_public: i64,
    pub is_deleted: i64,
    pub event_cn: Option<String>,
    pub event_en: Option<String>,
}
