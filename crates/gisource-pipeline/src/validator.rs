//! Required-field validation of a selected posting.

use gisource_core::types::Posting;

/// Error marker written back to the intake sheet's Error cell.
pub const ERROR_MARKER: &str = "1";
/// Marker for a posting that passed the check.
pub const CLEAN_MARKER: &str = "";

/// The fixed required-field set. Contact fields are deliberately not part
/// of it: a posting without a contact email still publishes.
pub static REQUIRED_FIELDS: &[&str] = &[
    "Source",
    "Deadline",
    "Country_CN",
    "University_CN",
    "University_EN",
    "Direction",
];

/// True when every required field is present and non-blank. A malformed
/// deadline string still counts as present; only a blank cell fails.
pub fn required_fields_complete(posting: &Posting) -> bool {
    posting.source.is_some()
        && !posting.deadline.is_missing()
        && posting.country_cn.is_some()
        && posting.university_cn.is_some()
        && posting.university_en.is_some()
        && posting.direction.is_some()
}

/// The Error-cell value for a validation result.
pub fn error_marker(complete: bool) -> &'static str {
    if complete {
        CLEAN_MARKER
    } else {
        ERROR_MARKER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gisource_core::types::{Deadline, Posting, RoleFlags, SubjectFlags};

    fn complete_posting() -> Posting {
        Posting {
            row: 0,
            source: Some("https://example.edu/job".into()),
            deadline: Deadline::Soon,
            country_cn: Some("美国".into()),
            university_cn: Some("麻省理工学院".into()),
            university_en: Some("MIT".into()),
            direction: Some("GIS".into()),
            contact_name: Some("Dr. Smith".into()),
            contact_email: None,
            number_places: None,
            verifier: Some("王五".into()),
            error: Some("N".into()),
            roles: RoleFlags::default(),
            subjects: SubjectFlags::default(),
            extra_labels: Default::default(),
        }
    }

    #[test]
    fn test_missing_contact_email_is_not_an_error() {
        let posting = complete_posting();
        assert!(required_fields_complete(&posting));
        assert_eq!(error_marker(true), "");
    }

    #[test]
    fn test_each_required_field_gates_the_check() {
        let mut p = complete_posting();
        p.source = None;
        assert!(!required_fields_complete(&p));

        let mut p = complete_posting();
        p.deadline = Deadline::Missing;
        assert!(!required_fields_complete(&p));

        let mut p = complete_posting();
        p.country_cn = None;
        assert!(!required_fields_complete(&p));

        let mut p = complete_posting();
        p.university_cn = None;
        assert!(!required_fields_complete(&p));

        let mut p = complete_posting();
        p.university_en = None;
        assert!(!required_fields_complete(&p));

        let mut p = complete_posting();
        p.direction = None;
        assert!(!required_fields_complete(&p));
        assert_eq!(error_marker(false), "1");
    }

    #[test]
    fn test_malformed_deadline_still_counts_as_present() {
        let mut p = complete_posting();
        p.deadline = Deadline::Raw("rolling basis".into());
        assert!(required_fields_complete(&p));
    }
}
