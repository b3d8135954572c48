//! Social-text rendering: the group chat message and the public-account
//! article template.

use gisource_core::lexicon;
use gisource_core::types::{Posting, Role, ABBREV_ROLE_ORDER};

use crate::dateloc;

/// Role abbreviation for one set role. The master-student abbreviation
/// depends on the posting's subjects: humanities-only postings read MA,
/// anything touching a technical subject reads MSc.
fn role_abbreviation(role: Role, posting: &Posting) -> &'static str {
    match role {
        Role::MasterStudent => {
            if posting.subjects.any_humanities() && !posting.subjects.any_technical() {
                "MA"
            } else {
                "MSc"
            }
        }
        Role::DoctoralStudent => "PhD",
        Role::PostDoc => "PostDoc",
        Role::ResearchAssistant => "RA",
        Role::Competition => "Competition",
        Role::Conference => "Conference",
        Role::SummerSchool => "Summer School",
        Role::Workshop => "Workshop",
    }
}

/// Comma-joined abbreviations of all set role flags, in fixed check order.
/// `None` when no flag is set — callers must treat that as cannot-proceed.
pub fn abbreviation(posting: &Posting) -> Option<String> {
    let parts: Vec<&str> = posting
        .roles
        .active(ABBREV_ROLE_ORDER)
        .iter()
        .map(|role| role_abbreviation(*role, posting))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// The role behind an abbreviation token; drives the article verb.
fn role_for_abbreviation(token: &str) -> Option<Role> {
    match token {
        "MSc" | "MA" => Some(Role::MasterStudent),
        "PhD" => Some(Role::DoctoralStudent),
        "PostDoc" => Some(Role::PostDoc),
        "RA" => Some(Role::ResearchAssistant),
        "Competition" => Some(Role::Competition),
        "Conference" => Some(Role::Conference),
        "Summer School" => Some(Role::SummerSchool),
        "Workshop" => Some(Role::Workshop),
        _ => None,
    }
}

/// Title prefix shared by the chat renderer and the headlines: the country
/// is elided when the university name already starts with it.
fn combined_title(country_cn: &str, university_cn: &str) -> String {
    if university_cn.starts_with(country_cn) {
        university_cn.to_string()
    } else {
        format!("{country_cn}{university_cn}")
    }
}

/// Group chat message for a persisted posting.
pub fn chat_message(
    posting: &Posting,
    abbreviation: &str,
    event_id: i64,
    permalink_base: &str,
) -> String {
    let country_cn = posting.country_cn.as_deref().unwrap_or_default();
    let title = combined_title(
        country_cn,
        posting.university_cn.as_deref().unwrap_or_default(),
    );
    let deadline_cn = dateloc::deadline_phrase(&posting.deadline);

    let tokens: Vec<&str> = abbreviation.split(", ").collect();
    let mut opportunity = tokens.join("或");
    if let Some(count) = posting.number_places.as_deref() {
        if count != "1" {
            opportunity = format!("{count}名{opportunity}");
        }
    }

    let mut text = format!(
        "{title}{}方向{opportunity}机会\n\n",
        posting.direction.as_deref().unwrap_or_default()
    );
    text.push_str(&format!(
        "{deadline_cn}，有意者请联系{} ({})\n\n",
        posting.contact_name.as_deref().unwrap_or_default(),
        posting.contact_email.as_deref().unwrap_or_default()
    ));
    text.push_str(&format!("{permalink_base}{event_id}\n\n"));

    let mut labels: Vec<String> = vec![country_cn.to_string()];
    for token in &tokens {
        if let Some(job_cn) = lexicon::job_cn(token) {
            labels.push(format!("{job_cn}机会"));
        }
    }
    for (subject, label_cn) in lexicon::SUBJECTS {
        if posting.subjects.is_set(subject) {
            labels.push((*label_cn).to_string());
        }
    }
    for extra in posting.extra_labels.iter().flatten() {
        labels.push(extra.clone());
    }
    labels.retain(|label| !label.is_empty());

    text.push_str(&format!("标签：{}", labels.join("；")));
    text
}

/// Public-account article template. The job title comes from the first
/// abbreviation token only, falling back to the token itself when the
/// lexicon has no entry for it.
pub fn article(posting: &Posting, abbreviation: &str) -> String {
    let country_cn = posting.country_cn.as_deref().unwrap_or_default();
    let university_cn = posting.university_cn.as_deref().unwrap_or_default();
    // The article prefix checks containment, not just a prefix match.
    let university = if university_cn.contains(country_cn) {
        university_cn.to_string()
    } else {
        format!("{country_cn}{university_cn}")
    };

    let first_token = abbreviation.split(", ").next().unwrap_or(abbreviation);
    let job_cn = lexicon::job_cn(first_token).unwrap_or(first_token);
    let category = role_for_abbreviation(first_token)
        .map(|role| role.category())
        .unwrap_or(gisource_core::types::JobCategory::Enrolling);
    let verb = category.verb_cn();

    let mut template = format!("{university}\n");
    template.push_str(&format!(
        "方向：{}\n",
        posting.direction.as_deref().unwrap_or_default()
    ));

    match posting.number_places_int() {
        Some(count) if count > 1 => {
            template.push_str(&format!("{verb}类型：{job_cn}({count}名)\n"));
        }
        _ => template.push_str(&format!("{verb}类型：{job_cn}\n")),
    }

    let deadline = dateloc::deadline_phrase(&posting.deadline)
        .replace("申请截止", "")
        .trim()
        .to_string();
    template.push_str(&format!("申请截止：{deadline}\n"));
    template.push_str(&format!(
        "详细信息：\n{}\n",
        posting.source.as_deref().unwrap_or_default()
    ));
    template.push_str(&format!(
        "联系人：\n{} ({})\n",
        posting.contact_name.as_deref().unwrap_or_default(),
        posting.contact_email.as_deref().unwrap_or_default()
    ));
    template
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gisource_core::types::{Deadline, RoleFlags, SubjectFlags};

    fn mit_posting() -> Posting {
        Posting {
            row: 0,
            source: Some("https://example.edu/mit-gis".into()),
            deadline: Deadline::Soon,
            country_cn: Some("美国".into()),
            university_cn: Some("麻省理工学院".into()),
            university_en: Some("MIT".into()),
            direction: Some("GIS".into()),
            contact_name: Some("Dr. Smith".into()),
            contact_email: Some("smith@mit.edu".into()),
            number_places: Some("2".into()),
            verifier: Some("王五".into()),
            error: Some("N".into()),
            roles: RoleFlags {
                master_student: true,
                ..Default::default()
            },
            subjects: SubjectFlags {
                gis: true,
                ..Default::default()
            },
            extra_labels: Default::default(),
        }
    }

    #[test]
    fn test_abbreviation_for_technical_master() {
        assert_eq!(abbreviation(&mit_posting()).as_deref(), Some("MSc"));
    }

    #[test]
    fn test_abbreviation_humanities_only_master_is_ma() {
        let mut posting = mit_posting();
        posting.subjects = SubjectFlags {
            human_geo: true,
            ..Default::default()
        };
        assert_eq!(abbreviation(&posting).as_deref(), Some("MA"));

        // Any technical subject flips it back to MSc.
        posting.subjects.rs = true;
        assert_eq!(abbreviation(&posting).as_deref(), Some("MSc"));
    }

    #[test]
    fn test_abbreviation_check_order_puts_conference_first() {
        let mut posting = mit_posting();
        posting.roles = RoleFlags {
            summer_school: true,
            conference: true,
            ..Default::default()
        };
        assert_eq!(
            abbreviation(&posting).as_deref(),
            Some("Conference, Summer School")
        );
    }

    #[test]
    fn test_abbreviation_empty_when_no_role_set() {
        let mut posting = mit_posting();
        posting.roles = RoleFlags::default();
        assert_eq!(abbreviation(&posting), None);
    }

    #[test]
    fn test_chat_message_mit_scenario() {
        let posting = mit_posting();
        let abbrev = abbreviation(&posting).unwrap();
        let text = chat_message(&posting, &abbrev, 1001, "https://gisphere.info/post/");
        assert!(text.starts_with("美国麻省理工学院GIS方向2名MSc机会"));
        assert!(text.contains("尽快申请，有意者请联系Dr. Smith (smith@mit.edu)"));
        assert!(text.contains("https://gisphere.info/post/1001"));
        assert!(text.ends_with("标签：美国；硕士机会；地理信息科学"));
    }

    #[test]
    fn test_chat_message_single_place_has_no_count_prefix() {
        let mut posting = mit_posting();
        posting.number_places = Some("1".into());
        let abbrev = abbreviation(&posting).unwrap();
        let text = chat_message(&posting, &abbrev, 1, "https://gisphere.info/post/");
        assert!(text.starts_with("美国麻省理工学院GIS方向MSc机会"));
    }

    #[test]
    fn test_label_list_never_contains_empty_strings() {
        let mut posting = mit_posting();
        posting.extra_labels = [Some("定量遥感".into()), None, None, None, None];
        let abbrev = abbreviation(&posting).unwrap();
        let text = chat_message(&posting, &abbrev, 1, "https://gisphere.info/post/");
        let labels_line = text.rsplit("标签：").next().unwrap();
        assert!(!labels_line.split('；').any(str::is_empty));
        assert!(labels_line.ends_with("定量遥感"));
    }

    #[test]
    fn test_article_template() {
        let mut posting = mit_posting();
        posting.deadline = Deadline::Date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let abbrev = abbreviation(&posting).unwrap();
        assert_eq!(
            article(&posting, &abbrev),
            "美国麻省理工学院\n\
             方向：GIS\n\
             招生类型：硕士(2名)\n\
             申请截止：2025年6月1日\n\
             详细信息：\nhttps://example.edu/mit-gis\n\
             联系人：\nDr. Smith (smith@mit.edu)\n"
        );
    }

    #[test]
    fn test_article_postdoc_uses_recruiting_verb() {
        let mut posting = mit_posting();
        posting.roles = RoleFlags {
            postdoc: true,
            ..Default::default()
        };
        posting.number_places = None;
        let abbrev = abbreviation(&posting).unwrap();
        let text = article(&posting, &abbrev);
        assert!(text.contains("招聘类型：博士后\n"));
    }

    #[test]
    fn test_article_soon_deadline_keeps_phrase() {
        let posting = mit_posting();
        let abbrev = abbreviation(&posting).unwrap();
        assert!(article(&posting, &abbrev).contains("申请截止：尽快申请\n"));
    }
}
