//! Persisted-record assembly: bilingual job titles, headlines, description,
//! and subject labels for one validated posting.

use chrono::NaiveDate;
use gisource_core::lexicon;
use gisource_core::types::{JobCategory, PersistedRecord, Posting, TITLE_ROLE_ORDER};

use crate::numword;

/// English job title: set role labels in fixed order, joined with " or ".
pub fn job_title_en(posting: &Posting) -> String {
    posting
        .roles
        .active(TITLE_ROLE_ORDER)
        .iter()
        .map(|role| role.label())
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Chinese job title mapped token-by-token from the English title.
/// Each token is tried verbatim, then with a " Student" suffix. When the
/// title joins several tokens, the first token drops its "研究生" suffix
/// once ("硕士研究生或博士研究生" reads as "硕士或博士研究生").
pub fn job_title_cn(job_en: &str) -> String {
    let mut parts: Vec<String> = job_en
        .split(" or ")
        .map(|token| {
            let token = token.trim();
            lexicon::job_cn(token)
                .or_else(|| lexicon::job_cn(&format!("{token} Student")))
                .unwrap_or_default()
                .to_string()
        })
        .collect();

    if parts.len() > 1 {
        parts[0] = parts[0].replacen("研究生", "", 1);
    }
    parts.join("或")
}

/// English headline. The count, when known, is written in words and the
/// job pluralized with a trailing "s" for any count other than one.
pub fn english_title(
    university_en: &str,
    country_en: &str,
    count: Option<i64>,
    job_en: &str,
    category: JobCategory,
) -> String {
    let mut title = format!("{university_en} in {country_en}{}", category.verb_en());
    match count {
        Some(n) => {
            title.push_str(&format!("for {} {job_en}", numword::english(n)));
            if n != 1 {
                title.push('s');
            }
        }
        None => title.push_str(job_en),
    }
    title
}

/// Chinese headline. The country prefix is elided when the university name
/// already starts with it.
pub fn chinese_title(
    country_cn: &str,
    university_cn: &str,
    count: Option<i64>,
    job_cn: &str,
    category: JobCategory,
) -> String {
    let mut title = if university_cn.starts_with(country_cn) {
        university_cn.to_string()
    } else {
        format!("{country_cn}{university_cn}")
    };
    title.push_str(category.verb_cn());
    match count {
        Some(n) => title.push_str(&format!("{}名{job_cn}", numword::chinese(n))),
        None => title.push_str(job_cn),
    }
    title
}

/// The fixed description template.
pub fn description(posting: &Posting) -> String {
    format!(
        "<p>{}; <br>Deadline: {}; <br>Contact: {} ({}); <br>URL: {}</p>",
        posting.direction.as_deref().unwrap_or_default(),
        posting.deadline.display(),
        posting.contact_name.as_deref().unwrap_or_default(),
        posting.contact_email.as_deref().unwrap_or_default(),
        posting.source.as_deref().unwrap_or_default(),
    )
}

fn none_if_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Assemble the persisted record for a validated posting and a freshly
/// assigned event id.
pub fn build_record(posting: &Posting, event_id: i64, today: NaiveDate) -> PersistedRecord {
    let country_cn = posting.country_cn.as_deref().unwrap_or_default();
    let country_en = posting.country_cn.as_deref().and_then(lexicon::country_en);

    let job_en = job_title_en(posting);
    let job_cn = job_title_cn(&job_en);
    let category = JobCategory::for_roles(&posting.roles.active(TITLE_ROLE_ORDER));
    let count = posting.number_places_int();

    let title_en = english_title(
        posting.university_en.as_deref().unwrap_or_default(),
        country_en.unwrap_or_default(),
        count,
        &job_en,
        category,
    );
    let title_cn = chinese_title(
        country_cn,
        posting.university_cn.as_deref().unwrap_or_default(),
        count,
        &job_cn,
        category,
    );

    let subjects = &posting.subjects;
    PersistedRecord {
        event_id,
        university_cn: posting.university_cn.clone(),
        university_en: posting.university_en.clone(),
        country_cn: posting.country_cn.clone(),
        country_en: country_en.map(str::to_string),
        job_cn: none_if_empty(job_cn),
        job_en: none_if_empty(job_en),
        description: Some(description(posting)),
        title_cn: none_if_empty(title_cn),
        title_en: none_if_empty(title_en),
        label_physical_geo: subjects.physical_geo as i64,
        label_human_geo: subjects.human_geo as i64,
        label_urban: subjects.urban as i64,
        label_gis: subjects.gis as i64,
        label_rs: subjects.rs as i64,
        label_gnss: subjects.gnss as i64,
        date: today.format("%Y-%m-%d").to_string(),
        university_id: None,
        is_public: 1,
        is_deleted: 0,
        event_cn: None,
        event_en: None,
    }
}
