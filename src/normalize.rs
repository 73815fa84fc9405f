use crate::types::{JobLink, JobPosting, RawJobPosting, SuggestionRow};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub const MAX_JOB_TAGS: usize = 6;

const DEFAULT_TITLE: &str = "Untitled role";
const DEFAULT_COMPANY: &str = "Unknown company";
const DEFAULT_LOCATION: &str = "Location not listed";
const DEFAULT_DESCRIPTION: &str = "No description provided.";

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n+").expect("valid regex"));
static ORDINAL_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+[).\s-]+").expect("valid regex"));
static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*]\s+").expect("valid regex"));

/// Shapes a SerpAPI job record for display. Never fails: every missing
/// field gets its default.
pub fn normalize_job_posting(raw: &RawJobPosting, ordinal: usize) -> JobPosting {
    let title = present(&raw.title).unwrap_or(DEFAULT_TITLE).to_string();
    let company_name = present(&raw.company_name).unwrap_or(DEFAULT_COMPANY).to_string();
    let id = match present(&raw.job_id) {
        Some(id) => id.to_string(),
        None => format!("{}-{}-{}", title, company_name, ordinal),
    };

    // apply option, then related link, then share link
    let link = first_link(&raw.apply_options)
        .or_else(|| first_link(&raw.related_links))
        .or_else(|| present(&raw.share_link))
        .unwrap_or_default()
        .to_string();

    JobPosting {
        id,
        title,
        company_name,
        location: present(&raw.location).unwrap_or(DEFAULT_LOCATION).to_string(),
        description: present(&raw.description).unwrap_or(DEFAULT_DESCRIPTION).to_string(),
        image: present(&raw.thumbnail).map(str::to_string),
        link,
        tags: build_job_tags(raw),
    }
}

/// Up to six distinct, non-blank tags in first-seen order.
pub fn build_job_tags(raw: &RawJobPosting) -> Vec<String> {
    let detected = raw.detected_extensions.clone().unwrap_or_default();
    let via = present(&raw.via).map(|via| Value::String(format!("via {}", via)));

    let candidates = raw
        .extensions
        .iter()
        .cloned()
        .chain(detected.schedule_type)
        .chain(detected.posted_at)
        .chain(detected.salary)
        .chain(via);

    let mut tags: Vec<String> = Vec::new();
    for candidate in candidates {
        let tag = tag_text(&candidate);
        if tag.is_empty() || tags.contains(&tag) {
            continue;
        }
        tags.push(tag);
        if tags.len() == MAX_JOB_TAGS {
            break;
        }
    }
    tags
}

/// Splits a generated list into numbered rows, stripping list markers.
pub fn to_suggestion_rows(text: Option<&str>) -> Vec<SuggestionRow> {
    let Some(text) = text else {
        return Vec::new();
    };

    LINE_BREAKS
        .split(text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let line = ORDINAL_MARKER.replace(line, "");
            BULLET_MARKER.replace(&line, "").trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, item)| SuggestionRow { id: index + 1, item })
        .collect()
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn first_link(options: &[JobLink]) -> Option<&str> {
    options.iter().find_map(|option| present(&option.link))
}

/// Falsy values (null, false, 0, "") become the empty string.
fn tag_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) if n.as_f64() != Some(0.0) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
        _ => String::new(),
    }
}
