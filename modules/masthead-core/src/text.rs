use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// The entities WordPress is known to emit in rendered titles and excerpts.
/// This fixed set is a compatibility contract with the content source; do not
/// replace it with a general-purpose decoder.
const ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&#038;", "&"),
    ("&#8217;", "\u{2019}"),
    ("&rsquo;", "\u{2019}"),
    ("&#8216;", "\u{2018}"),
    ("&lsquo;", "\u{2018}"),
    ("&#8220;", "\u{201C}"),
    ("&ldquo;", "\u{201C}"),
    ("&#8221;", "\u{201D}"),
    ("&rdquo;", "\u{201D}"),
    ("&#8230;", "\u{2026}"),
    ("&hellip;", "\u{2026}"),
    ("&#8211;", "\u{2013}"),
    ("&#8212;", "\u{2014}"),
    ("&nbsp;", " "),
];

/// Default character bound for feed-card excerpts.
pub const EXCERPT_MAX_CHARS: usize = 160;

/// Clean a WordPress-rendered field: strip tags, decode the known entity
/// set, and collapse whitespace runs.
pub fn clean_rendered(raw: &str) -> String {
    let stripped = TAG_RE.replace_all(raw, " ");
    let mut text = stripped.into_owned();
    for (entity, replacement) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }
    WS_RE.replace_all(text.trim(), " ").into_owned()
}

/// Bound a cleaned excerpt to `max_chars` characters, cutting at the last
/// space inside the bound when one exists. The ellipsis is appended only
/// when something was actually cut.
pub fn truncate_excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let prefix: String = text.chars().take(max_chars).collect();
    let cut = match prefix.rfind(' ') {
        Some(idx) if idx > 0 => &prefix[..idx],
        _ => prefix.as_str(),
    };
    format!("{}\u{2026}", cut.trim_end())
}

/// Format a WordPress publish date (`2026-01-29T10:15:00`) as a long label
/// like `January 29, 2026`. Anything unparseable yields an empty label.
pub fn format_date_label(raw: &str) -> String {
    let date = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.date())
        .or_else(|_| {
            chrono::DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive())
        })
        .or_else(|_| chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(d) => d.format("%B %-d, %Y").to_string(),
        Err(_) => String::new(),
    }
}
