use std::sync::OnceLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use url::form_urlencoded;

pub const DEFAULT_EXCERPT_LIMIT: usize = 100;
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.jpg";

const ELLIPSIS: &str = "...";

/// A collection item as delivered by the remote API. Never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub id: u64,
    pub title: String,
    /// May contain markup.
    pub content: String,
    pub published_at: Option<String>,
    pub slug: String,
    pub small_image: Option<String>,
    pub medium_image: Option<String>,
}

/// A record projected into the shape the display layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCard {
    pub id: u64,
    pub title: String,
    pub excerpt: String,
    pub image_url: String,
    /// `None` hides the date line.
    pub formatted_date: Option<String>,
    pub slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateLocale {
    #[default]
    Indonesian,
    English,
}

impl DateLocale {
    /// Accepts BCP 47 style tags such as `id`, `id-ID`, `en` or `en_GB`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let language = tag.trim().split(&['-', '_'][..]).next()?;
        if language.eq_ignore_ascii_case("id") {
            Some(DateLocale::Indonesian)
        } else if language.eq_ignore_ascii_case("en") {
            Some(DateLocale::English)
        } else {
            None
        }
    }

    fn month_names(self) -> &'static [&'static str; 12] {
        match self {
            DateLocale::Indonesian => &[
                "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus",
                "September", "Oktober", "November", "Desember",
            ],
            DateLocale::English => &[
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSettings {
    /// Excerpt length in characters, before the ellipsis.
    pub excerpt_limit: usize,
    pub placeholder_image: String,
    /// Relay endpoint remote images are routed through, e.g. `/api/image-proxy`.
    pub image_proxy: Option<String>,
    pub locale: DateLocale,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            excerpt_limit: DEFAULT_EXCERPT_LIMIT,
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
            image_proxy: None,
            locale: DateLocale::default(),
        }
    }
}

impl DisplayCard {
    pub fn from_record(record: &Record, settings: &CardSettings) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            excerpt: excerpt(&record.content, settings.excerpt_limit),
            image_url: resolve_image_url(record, settings),
            formatted_date: format_date(record.published_at.as_deref(), settings.locale),
            slug: record.slug.clone(),
        }
    }
}

fn markup_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("static markup pattern"))
}

/// Removes anything that looks like a tag. Entities are left alone.
pub fn strip_markup(body: &str) -> String {
    markup_pattern().replace_all(body, "").into_owned()
}

/// Plain-text excerpt of at most `limit` characters, with `...` appended
/// only when something was cut.
pub fn excerpt(body: &str, limit: usize) -> String {
    let plain = strip_markup(body);
    match plain.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &plain[..cut]),
        None => plain,
    }
}

/// Long date such as `17 Mei 2024`, or `None` for a missing or unparseable
/// timestamp.
pub fn format_date(raw: Option<&str>, locale: DateLocale) -> Option<String> {
    let date = parse_timestamp(raw?.trim())?;
    let month = locale.month_names()[date.month0() as usize];
    Some(format!("{} {} {}", date.day(), month, date.year()))
}

fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.date_naive());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Medium variant, then small, then the placeholder. Remote URLs go through
/// the relay when one is configured.
pub fn resolve_image_url(record: &Record, settings: &CardSettings) -> String {
    let remote = [&record.medium_image, &record.small_image]
        .into_iter()
        .filter_map(|variant| variant.as_deref())
        .map(str::trim)
        .find(|url| !url.is_empty());

    match (remote, settings.image_proxy.as_deref()) {
        (Some(url), Some(proxy)) => {
            let encoded: String = form_urlencoded::byte_serialize(url.as_bytes()).collect();
            format!("{proxy}?url={encoded}")
        }
        (Some(url), None) => url.to_string(),
        (None, _) => settings.placeholder_image.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_formats() {
        assert_eq!(
            parse_timestamp("2024-05-17T08:00:00+07:00"),
            NaiveDate::from_ymd_opt(2024, 5, 17)
        );
        assert_eq!(
            parse_timestamp("2022-10-10 04:17:15"),
            NaiveDate::from_ymd_opt(2022, 10, 10)
        );
        assert_eq!(parse_timestamp("2021-01-02"), NaiveDate::from_ymd_opt(2021, 1, 2));
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-40"), None);
    }

    #[test]
    fn locale_tags() {
        assert_eq!(DateLocale::from_tag("id-ID"), Some(DateLocale::Indonesian));
        assert_eq!(DateLocale::from_tag("en_GB"), Some(DateLocale::English));
        assert_eq!(DateLocale::from_tag("fr"), None);
    }
}
