use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::Regex;

/// Time of day given to posts whose date has no time component
pub const PUBLISH_TIME: &str = "09:00:00";
/// UTC offset appended to every publish timestamp
pub const PUBLISH_OFFSET: &str = "+00:00";

lazy_static! {
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    static ref DATED_STEM: Regex = Regex::new(r"^(\d{4}-\d{2}-\d{2})_(.+)$").unwrap();
    static ref LEADING_DATE: Regex = Regex::new(r"^\s*(\d{4}-\d{2}-\d{2})").unwrap();
}

pub fn slugify(text: &str) -> String {
    let ascii = unidecode::unidecode(text).to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&ascii, "-");
    slug.trim_matches('-').to_string()
}

/// Turns `my-first_post` into `My First Post`. A letter is upper-cased when
/// it follows anything but a letter, so `post2go` becomes `Post2Go`.
pub fn title_from_stem(stem: &str) -> String {
    let mut prev_is_letter = false;
    stem.replace(['-', '_'], " ")
        .chars()
        .flat_map(|c| {
            let starts_word = !prev_is_letter;
            prev_is_letter = c.is_alphabetic();
            if starts_word {
                c.to_uppercase().collect::<Vec<char>>()
            } else {
                c.to_lowercase().collect()
            }
        })
        .collect()
}

#[derive(Debug, PartialEq)]
pub struct FileNameMeta {
    pub date: Option<NaiveDate>,
    pub slug: String,
}

/// Splits a `2025-01-15_rest` stem into its date and slug parts. The slug is
/// `rest` even when the prefix is not a real date; the date is then `None`.
/// Stems without the prefix are used whole as the slug.
pub fn parse_file_stem(stem: &str) -> FileNameMeta {
    match DATED_STEM.captures(stem) {
        Some(caps) => FileNameMeta {
            date: NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok(),
            slug: caps[2].to_string(),
        },
        None => FileNameMeta {
            date: None,
            slug: stem.to_string(),
        },
    }
}

/// Reads the `YYYY-MM-DD` part of a frontmatter date, ignoring any time after it
pub fn parse_leading_date(buf: &str) -> Result<NaiveDate, String> {
    let Some(caps) = LEADING_DATE.captures(buf) else {
        return Err(format!("Unable to parse date {}", buf));
    };

    NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d")
        .map_err(|e| format!("Invalid date {}: {}", buf, e))
}

pub fn publish_timestamp(date: &NaiveDate) -> String {
    format!("{}T{}{}", date.format("%Y-%m-%d"), PUBLISH_TIME, PUBLISH_OFFSET)
}

pub fn current_timestamp(now: &DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, false)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  10 Tips -- for   SEO!  "), "10-tips-for-seo");
        assert_eq!(slugify("Ábaco & Café"), "abaco-cafe");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_slugify_idempotent() {
        for slug in ["my-post", "hello-world-2025", "a", "seo"] {
            assert_eq!(slugify(slug), slug);
            assert_eq!(slugify(&slugify(slug)), slug);
        }
    }

    #[test]
    fn test_title_from_stem() {
        assert_eq!(title_from_stem("my-first_post"), "My First Post");
        assert_eq!(title_from_stem("SEO-guide"), "Seo Guide");
        assert_eq!(title_from_stem("single"), "Single");
        assert_eq!(title_from_stem("post2go"), "Post2Go");
        assert_eq!(title_from_stem("2025-01-15_my-post"), "2025 01 15 My Post");
        assert_eq!(title_from_stem("don't-stop"), "Don'T Stop");
    }

    #[test]
    fn test_parse_file_stem() {
        let meta = parse_file_stem("2025-01-15_my-post");
        assert_eq!(meta.date, NaiveDate::from_ymd_opt(2025, 1, 15));
        assert_eq!(meta.slug, "my-post");

        let meta = parse_file_stem("my-post");
        assert_eq!(meta, FileNameMeta { date: None, slug: "my-post".to_string() });

        // Looks like a date but is not one
        let meta = parse_file_stem("2025-13-45_bad");
        assert_eq!(meta.date, None);
        assert_eq!(meta.slug, "bad");
    }

    #[test]
    fn test_parse_leading_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(parse_leading_date("2024-02-29"), Ok(expected));
        assert_eq!(parse_leading_date(" 2024-02-29 10:42:32"), Ok(expected));
        assert!(parse_leading_date("next week").is_err());
        assert!(parse_leading_date("2023-02-29").is_err());
    }

    #[test]
    fn test_timestamps() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(publish_timestamp(&date), "2025-01-15T09:00:00+00:00");

        let now = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(current_timestamp(&now), "2026-03-04T05:06:07+00:00");
    }
}
