use std::ops::Range;
use std::path::Path;
use std::{fs, io};

use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use spdlog::warn;

use crate::config::Defaults;
use crate::frontmatter::{split_frontmatter, Frontmatter};
use crate::record::{Record, UNTITLED, UNTITLED_SLUG};
use crate::text_utils::{current_timestamp, parse_file_stem, parse_leading_date, publish_timestamp, slugify, title_from_stem};

lazy_static! {
    static ref HTML_HEADING: Regex = Regex::new(r"(?i)<h1[^>]*>([^<]+)</h1>").unwrap();
    static ref MARKDOWN_HEADING: Regex = Regex::new(r"(?m)^#[ \t]+(.+?)[ \t]*$").unwrap();
}

/// First level heading found in a post body
#[derive(Debug, PartialEq)]
pub struct Heading {
    pub text: String,
    /// Bytes of the body covered by the heading, markup included
    pub span: Range<usize>,
}

/// An HTML `<h1>` wins over a Markdown `# ` line, wherever they are.
pub fn find_heading(body: &str) -> Option<Heading> {
    [&*HTML_HEADING, &*MARKDOWN_HEADING].iter()
        .filter_map(|re| re.captures(body))
        .filter_map(|cap| {
            let span = cap.get(0)?.range();
            let text = cap.get(1)?.as_str().trim().to_string();
            Some(Heading { text, span })
        })
        .find(|heading| !heading.text.is_empty())
}

/// Resolves each record field from the frontmatter, the body and the file name
pub struct RecordBuilder<'a> {
    file_stem: &'a str,
    frontmatter: Frontmatter,
    body: &'a str,
    defaults: &'a Defaults,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(file_stem: &'a str, content: &'a str, defaults: &'a Defaults) -> Self {
        let (frontmatter, body) = split_frontmatter(content);
        RecordBuilder {
            file_stem,
            frontmatter,
            body,
            defaults,
        }
    }

    pub fn build(self, now: &DateTime<Utc>) -> Record {
        let file_meta = parse_file_stem(self.file_stem);
        let fm = &self.frontmatter;

        // A heading that became the title is not repeated in the content
        let (title, content) = match fm.get("title") {
            Some(title) => (title.to_string(), self.body.trim().to_string()),
            None => match find_heading(self.body) {
                Some(heading) => {
                    let mut content = String::with_capacity(self.body.len());
                    content.push_str(&self.body[..heading.span.start]);
                    content.push_str(&self.body[heading.span.end..]);
                    (heading.text, content.trim().to_string())
                }
                None => (Self::fallback_title(self.file_stem), self.body.trim().to_string()),
            },
        };

        let slug = match fm.get("slug") {
            Some(slug) => slug.to_string(),
            None if !file_meta.slug.is_empty() => file_meta.slug.clone(),
            None => Self::slug_from_title(&title),
        };

        let publish_date = self.frontmatter_date()
            .or(file_meta.date)
            .map(|date| publish_timestamp(&date))
            .unwrap_or_else(|| current_timestamp(now));

        let field = |key: &str| fm.get(key).unwrap_or_default().to_string();

        Record {
            slug,
            publish_date,
            scheduled_date: field("scheduled_date"),
            meta_description: fm.get("meta_description").unwrap_or(&title).to_string(),
            meta_image: field("meta_image"),
            meta_image_alt: field("meta_image_alt"),
            author: fm.get("author").unwrap_or(&self.defaults.author).to_string(),
            category: fm.get("category").unwrap_or(&self.defaults.category).to_string(),
            tags: field("tags"),
            title,
            content,
        }
    }

    /// Built from the whole file stem, date prefix included
    fn fallback_title(name: &str) -> String {
        let title = title_from_stem(name);
        if title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            title.trim().to_string()
        }
    }

    fn slug_from_title(title: &str) -> String {
        let slug = slugify(title);
        if slug.is_empty() {
            UNTITLED_SLUG.to_string()
        } else {
            slug
        }
    }

    fn frontmatter_date(&self) -> Option<NaiveDate> {
        let date = self.frontmatter.get("date")?;
        match parse_leading_date(date) {
            Ok(date) => Some(date),
            Err(e) => {
                warn!("Ignoring frontmatter date of {}: {}", self.file_stem, e);
                None
            }
        }
    }
}

/// Builds a record from the content of `file_name`, a name without directory
pub fn extract_record(file_name: &str, content: &str, defaults: &Defaults, now: &DateTime<Utc>) -> Record {
    let file_stem = Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name);

    RecordBuilder::new(file_stem, content, defaults).build(now)
}

/// Reads a post file. Files that are not valid UTF-8 fail with `InvalidData`.
pub fn read_record(path: &Path, defaults: &Defaults) -> io::Result<Record> {
    let file_name = match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => name,
        None => return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("Invalid post file name {}", path.display()))),
    };

    let content = fs::read_to_string(path)?;
    Ok(extract_record(file_name, &content, defaults, &Utc::now()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use crate::record::{DEFAULT_AUTHOR, DEFAULT_CATEGORY};
    use crate::test_data::{FULL_POST, HTML_POST};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 14, 30, 0).unwrap()
    }

    fn extract(file_name: &str, content: &str) -> Record {
        extract_record(file_name, content, &Defaults::default(), &now())
    }

    #[test]
    fn test_dated_file_name() {
        let record = extract("2025-01-15_my-post.md", "Just some text");
        assert_eq!(record.slug, "my-post");
        assert!(record.publish_date.starts_with("2025-01-15T09:00:00+00:00"));
        assert_eq!(record.title, "2025 01 15 My Post");
        assert_eq!(record.content, "Just some text");
    }

    #[test]
    fn test_file_name_with_impossible_date() {
        let record = extract("2025-13-45_bad.md", "Body");
        assert_eq!(record.slug, "bad");
        assert_eq!(record.publish_date, "2026-10-17T14:30:00+00:00");
        assert_eq!(record.title, "2025 13 45 Bad");
    }

    #[test]
    fn test_markdown_heading() {
        let record = extract("hello.md", "# Hello World\n\nBody text");
        assert_eq!(record.title, "Hello World");
        assert_eq!(record.content, "Body text");
        assert_eq!(record.meta_description, "Hello World");
        assert_eq!(record.slug, "hello");
        assert_eq!(record.publish_date, "2026-10-17T14:30:00+00:00");
    }

    #[test]
    fn test_html_heading() {
        let record = extract("page.html", HTML_POST);
        assert_eq!(record.title, "Title Here");
        assert_eq!(record.content, "<p>First paragraph</p>");
    }

    #[test]
    fn test_html_heading_wins_over_markdown() {
        let record = extract("mixed.md", "# Markdown\n\n<H1 class=\"x\">Html</H1>\nrest");
        assert_eq!(record.title, "Html");
        assert_eq!(record.content, "# Markdown\n\n\nrest");
    }

    #[test]
    fn test_full_frontmatter() {
        let record = extract("2020-02-02_ignored.md", FULL_POST);
        assert_eq!(record.slug, "ten-seo-tips");
        assert_eq!(record.title, "Ten SEO tips: the 2025 edition");
        assert_eq!(record.publish_date, "2025-03-01T09:00:00+00:00");
        assert_eq!(record.scheduled_date, "2025-03-05");
        assert_eq!(record.meta_description, "Everything about SEO");
        assert_eq!(record.meta_image, "https://cdn.example.com/seo.png");
        assert_eq!(record.meta_image_alt, "A search bar");
        assert_eq!(record.author, "Jane Doe");
        assert_eq!(record.category, "SEO");
        assert_eq!(record.tags, "seo, marketing");
        // The title came from the frontmatter, so the heading stays
        assert!(record.content.starts_with("# A heading that is not the title"));
        assert!(record.content.ends_with("Last line."));
    }

    #[test]
    fn test_defaults() {
        let record = extract("plain.txt", "---\ntitle: Plain\n---\nBody");
        assert_eq!(record.author, DEFAULT_AUTHOR);
        assert_eq!(record.category, DEFAULT_CATEGORY);
        assert_eq!(record.scheduled_date, "");
        assert_eq!(record.meta_image, "");
        assert_eq!(record.tags, "");

        let defaults = Defaults { author: "Team".to_string(), category: "News".to_string() };
        let record = extract_record("plain.txt", "Body", &defaults, &now());
        assert_eq!(record.author, "Team");
        assert_eq!(record.category, "News");
    }

    #[test]
    fn test_invalid_frontmatter_date_falls_back_to_file_name() {
        let record = extract("2024-06-01_launch.md", "---\ndate: soon\n---\nBody");
        assert_eq!(record.publish_date, "2024-06-01T09:00:00+00:00");

        let record = extract("launch.md", "---\ndate: soon\n---\nBody");
        assert_eq!(record.publish_date, "2026-10-17T14:30:00+00:00");
    }

    #[test]
    fn test_frontmatter_date_with_time() {
        let record = extract("post.md", "---\ndate: 2024-04-22 10:42:32\n---\nBody");
        assert_eq!(record.publish_date, "2024-04-22T09:00:00+00:00");
    }

    #[test]
    fn test_slug_from_title_when_stem_is_empty() {
        let defaults = Defaults::default();
        let record = RecordBuilder::new("", "# Rust & You\nBody", &defaults).build(&now());
        assert_eq!(record.slug, "rust-you");

        let record = RecordBuilder::new("", "# !!!\nBody", &defaults).build(&now());
        assert_eq!(record.slug, UNTITLED_SLUG);
    }

    #[test]
    fn test_title_is_never_empty() {
        let defaults = Defaults::default();
        let record = RecordBuilder::new("", "no heading here", &defaults).build(&now());
        assert_eq!(record.title, UNTITLED);

        let record = extract("___.md", "");
        assert_eq!(record.title, UNTITLED);
        assert_eq!(record.content, "");
    }

    #[test]
    fn test_empty_heading_is_skipped() {
        let record = extract("note.md", "#\n\n# Real title\nBody");
        assert_eq!(record.title, "Real title");
    }

    #[test]
    fn test_read_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2025-01-15_my-post.md");
        fs::write(&path, "# Hello World\n\nBody text").unwrap();

        let record = read_record(&path, &Defaults::default()).unwrap();
        assert_eq!(record.slug, "my-post");
        assert_eq!(record.title, "Hello World");
        assert_eq!(record.publish_date, "2025-01-15T09:00:00+00:00");
    }

    #[test]
    fn test_read_record_not_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.md");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = read_record(&path, &Defaults::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
