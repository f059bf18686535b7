use std::fmt;
use std::fmt::{Display, Formatter};

pub const DEFAULT_AUTHOR: &str = "Far Beyond Marketing";
pub const DEFAULT_CATEGORY: &str = "Marketing";
/// Title used when neither the post nor its file name provide one
pub const UNTITLED: &str = "Untitled";
/// Slug used when the title has no character left after slugifying
pub const UNTITLED_SLUG: &str = "untitled";

pub const COLUMN_COUNT: usize = 11;

pub const CSV_HEADERS: [&str; COLUMN_COUNT] = [
    "URL Slug",
    "Publish Date",
    "Scheduled Date",
    "Blog Post Title",
    "Meta description",
    "Meta Image",
    "Meta Image Alt text",
    "Author",
    "Category",
    "Blog Post Tags",
    "Blog Post Content",
];

/// Same columns, with the trailing space older importers expect after `Category`
pub const LEGACY_CSV_HEADERS: [&str; COLUMN_COUNT] = [
    "URL Slug",
    "Publish Date",
    "Scheduled Date",
    "Blog Post Title",
    "Meta description",
    "Meta Image",
    "Meta Image Alt text",
    "Author",
    "Category ",
    "Blog Post Tags",
    "Blog Post Content",
];

/// One blog post, normalized and ready to be exported or published
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub slug: String,
    pub publish_date: String,
    pub scheduled_date: String,
    pub title: String,
    pub meta_description: String,
    pub meta_image: String,
    pub meta_image_alt: String,
    pub author: String,
    pub category: String,
    /// Comma separated, exactly as written in the post
    pub tags: String,
    pub content: String,
}

impl Record {
    /// Values in the order of `CSV_HEADERS`
    pub fn to_row(&self) -> [&str; COLUMN_COUNT] {
        [
            &self.slug,
            &self.publish_date,
            &self.scheduled_date,
            &self.title,
            &self.meta_description,
            &self.meta_image,
            &self.meta_image_alt,
            &self.author,
            &self.category,
            &self.tags,
            &self.content,
        ]
    }

    pub fn tag_list(&self) -> Vec<String> {
        self.tags.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, date={}, author={}, category={}\ntitle={}",
               self.slug,
               self.publish_date,
               self.author,
               self.category,
               self.title,
        )
    }
}
