use std::collections::HashMap;

pub const DELIMITER: &str = "---";

/// `key: value` pairs found between the `---` lines at the top of a post
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frontmatter {
    values: HashMap<String, String>,
}

impl Frontmatter {
    /// Parses every line holding a colon. Keys are trimmed and lowercased,
    /// the value is everything after the first colon.
    pub fn parse(block: &str) -> Frontmatter {
        let values = block.lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, val)| (key.trim().to_lowercase(), val.trim().to_string()))
            .collect();

        Frontmatter { values }
    }

    /// Blank values count as missing
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key)
            .map(String::as_str)
            .filter(|val| !val.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Separates the frontmatter from the body. Content that does not start
/// with `---`, or has no closing delimiter, is returned whole as the body.
pub fn split_frontmatter(content: &str) -> (Frontmatter, &str) {
    if !content.trim_start().starts_with(DELIMITER) {
        return (Frontmatter::default(), content);
    }

    let parts: Vec<&str> = content.splitn(3, DELIMITER).collect();
    if parts.len() < 3 {
        return (Frontmatter::default(), content);
    }

    (Frontmatter::parse(parts[1].trim()), parts[2].trim())
}
