pub mod config;
pub mod logger;
pub mod text_utils;
pub mod frontmatter;
pub mod record;
pub mod extractor;
pub mod post_list;
pub mod batch;
pub mod csv_export;
pub mod credentials;
pub mod publisher;
pub mod archive;
pub mod runner;
mod test_data;
