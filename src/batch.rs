use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

use spdlog::{debug, error, info, warn};

use crate::config::Defaults;
use crate::extractor::read_record;
use crate::post_list::PostList;
use crate::record::Record;

pub struct ExtractedPost {
    pub source: PathBuf,
    pub record: Record,
}

#[derive(Debug)]
pub struct Failure {
    pub source: PathBuf,
    pub reason: String,
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = self.source.file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| self.source.to_string_lossy());
        write!(f, "{}: {}", name, self.reason)
    }
}

/// Records extracted in one run, in file name order
#[derive(Default)]
pub struct Batch {
    pub posts: Vec<ExtractedPost>,
    pub failures: Vec<Failure>,
}

impl Batch {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.posts.iter().map(|post| &post.record)
    }

    pub fn sources(&self) -> impl Iterator<Item = &Path> {
        self.posts.iter().map(|post| post.source.as_path())
    }

    /// Extracts every file given. A file that fails is kept as a failure
    /// and the remaining ones are still processed.
    pub fn from_files(files: Vec<PathBuf>, defaults: &Defaults) -> Batch {
        let mut batch = Batch::default();

        for source in files {
            info!("  -> {}", source.display());
            match read_record(&source, defaults) {
                Ok(record) => {
                    info!("     {}", record.title);
                    debug!("{}", record);
                    batch.posts.push(ExtractedPost { source, record });
                }
                Err(e) => {
                    error!("Error reading {}: {}", source.display(), e);
                    batch.failures.push(Failure { source, reason: e.to_string() });
                }
            }
        }

        batch
    }
}

/// Loads every post file of `source_dir`. Fails only when the folder can't be listed.
pub fn load_batch(source_dir: &Path, defaults: &Defaults) -> io::Result<Batch> {
    let post_list = PostList::new(source_dir.to_path_buf());
    let files = post_list.retrieve_files()?;

    if files.is_empty() {
        warn!("No blog files found in {}", source_dir.display());
        return Ok(Batch::default());
    }

    info!("Found {} blog file(s) in {}", files.len(), source_dir.display());
    Ok(Batch::from_files(files, defaults))
}
