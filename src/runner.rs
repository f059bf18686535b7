use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use spdlog::{error, info};

use crate::archive::archive_processed;
use crate::batch::{load_batch, Batch};
use crate::config::Config;
use crate::credentials::Credentials;
use crate::csv_export::{CsvExporter, ExportOutcome};
use crate::publisher::{publish_all, BlogPublisher, PublishSummary};
use crate::record::Record;

/// What a command reads and writes, after CLI overrides are applied
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub archive_dir: PathBuf,
    pub file_name: String,
    pub archive: bool,
}

impl RunOptions {
    pub fn from_config(config: &Config, file_name: &str) -> Self {
        RunOptions {
            source_dir: config.paths.source_dir.clone(),
            output_dir: config.paths.output_dir.clone(),
            archive_dir: config.paths.archive_dir.clone(),
            file_name: file_name.to_string(),
            archive: config.archive.enabled,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct RunReport {
    pub loaded: usize,
    pub failed: usize,
    pub export: ExportOutcome,
    /// Present when posting was attempted
    pub published: Option<PublishSummary>,
    pub archived: usize,
}

impl Display for RunReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.loaded == 0 {
            return write!(f, "Nothing to export: no blog post could be loaded ({} failed)", self.failed);
        }

        write!(f, "Loaded {} blog(s), {} failed", self.loaded, self.failed)?;
        if let Some(ref published) = self.published {
            write!(f, ". Posted: {}/{}", published.posted, published.total())?;
        }
        if let ExportOutcome::Written { ref path, .. } = self.export {
            write!(f, ". CSV: {}", path.display())?;
        }
        if self.archived > 0 {
            write!(f, ". Archived {} file(s)", self.archived)?;
        }
        Ok(())
    }
}

fn load(options: &RunOptions, config: &Config) -> Result<Batch> {
    if !options.source_dir.exists() {
        fs::create_dir_all(&options.source_dir)
            .with_context(|| format!("Error creating source folder {}", options.source_dir.display()))?;
        info!("Created {}. Add blog files to it", options.source_dir.display());
    }

    let batch = load_batch(&options.source_dir, &config.defaults)
        .with_context(|| format!("Error listing {}", options.source_dir.display()))?;
    Ok(batch)
}

fn finish(batch: &Batch, options: &RunOptions, export: ExportOutcome, published: Option<PublishSummary>) -> RunReport {
    let mut archived = 0;
    if options.archive && matches!(export, ExportOutcome::Written { .. }) {
        match archive_processed(batch.sources(), &options.archive_dir) {
            Ok(moved) => archived = moved,
            Err(e) => error!("Error archiving into {}: {}", options.archive_dir.display(), e),
        }
    }

    RunReport {
        loaded: batch.len(),
        failed: batch.failures.len(),
        export,
        published,
        archived,
    }
}

/// Loads the source folder and writes one CSV file
pub fn run_export(config: &Config, options: &RunOptions) -> Result<RunReport> {
    let batch = load(options, config)?;
    let records: Vec<&Record> = batch.records().collect();

    let exporter = CsvExporter::new(options.output_dir.clone(), config.export.legacy_headers);
    let export = exporter.export(&records, &options.file_name)?;

    Ok(finish(&batch, options, export, None))
}

/// Posts every loaded record, then writes the CSV backup.
/// Without credentials nothing is sent, but the backup is still written.
pub fn run_post(config: &Config, options: &RunOptions, credentials: Option<Credentials>) -> Result<RunReport> {
    let batch = load(options, config)?;
    if batch.is_empty() {
        return Ok(finish(&batch, options, ExportOutcome::NothingToExport, None));
    }

    let published = match credentials {
        Some(credentials) => {
            info!("Posting {} blog(s) to {}", batch.len(), config.api.base_url);
            let publisher = BlogPublisher::new(&config.api, credentials)?;
            Some(publish_all(&publisher, batch.records()))
        }
        None => {
            error!("Posting skipped: GHL credentials not set");
            None
        }
    };

    info!("Creating CSV backup");
    let records: Vec<&Record> = batch.records().collect();
    let exporter = CsvExporter::new(options.output_dir.clone(), config.export.legacy_headers);
    let export = exporter.export(&records, &options.file_name)?;

    Ok(finish(&batch, options, export, published))
}
