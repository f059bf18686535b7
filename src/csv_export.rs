use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spdlog::{info, warn};

use crate::record::{Record, CSV_HEADERS, LEGACY_CSV_HEADERS};

pub const EXPORT_FILE_NAME: &str = "blog_export.csv";
pub const WEEKLY_FILE_NAME: &str = "weekly_blogs.csv";
pub const BACKUP_FILE_NAME: &str = "ghl_backup.csv";

#[derive(Debug, PartialEq)]
pub enum ExportOutcome {
    Written { path: PathBuf, count: usize },
    /// No record to write, so no file was created
    NothingToExport,
}

pub struct CsvExporter {
    output_dir: PathBuf,
    legacy_headers: bool,
}

impl CsvExporter {
    pub fn new(output_dir: PathBuf, legacy_headers: bool) -> Self {
        CsvExporter {
            output_dir,
            legacy_headers,
        }
    }

    fn headers(&self) -> &'static [&'static str] {
        if self.legacy_headers {
            &LEGACY_CSV_HEADERS
        } else {
            &CSV_HEADERS
        }
    }

    pub fn export(&self, records: &[&Record], file_name: &str) -> Result<ExportOutcome> {
        if records.is_empty() {
            warn!("No posts to export");
            return Ok(ExportOutcome::NothingToExport);
        }

        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Error creating output folder {}", self.output_dir.display()))?;

        let path = self.output_dir.join(file_name);
        write_csv(&path, self.headers(), records)?;

        info!("Exported {} blog(s) to {}", records.len(), path.display());
        Ok(ExportOutcome::Written { path, count: records.len() })
    }
}

fn write_csv(path: &Path, headers: &[&str], records: &[&Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Error creating {}", path.display()))?;

    writer.write_record(headers)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;

    Ok(())
}
