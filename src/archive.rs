use std::path::{Path, PathBuf};
use std::{fs, io};

use spdlog::{error, info};

/// Moves `source` into `archive_dir`, keeping its file name
pub fn archive_file(source: &Path, archive_dir: &Path) -> io::Result<PathBuf> {
    let Some(file_name) = source.file_name() else {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("Invalid file name {}", source.display())));
    };

    let target = archive_dir.join(file_name);
    if fs::rename(source, &target).is_err() {
        // Rename fails across file systems
        fs::copy(source, &target)?;
        fs::remove_file(source)?;
    }

    Ok(target)
}

/// Moves every processed file. Returns how many files were moved.
pub fn archive_processed<'a>(sources: impl IntoIterator<Item = &'a Path>, archive_dir: &Path) -> io::Result<usize> {
    fs::create_dir_all(archive_dir)?;

    let mut moved = 0;
    for source in sources {
        match archive_file(source, archive_dir) {
            Ok(_) => {
                info!("Archived: {}", source.display());
                moved += 1;
            }
            Err(e) => error!("Error archiving {}: {}", source.display(), e),
        }
    }

    Ok(moved)
}
