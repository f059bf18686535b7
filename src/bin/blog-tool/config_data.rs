use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
source_dir = "new_blogs"
output_dir = "csv_blogs"
archive_dir = "processed_blogs"

# Used when a post does not set author or category
[defaults]
author = "Far Beyond Marketing"
category = "Marketing"

[export]
# Writes "Category " with a trailing space, as older importers expect
legacy_headers = false

# Move the exported files to archive_dir
[archive]
enabled = false

[api]
base_url = "https://services.leadconnectorhq.com"
version = "2021-07-28"
# GHL_API_KEY and GHL_LOCATION_ID take precedence over this file
credentials_file = "ghl_config.json"

#[log]
#level = "Info"
#log_to_console = true
#location = "blog-tool.log"
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    if file_path.exists() {
        return Err(io::Error::new(io::ErrorKind::AlreadyExists, format!("{} already exists", file_path.display())));
    }

    let mut file = File::create(file_path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())
}
