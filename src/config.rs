use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::record::{DEFAULT_AUTHOR, DEFAULT_CATEGORY};

pub const DEFAULT_API_BASE: &str = "https://services.leadconnectorhq.com";
pub const DEFAULT_API_VERSION: &str = "2021-07-28";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Paths {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub archive_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            source_dir: PathBuf::from("new_blogs"),
            output_dir: PathBuf::from("csv_blogs"),
            archive_dir: PathBuf::from("processed_blogs"),
        }
    }
}

/// Values used for record fields missing from the post frontmatter
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Defaults {
    pub author: String,
    pub category: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            author: DEFAULT_AUTHOR.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Export {
    /// Writes the historical `Category ` column name, trailing space included
    pub legacy_headers: bool,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Archive {
    pub enabled: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Api {
    pub base_url: String,
    pub version: String,
    pub credentials_file: PathBuf,
}

impl Default for Api {
    fn default() -> Self {
        Api {
            base_url: DEFAULT_API_BASE.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            credentials_file: PathBuf::from("ghl_config.json"),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub defaults: Defaults,
    pub export: Export,
    pub archive: Archive,
    pub api: Api,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if !path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    match (exe_dir, path.to_str()) {
        (Some(exe_dir), Some(str_path)) => {
            PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy()))
        }
        _ => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        source_dir: parse_path(cfg.paths.source_dir),
        output_dir: parse_path(cfg.paths.output_dir),
        archive_dir: parse_path(cfg.paths.archive_dir),
    };
    cfg.api.credentials_file = parse_path(cfg.api.credentials_file);

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
