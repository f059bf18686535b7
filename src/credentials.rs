use std::fmt::{Debug, Formatter};
use std::io::ErrorKind;
use std::path::Path;
use std::{env, fmt, fs, io};

use serde::Deserialize;

pub const API_KEY_ENV: &str = "GHL_API_KEY";
pub const LOCATION_ID_ENV: &str = "GHL_LOCATION_ID";

#[derive(Deserialize, Default)]
struct CredentialsFile {
    api_key: Option<String>,
    location_id: Option<String>,
}

/// Blog API credentials, resolved once at startup
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub api_key: String,
    pub location_id: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("location_id", &self.location_id)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn read_credentials_file(path: &Path) -> io::Result<CredentialsFile> {
    if !path.exists() {
        return Ok(CredentialsFile::default());
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| io::Error::new(
        ErrorKind::InvalidData, format!("Error parsing credentials file {}: {}", path.display(), e)))
}

impl Credentials {
    /// Each value comes from the environment first, then from the JSON file.
    pub fn resolve(env_api_key: Option<String>, env_location_id: Option<String>, file: &Path) -> io::Result<Credentials> {
        let mut api_key = non_empty(env_api_key);
        let mut location_id = non_empty(env_location_id);

        if api_key.is_none() || location_id.is_none() {
            let from_file = read_credentials_file(file)?;
            api_key = api_key.or(non_empty(from_file.api_key));
            location_id = location_id.or(non_empty(from_file.location_id));
        }

        match (api_key, location_id) {
            (Some(api_key), Some(location_id)) => Ok(Credentials { api_key, location_id }),
            _ => Err(io::Error::new(
                ErrorKind::NotFound,
                format!("GHL credentials not set. Set {} and {} env vars or create {}",
                        API_KEY_ENV, LOCATION_ID_ENV, file.display()))),
        }
    }

    pub fn from_env(file: &Path) -> io::Result<Credentials> {
        Self::resolve(env::var(API_KEY_ENV).ok(), env::var(LOCATION_ID_ENV).ok(), file)
    }
}
