use std::env;
use std::path::PathBuf;

use blog_export::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir();

    [exe_dir, cur_dir, cfg_dir].into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// An explicit path must exist. Otherwise the first configuration found is
/// used, falling back to the built-in defaults.
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => {
            println!("No {} found. Using default configuration", CFG_FILE_NAME);
            return Ok(Config::default());
        }
        Some(x) => x,
    };

    println!("Reading config from {}", config_path.display());
    let mut config = match read_config(&config_path) {
        Ok(config) => config,
        Err(e) => return Err(e.to_string()),
    };

    if let Some(ref mut log) = config.log {
        match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None if log.log_to_console => println!("Log enabled. Using console"),
            None => {
                let location = dirs::cache_dir()
                    .unwrap_or_else(env::temp_dir)
                    .join("blog-export").join("log").join("blog-tool.log");
                println!("Log enabled. Files will be written in {}", location.display());
                log.location = Some(location);
            }
        }
    }

    Ok(config)
}
