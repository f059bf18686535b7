use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use spdlog::{error, info, warn};

use blog_export::config::Config;
use blog_export::credentials::Credentials;
use blog_export::csv_export::{BACKUP_FILE_NAME, EXPORT_FILE_NAME, WEEKLY_FILE_NAME};
use blog_export::logger::configure_logger;
use blog_export::runner::{run_export, run_post, RunOptions, RunReport};

use crate::config::open_config;
use crate::config_data::write_sample_cfg;

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "blog-export.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Exports the blog posts to a CSV file
    Export(RunArgs),
    /// Weekly export, written to weekly_blogs.csv by default
    Weekly(RunArgs),
    /// Posts every blog post to the blog API, then writes a CSV backup
    Post(RunArgs),
    /// Writes a sample configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct RunArgs {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Folder with the blog post files
    #[arg(short, long)]
    source_dir: Option<String>,

    /// Folder where the CSV file is written
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Name of the CSV file
    #[arg(short, long)]
    file_name: Option<String>,

    /// Moves the exported post files to the archive folder
    #[arg(long)]
    archive: bool,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct InitArgs {
    /// Directory where the configuration is written
    #[arg(short, long, default_value = ".")]
    out_dir: String,
}

fn load_config(args: &RunArgs) -> Result<Config> {
    let config = match open_config(args.config_path.as_ref().map(PathBuf::from)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run blog-tool --help");
            anyhow::bail!("Invalid configuration");
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    Ok(config)
}

fn run_options(config: &Config, args: &RunArgs, default_file_name: &str) -> RunOptions {
    let mut options = RunOptions::from_config(config, args.file_name.as_deref().unwrap_or(default_file_name));
    if let Some(ref source_dir) = args.source_dir {
        options.source_dir = PathBuf::from(source_dir);
    }
    if let Some(ref output_dir) = args.output_dir {
        options.output_dir = PathBuf::from(output_dir);
    }
    options.archive |= args.archive;
    options
}

fn report(result: Result<RunReport>) -> Result<()> {
    match result {
        Ok(report) => {
            info!("=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
            info!("{}", report);
            Ok(())
        }
        Err(err) => {
            error!("{:#}", err);
            Err(err)
        }
    }
}

fn export_cmd(args: RunArgs, default_file_name: &str) -> Result<()> {
    let config = load_config(&args)?;
    let options = run_options(&config, &args, default_file_name);

    info!("Blog export from {}", options.source_dir.display());
    report(run_export(&config, &options))
}

fn post_cmd(args: RunArgs) -> Result<()> {
    let config = load_config(&args)?;
    let options = run_options(&config, &args, BACKUP_FILE_NAME);

    let credentials = match Credentials::from_env(&config.api.credentials_file) {
        Ok(credentials) => Some(credentials),
        Err(err) => {
            error!("{}", err);
            None
        }
    };

    info!("Blog post from {}", options.source_dir.display());
    report(run_post(&config, &options, credentials))
}

fn init_cmd(args: InitArgs) -> Result<()> {
    let path = PathBuf::from(&args.out_dir).join(CFG_FILE_NAME);
    write_sample_cfg(&path)?;
    println!("Configuration written to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args {
        Args::Export(args) => export_cmd(args, EXPORT_FILE_NAME),
        Args::Weekly(args) => export_cmd(args, WEEKLY_FILE_NAME),
        Args::Post(args) => post_cmd(args),
        Args::Init(args) => init_cmd(args),
    }
}
