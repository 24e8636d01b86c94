//! Command-line arguments for `sift`

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Find sentences containing every search term and edit them in place
#[derive(Parser, Debug)]
#[command(name = "sift", version, about)]
pub struct CliArgs {
    /// Text file to open
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Run this search right after loading
    #[arg(short, long, value_name = "QUERY")]
    pub terms: Option<String>,

    /// Language code for sentence segmentation (overrides the config file)
    #[arg(short, long, value_name = "CODE")]
    pub language: Option<String>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write logs to this file (overrides the config file)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    /// Applies command-line overrides on top of the loaded config.
    pub fn merge_into(&self, mut config: Config) -> Config {
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.clone());
        }
        config
    }
}
