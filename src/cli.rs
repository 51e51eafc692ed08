//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Privacy API - IP geolocation, WHOIS and phishing checks over HTTP
#[derive(Parser, Debug)]
#[command(name = "privacy-api")]
#[command(version)]
#[command(about = "IP geolocation, WHOIS and phishing-domain lookups over HTTP", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Write a sample configuration file
    GenerateConfig {
        /// Output path (default: config.example.toml)
        path: Option<String>,
    },
}
