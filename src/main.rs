use anyhow::{Context, Result};
use clap::Parser;

use privacy_api::cli::{Cli, Commands};
use privacy_api::config::StaticConfig;
use privacy_api::runtime::run_server;
use privacy_api::system::init_logging;

const SAMPLE_CONFIG_PATH: &str = "config.example.toml";

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::GenerateConfig { path }) => {
            let path = path.as_deref().unwrap_or(SAMPLE_CONFIG_PATH);
            StaticConfig::default()
                .save_to_file(path)
                .with_context(|| format!("Failed to write sample config to {}", path))?;
            println!("Sample configuration written to {}", path);
            Ok(())
        }
        Some(Commands::Serve) | None => {
            let config = StaticConfig::load(cli.config.as_deref()).map_err(|e| {
                eprintln!("{}", e.format_colored());
                anyhow::Error::new(e)
            })?;

            // guard 需要活到进程结束
            let _log_guard = init_logging(&config)?;
            run_server(&config).await
        }
    }
}
