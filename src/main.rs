use std::path::PathBuf;

use clap::Parser;

/// Clipboard history manager
#[derive(Debug, Parser)]
#[command(name = "clipkeep", version, about)]
struct Cli {
    /// Path to config.toml (defaults to the application config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    clipkeep_lib::bootstrap::run::run(cli.config).await
}
