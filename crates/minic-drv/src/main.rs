use std::path::PathBuf;

use clap::Parser as ClapParser;
use minic_drv::{DriverError, Pipeline};

/// Compiles a source file through the full pipeline and prints the
/// resulting bundle as pretty JSON.
#[derive(ClapParser, Debug)]
#[command(name = "minic", about = "A toy C-like language compiler and interpreter")]
struct Cli {
    /// Source file to compile
    source: PathBuf,

    /// Mark the result bundle for external persistence. This binary
    /// performs no persistence itself.
    #[arg(long)]
    persist: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let source = std::fs::read_to_string(&cli.source).map_err(|e| DriverError::ReadSource {
        path: cli.source.clone(),
        source: e,
    })?;

    let result = Pipeline::compile(&source, cli.persist);
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
