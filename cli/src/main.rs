// Use modules from the library crate
use registrygen::{GenerateOptions, generate, logging};

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "registrygen",
    about = "Generate a component registry manifest (registry.json) from annotated source files",
    version
)]
struct Cli {
    /// Directory to scan; usually a folder below the project's src/
    directory: PathBuf,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Registry name (defaults to registryPrefix + directory name)
    #[arg(long)]
    name: Option<String>,

    /// Registry homepage (defaults to homePage from registrygen-config.json)
    #[arg(long)]
    homepage: Option<String>,

    /// Output file (defaults to <DIRECTORY>/registry.json)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let options = GenerateOptions {
        directory: cli.directory,
        name: cli.name,
        homepage: cli.homepage,
        output: cli.output,
    };

    generate(&options).await?;
    Ok(())
}
