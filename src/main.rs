use anyhow::Result;
use clap::Parser;

use search::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
