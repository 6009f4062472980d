use clap::Parser;
use tracing_subscriber::EnvFilter;

mod brapi;
mod cli;
mod graph;
mod matrix;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("hapmat=debug,info")
    } else {
        EnvFilter::new("hapmat=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Ranges(args) => {
            cli::ranges::run(args, cli.format, cli.verbose, cli.timeout)?;
        }
        cli::Commands::Alleles(args) => {
            cli::alleles::run(args, cli.format, cli.verbose, cli.timeout)?;
        }
        cli::Commands::Matrix(args) => {
            cli::matrix::run(args, cli.format, cli.verbose, cli.timeout)?;
        }
        cli::Commands::Index(args) => {
            cli::index::run(args, cli.format, cli.verbose, cli.timeout)?;
        }
    }

    Ok(())
}
