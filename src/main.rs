use clap::Parser;
use tracing_subscriber::EnvFilter;

use bq::cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    let config = cli::load_config()?;
    let output = cli::execute(args.command, &config)?;

    println!("{output}");
    Ok(())
}
