use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use netprobe::cli::Cli;
use netprobe::engine;
use netprobe::output;
use netprobe::validator::SystemResolver;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_filter())).init();

    let params = cli.to_params()?;

    let results = engine::run(&params, &SystemResolver)
        .await
        .with_context(|| format!("Probe of {} failed", params.destination))?;

    println!("{}", output::to_json_pretty(&results)?);

    if let Some(path) = cli.output.as_deref() {
        output::to_json_file(&results, path)
            .with_context(|| format!("Failed to write results to {}", path))?;
    }

    Ok(())
}
