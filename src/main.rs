//! offer-search CLI - find the offers most related to a search term.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use offer_search::cli::Cli;
use offer_search::config::Config;
use offer_search::data::ReferenceData;
use offer_search::output::Report;
use offer_search::prompt::resolve_term;
use offer_search::semantic::find_offers;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the prompt and the report.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> offer_search::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default(".")?,
    }
    .with_overrides(cli.brands, cli.categories, cli.offers, cli.format);
    debug!(?config, "loaded configuration");

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let data = ReferenceData::load(&config.data)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = stdout.lock();
    let classified = resolve_term(&data, cli.term.as_deref(), &mut stdin.lock(), &mut output)?;

    let ranking = find_offers(&data, &classified)?;
    let report = Report::new(&ranking, data.offers(), &classified);
    config.output.format.write(&report, &mut output)?;
    output.flush()?;
    Ok(())
}
