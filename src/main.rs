use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;
use comics_manager::ScrapeError;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        let code = err
            .downcast_ref::<ScrapeError>()
            .map(ScrapeError::exit_code)
            .unwrap_or(1);
        return ExitCode::from(code);
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    comics_manager::logging::init().context("init logging")?;

    let cli = comics_manager::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    comics_manager::scrape::run(cli)
}
