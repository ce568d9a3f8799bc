use std::io::stdout;

use clap::Parser;
use log::{error, info};
use tokio::io::{stdin, BufReader};

use secnotes::{App, Cli, Config, Result};

pub fn initialize_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let mut app = App::new(config);
    let mut out = stdout().lock();

    if let Some(path) = cli.import {
        app.import(&path, &mut out).await?;
    }

    app.run(BufReader::new(stdin()), &mut out).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);
    info!("Application starting up");

    if let Err(e) = run(cli).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    info!("Application shutting down");
}
