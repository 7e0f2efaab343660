mod cli;

use apiban::{CancellationToken, ClientBuilder};
use clap::Parser;
use log::{error, warn};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Args::parse();

    if let Err(error) = stderrlog::new()
        .module(module_path!())
        .verbosity(args.verbose.log_level_filter())
        .init()
    {
        eprintln!("Failed to initialize logging: {error}");
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: cli::Args) -> cli::Result<()> {
    let client = ClientBuilder::new()
        .url(&args.url)
        .timeout(args.timeout)
        .build()?;

    // Ctrl-C aborts the in-flight request
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted; cancelling request");
                cancel.cancel();
            }
        }
    });

    cli::log::keys(&args.keys);

    match &args.command {
        cli::Command::Banned { output, csv_file } => {
            cli::banned(&client, &args.keys, &cancel, *output, csv_file.as_deref()).await
        }
        cli::Command::Check { address } => cli::check(&client, &args.keys, &cancel, address).await,
    }
}
