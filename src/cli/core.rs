use crate::cli::{self, OutputFormat, Result};
use apiban::{CancellationToken, Client};
use log::warn;
use std::net::IpAddr;
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Banned Command
--------------------------------------------------------------------------------------*/

pub async fn banned(
    client: &Client,
    keys: &[String],
    cancel: &CancellationToken,
    output: OutputFormat,
    csv_file: Option<&Path>,
) -> Result<()> {
    let banned = client.get_banned(keys, cancel).await?;
    cli::log::banned_summary(&banned);

    match output {
        OutputFormat::List => cli::output::banned_list(&banned),
        OutputFormat::Table => cli::output::banned_table(&banned),
        OutputFormat::Json => cli::output::banned_json(&banned)?,
    }

    if let Some(path) = csv_file {
        cli::csv::save(&banned, path)?;
    }

    Ok(())
}

/*--------------------------------------------------------------------------------------
  Check Command
--------------------------------------------------------------------------------------*/

pub async fn check(
    client: &Client,
    keys: &[String],
    cancel: &CancellationToken,
    address: &str,
) -> Result<()> {
    if !address.is_empty() && address.parse::<IpAddr>().is_err() {
        warn!("{address:?} is not an IP address; the service will likely reject it");
    }

    let banned = client.check_ip(address, keys, cancel).await?;
    cli::output::check_result(address, banned);

    Ok(())
}
