use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about = "Query the APIBAN IP blocklist.", long_about = None)]
pub struct Args {
    /// APIBAN API key; repeat (or comma-separate) to add fallback keys for rate-limited keys
    #[arg(
        short = 'k',
        long = "key",
        env = "APIBAN_KEYS",
        value_delimiter = ',',
        hide_env_values = true,
        global = true
    )]
    pub keys: Vec<String>,

    /// APIBAN API base URL
    #[arg(long, env = "APIBAN_URL", default_value = apiban::DEFAULT_URL, global = true)]
    pub url: String,

    /// Request timeout in milliseconds
    #[arg(long, env = "APIBAN_TIMEOUT", default_value_t = apiban::DEFAULT_TIMEOUT, global = true)]
    pub timeout: u64,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Retrieve the full list of banned IP addresses
    Banned {
        /// Output format
        #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::List)]
        output: OutputFormat,

        /// Save the banned addresses to a CSV file
        #[arg(long = "csv")]
        csv_file: Option<PathBuf>,
    },

    /// Check whether an IP address is banned
    Check {
        /// IP address to check
        address: String,
    },
}

/*--------------------------------------------------------------------------------------
  Output Format
--------------------------------------------------------------------------------------*/

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One address per line
    #[default]
    List,

    /// Table with a summary
    Table,

    /// JSON array
    Json,
}
