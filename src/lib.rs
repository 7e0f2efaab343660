//! A client for the [APIBAN](https://apiban.org) IP blocklist service.
//!
//! The service exposes two operations, both available on [Client]:
//!
//! - [Client::get_banned] retrieves the full ban list, following the server's page cursor;
//! - [Client::check_ip] checks whether a single address is banned.
//!
//! Both take an ordered list of API keys. The keys form a fallback chain: the next key is used
//! only when the service rate limits the current one. Both also take a [CancellationToken]; when
//! it fires the in-flight request is aborted and the call returns [Error::Cancelled].
//!
//! ```no_run
//! # async fn run() -> apiban::Result<()> {
//! let client = apiban::ClientBuilder::new().timeout(10_000).build()?;
//! let cancel = apiban::CancellationToken::new();
//!
//! let banned = client.get_banned(&["my-api-key"], &cancel).await?;
//! println!("{} banned address(es)", banned.len());
//! # Ok(())
//! # }
//! ```

mod core;

/*-------------------------------------------------------------------------------------------------
  Public Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::client::{check_ip, get_banned, Client, ClientBuilder};
pub use crate::core::client::{DEFAULT_TIMEOUT, DEFAULT_URL};
pub use crate::core::envelope::{decode, Addresses, Envelope, END_OF_LIST};
pub use crate::core::errors::{Error, Result};

/*-------------------------------------------------------------------------------------------------
  Re-exports
-------------------------------------------------------------------------------------------------*/

pub use reqwest::StatusCode;
pub use tokio_util::sync::CancellationToken;
