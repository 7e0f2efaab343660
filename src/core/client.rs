use crate::core::errors::{Error, Result};
use crate::core::transport::Transport;
use reqwest::Url;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/*-------------------------------------------------------------------------------------------------
  Defaults
-------------------------------------------------------------------------------------------------*/

/// Base URL of the public APIBAN service.
pub const DEFAULT_URL: &str = "https://apiban.org/api/";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT: u64 = 30_000;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// _**Simple library interface**_ retrieves the full APIBAN ban list with a default [Client].
/// Keys are tried in order; a key is only abandoned when the service rate limits it.
///
/// ```no_run
/// # async fn run() -> apiban::Result<()> {
/// let banned = apiban::get_banned(&["my-api-key", "my-fallback-key"]).await?;
/// for address in banned {
///     println!("{address}");
/// }
/// # Ok(())
/// # }
/// ```
pub async fn get_banned<K: AsRef<str>>(keys: &[K]) -> Result<Vec<String>> {
    Client::new()?
        .get_banned(keys, &CancellationToken::new())
        .await
}

/// _**Simple library interface**_ checks whether a single address is banned with a default
/// [Client].
///
/// ```no_run
/// # async fn run() -> apiban::Result<()> {
/// let banned = apiban::check_ip("1.2.3.251", &["my-api-key"]).await?;
/// println!("banned: {banned}");
/// # Ok(())
/// # }
/// ```
pub async fn check_ip<K: AsRef<str>>(address: &str, keys: &[K]) -> Result<bool> {
    Client::new()?
        .check_ip(address, keys, &CancellationToken::new())
        .await
}

/*-------------------------------------------------------------------------------------------------
  Client Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Client] struct that allows you to customize the client configuration.
///
/// ```
/// let client = apiban::ClientBuilder::new()
///     .url("http://localhost:8080/api/")
///     .timeout(5000) // 5 seconds
///     .user_agent("my-firewall/1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(client.url(), "http://localhost:8080/api/");
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    url: String,
    timeout: u64,
    user_agent: String,
}

/*--------------------------------------------------------------------------------------
  Client Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the base URL of the APIBAN API; defaults to `https://apiban.org/api/`. Endpoint URLs
    /// are built as `{url}{key}/banned/{cursor}` and `{url}{key}/check/{address}`; a missing
    /// trailing `/` is added by [ClientBuilder::build].
    pub fn url(&mut self, url: &str) -> &mut Self {
        self.url = url.to_string();
        self
    }

    /// Set the per-request timeout in milliseconds; defaults to `30000`.
    pub fn timeout(&mut self, timeout: u64) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header sent with every request.
    pub fn user_agent(&mut self, user_agent: &str) -> &mut Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Result<Client> {
        let mut url = self.url.clone();
        if !url.ends_with('/') {
            url.push('/');
        }

        let parsed = Url::parse(&url)
            .map_err(|error| Error::Config(format!("invalid URL {url:?}: {error}")))?;
        if parsed.cannot_be_a_base() {
            return Err(Error::Config(format!("URL {url:?} cannot be a base URL")));
        }

        let transport = Transport::new(Duration::from_millis(self.timeout), &self.user_agent)?;

        Ok(Client {
            url,
            timeout: self.timeout,
            user_agent: self.user_agent.clone(),
            transport,
        })
    }
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// A client for the APIBAN blocklist service.
///
/// The client holds its configuration and a connection pool; it carries no per-call state, so
/// clones can be shared freely between tasks.
///
/// ```no_run
/// # async fn run() -> apiban::Result<()> {
/// let client = apiban::Client::new()?;
/// let cancel = apiban::CancellationToken::new();
///
/// let banned = client.get_banned(&["my-api-key"], &cancel).await?;
/// let is_banned = client.check_ip("1.2.3.251", &["my-api-key"], &cancel).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    timeout: u64,
    user_agent: String,
    transport: Transport,
}

/*--------------------------------------------------------------------------------------
  Client Implementation
--------------------------------------------------------------------------------------*/

impl Client {
    /// Create a [Client] with the default configuration.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Get the base URL of the APIBAN API, always ending in `/`.
    ///
    /// ```
    /// let client = apiban::Client::new().unwrap();
    /// assert_eq!(client.url(), "https://apiban.org/api/");
    /// ```
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the per-request timeout in milliseconds.
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /*-------------------------------------------------------------------------
      Crate Methods
    -------------------------------------------------------------------------*/

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    pub(crate) fn banned_url(&self, key: &str, cursor: &str) -> String {
        format!("{}{}/banned/{}", self.url, key, cursor)
    }

    pub(crate) fn check_url(&self, key: &str, address: &str) -> String {
        format!("{}{}/check/{}", self.url, key, address)
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
