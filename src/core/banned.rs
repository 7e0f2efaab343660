use crate::core::client::Client;
use crate::core::envelope::{self, Envelope};
use crate::core::errors::{Error, Result};
use crate::core::transport;
use log::{debug, info, warn};
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

/*-------------------------------------------------------------------------------------------------
  Ban List
-------------------------------------------------------------------------------------------------*/

/// Cursor for the first page of a fresh ban-list fetch; a server convention, not a count.
const FIRST_CURSOR: &str = "100";

impl Client {
    /// Retrieve every banned address, following the page cursor until the server reports the end
    /// of the list.
    ///
    /// Keys are a fallback chain, not independent sources: the next key is only tried when the
    /// current one is rate limited, and the first key to reach the end of the list ends the call.
    /// Addresses collected under a rate-limited key are kept. Any error other than
    /// [Error::RateLimit] is returned immediately; when every key is rate limited the call returns
    /// [Error::RateLimit]. An empty key list returns an empty list without any request.
    pub async fn get_banned<K: AsRef<str>>(
        &self,
        keys: &[K],
        cancel: &CancellationToken,
    ) -> Result<Vec<String>> {
        let mut banned = Vec::new();
        if keys.is_empty() {
            return Ok(banned);
        }

        for (index, key) in keys.iter().enumerate() {
            match self.get_banned_pages(key.as_ref(), cancel, &mut banned).await {
                Ok(()) => {
                    info!("Retrieved {} banned address(es)", banned.len());
                    return Ok(banned);
                }
                Err(Error::RateLimit) => {
                    warn!(
                        "API key {} of {} is rate limited; {} address(es) retrieved so far",
                        index + 1,
                        keys.len(),
                        banned.len()
                    );
                }
                Err(error) => return Err(error),
            }
        }

        Err(Error::RateLimit)
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    /// Follow the cursor with one key, appending each page to `banned`.
    async fn get_banned_pages(
        &self,
        key: &str,
        cancel: &CancellationToken,
        banned: &mut Vec<String>,
    ) -> Result<()> {
        let mut cursor = FIRST_CURSOR.to_string();
        loop {
            let Envelope { id, addresses } = self.get_banned_page(key, &cursor, cancel).await?;

            let page = addresses.into_banned();
            debug!("Page {cursor}: {} address(es), next cursor {id:?}", page.len());
            banned.extend(page);

            if id == envelope::END_OF_LIST {
                return Ok(());
            }
            cursor = id;
        }
    }

    async fn get_banned_page(
        &self,
        key: &str,
        cursor: &str,
        cancel: &CancellationToken,
    ) -> Result<Envelope> {
        info!("Get banned addresses; cursor {cursor}");

        let response = self
            .transport()
            .get(&self.banned_url(key, cursor), cancel)
            .await?;
        let status = response.status();
        check_status(status)?;

        let body = transport::read_body(response, cancel).await?;
        envelope::decode(status, &body)
    }
}

/// The ban-list endpoint may answer 400 with a valid "no new bans" envelope, so 400 is decoded
/// like a success. Every other 4xx is fatal without looking at the body, so a `429` ends the
/// call with [Error::ClientError] instead of moving on to the next key.
fn check_status(status: StatusCode) -> Result<()> {
    match status.as_u16() {
        200..=299 | 400 => Ok(()),
        401..=499 => Err(Error::ClientError(status)),
        500..=999 => Err(Error::ServerError(status)),
        _ => Err(Error::UnexpectedStatus(status)),
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
