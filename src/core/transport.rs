use crate::core::errors::{Error, Result};
use log::trace;
use reqwest::Response;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/*-------------------------------------------------------------------------------------------------
  Transport
-------------------------------------------------------------------------------------------------*/

/// Issues single HTTP GET requests that abort when the cancellation token fires. No retries.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
}

impl Transport {
    pub(crate) fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { http })
    }

    /// Send one GET request. The returned response owns the unread body; dropping it releases
    /// the connection.
    pub(crate) async fn get(&self, url: &str, cancel: &CancellationToken) -> Result<Response> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            response = self.http.get(url).send() => {
                let response = response?;
                trace!("Received {}", response.status());
                Ok(response)
            }
        }
    }
}

/// Read a response body to the end, aborting when the cancellation token fires.
pub(crate) async fn read_body(response: Response, cancel: &CancellationToken) -> Result<Vec<u8>> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        body = response.bytes() => Ok(body?.to_vec()),
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
