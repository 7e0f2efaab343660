use crate::core::client::Client;
use crate::core::envelope::{self, Addresses, Envelope};
use crate::core::errors::{Error, Result};
use crate::core::transport;
use log::{debug, info, warn};
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

/*-------------------------------------------------------------------------------------------------
  Check IP
-------------------------------------------------------------------------------------------------*/

impl Client {
    /// Check whether `address` is currently banned.
    ///
    /// The address and key list must both be non-empty; these are checked before any request is
    /// made. Keys are tried in order and the next key is only used when the current one is rate
    /// limited. A success reply must echo exactly the queried address; a "not blocked" reply
    /// arrives as a `400` carrying the end-of-list identifier. Anything else is
    /// [Error::BadRequest].
    pub async fn check_ip<K: AsRef<str>>(
        &self,
        address: &str,
        keys: &[K],
        cancel: &CancellationToken,
    ) -> Result<bool> {
        if address.is_empty() {
            return Err(Error::MissingAddress);
        }
        if keys.is_empty() {
            return Err(Error::MissingKeys);
        }

        for (index, key) in keys.iter().enumerate() {
            match self.check_ip_with_key(address, key.as_ref(), cancel).await {
                Err(Error::RateLimit) => {
                    warn!("API key {} of {} is rate limited", index + 1, keys.len());
                }
                verdict => return verdict,
            }
        }

        Err(Error::RateLimit)
    }

    async fn check_ip_with_key(
        &self,
        address: &str,
        key: &str,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        info!("Check IP address {address}");

        let response = self
            .transport()
            .get(&self.check_url(key, address), cancel)
            .await?;
        let status = response.status();
        check_status(status)?;

        let body = transport::read_body(response, cancel).await?;
        let envelope = envelope::decode(status, &body)?;
        debug!("{status}: {envelope:?}");

        verdict(status, address, &envelope)
    }
}

/// Only 1xx, 3xx, and 5xx replies are rejected before the body is decoded; every 4xx still
/// carries an envelope on this endpoint.
fn check_status(status: StatusCode) -> Result<()> {
    if status.is_success() || status.is_client_error() {
        Ok(())
    } else {
        Err(Error::UnexpectedStatus(status))
    }
}

/// A success reply is a positive answer when it echoes exactly the queried address. Its `ID` is
/// not inspected: the service answers with both `"none"` and opaque identifiers here.
fn verdict(status: StatusCode, address: &str, envelope: &Envelope) -> Result<bool> {
    if status.is_success() {
        if envelope.addresses.echoes(address) {
            Ok(true)
        } else {
            Err(Error::BadRequest)
        }
    } else if envelope.is_end_of_list() && envelope.addresses == Addresses::NotBlocked {
        Ok(false)
    } else {
        Err(Error::BadRequest)
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::ClientBuilder;
    use crate::core::errors::log_error;
    use mockito::{Matcher, Mock, Server, ServerGuard};

    fn setup_client(server: &ServerGuard) -> Client {
        ClientBuilder::new().url(&server.url()).build().unwrap()
    }

    async fn mock_check(server: &mut ServerGuard, path: &str, status: usize, body: &str) -> Mock {
        server
            .mock("GET", path)
            .with_status(status)
            .with_body(body)
            .expect(1)
            .create_async()
            .await
    }

    async fn check_ip(server: &ServerGuard, address: &str, keys: &[&str]) -> Result<bool> {
        setup_client(server)
            .check_ip(address, keys, &CancellationToken::new())
            .await
            .inspect_err(log_error)
    }

    /*-------------------------------------------------------------------------
      Verdicts
    -------------------------------------------------------------------------*/

    #[test_log::test(tokio::test)]
    async fn test_banned_with_sentinel_id() {
        let mut server = Server::new_async().await;
        let mock = mock_check(
            &mut server,
            "/testKey/check/1.2.3.251",
            200,
            r#"{"ID": "none", "ipaddress": ["1.2.3.251"]}"#,
        )
        .await;

        assert!(check_ip(&server, "1.2.3.251", &["testKey"]).await.unwrap());

        mock.assert_async().await;
    }

    #[test_log::test(tokio::test)]
    async fn test_banned_with_opaque_id() {
        let mut server = Server::new_async().await;
        let mock = mock_check(
            &mut server,
            "/testKey/check/1.2.3.251",
            200,
            r#"{"ipaddress": ["1.2.3.251"], "ID": "987654321"}"#,
        )
        .await;

        assert!(check_ip(&server, "1.2.3.251", &["testKey"]).await.unwrap());

        mock.assert_async().await;
    }

    #[test_log::test(tokio::test)]
    async fn test_not_blocked() {
        let mut server = Server::new_async().await;
        let mock = mock_check(
            &mut server,
            "/testKey/check/1.2.3.254",
            400,
            r#"{"ipaddress": ["not blocked"], "ID": "none"}"#,
        )
        .await;

        assert!(!check_ip(&server, "1.2.3.254", &["testKey"]).await.unwrap());

        mock.assert_async().await;
    }

    #[test_log::test(tokio::test)]
    async fn test_success_without_echo_is_bad_request() {
        let mut server = Server::new_async().await;
        let _mocks = [
            mock_check(
                &mut server,
                "/badReq/check/1.2.3.251",
                200,
                r#"{"ipaddress": ["1.2.3.252"], "ID": "987654321"}"#,
            )
            .await,
            mock_check(
                &mut server,
                "/twoAddresses/check/1.2.3.251",
                200,
                r#"{"ipaddress": ["1.2.3.251", "1.2.3.252"], "ID": "987654321"}"#,
            )
            .await,
            mock_check(&mut server, "/noAddresses/check/1.2.3.251", 200, r#"{"ID": "none"}"#)
                .await,
        ];

        for key in ["badReq", "twoAddresses", "noAddresses"] {
            let result = check_ip(&server, "1.2.3.251", &[key]).await;
            assert!(matches!(result, Err(Error::BadRequest)), "{key}");
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_invalid_address_is_bad_request() {
        let mut server = Server::new_async().await;
        let mut mocks = Vec::new();
        let addresses = [
            "1.2.3.257",
            "foo.bar",
            "1000:0000:0000:0000:0000:0000:0000:000g",
        ];
        for address in addresses {
            let mock = mock_check(
                &mut server,
                &format!("/testKey/check/{address}"),
                400,
                r#"{"ipaddress": ["invalid address"], "ID": "none"}"#,
            )
            .await;
            mocks.push(mock);
        }

        for address in addresses {
            let result = check_ip(&server, address, &["testKey"]).await;
            assert!(matches!(result, Err(Error::BadRequest)), "{address}");
        }

        for mock in mocks {
            mock.assert_async().await;
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_not_blocked_requires_sentinel_id() {
        let mut server = Server::new_async().await;
        let _mock = mock_check(
            &mut server,
            "/testKey/check/1.2.3.254",
            400,
            r#"{"ipaddress": ["not blocked"], "ID": "12345"}"#,
        )
        .await;

        let result = check_ip(&server, "1.2.3.254", &["testKey"]).await;
        assert!(matches!(result, Err(Error::BadRequest)));
    }

    /*-------------------------------------------------------------------------
      Preconditions
    -------------------------------------------------------------------------*/

    #[test_log::test(tokio::test)]
    async fn test_preconditions_send_nothing() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let result = check_ip(&server, "", &["testKey"]).await;
        assert_eq!(result.unwrap_err().to_string(), "IP address is required");

        let result = check_ip(&server, "1.2.3.251", &[]).await;
        assert_eq!(result.unwrap_err().to_string(), "API keys are required");

        mock.assert_async().await;
    }

    /*-------------------------------------------------------------------------
      Key Fallback
    -------------------------------------------------------------------------*/

    #[test_log::test(tokio::test)]
    async fn test_rate_limited_key_falls_back() {
        let mut server = Server::new_async().await;
        let limited = mock_check(
            &mut server,
            "/testRateLimit/check/1.2.3.251",
            429,
            r#"{"ipaddress": "rate limit exceeded", "ID": "none"}"#,
        )
        .await;
        let fallback = mock_check(
            &mut server,
            "/testKey/check/1.2.3.251",
            200,
            r#"{"ipaddress": ["1.2.3.251"], "ID": "987654321"}"#,
        )
        .await;

        let banned = check_ip(&server, "1.2.3.251", &["testRateLimit", "testKey"])
            .await
            .unwrap();
        assert!(banned);

        limited.assert_async().await;
        fallback.assert_async().await;
    }

    #[test_log::test(tokio::test)]
    async fn test_every_key_rate_limited() {
        let mut server = Server::new_async().await;
        let _mock = mock_check(
            &mut server,
            "/testRateLimit/check/1.2.3.251",
            429,
            r#"{"ipaddress": "rate limit exceeded", "ID": "none"}"#,
        )
        .await;

        let result = check_ip(&server, "1.2.3.251", &["testRateLimit"]).await;
        assert!(matches!(result, Err(Error::RateLimit)));
    }

    #[test_log::test(tokio::test)]
    async fn test_first_verdict_ends_fallback() {
        let mut server = Server::new_async().await;
        let _first = mock_check(
            &mut server,
            "/first/check/1.2.3.254",
            400,
            r#"{"ipaddress": ["not blocked"], "ID": "none"}"#,
        )
        .await;
        let unused = server
            .mock("GET", "/second/check/1.2.3.254")
            .expect(0)
            .create_async()
            .await;

        let banned = check_ip(&server, "1.2.3.254", &["first", "second"])
            .await
            .unwrap();
        assert!(!banned);

        unused.assert_async().await;
    }

    /*-------------------------------------------------------------------------
      Status and Envelope Errors
    -------------------------------------------------------------------------*/

    #[test_log::test(tokio::test)]
    async fn test_server_error_is_unexpected_status() {
        let mut server = Server::new_async().await;
        let _mock = mock_check(
            &mut server,
            "/badStatus/check/1.2.3.251",
            500,
            r#"{"ipaddress": ["1.2.3.252"], "ID": "987654321"}"#,
        )
        .await;

        let result = check_ip(&server, "1.2.3.251", &["badStatus"]).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "unexpected status code<500 Internal Server Error>"
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_empty_not_found_body_is_client_error() {
        let mut server = Server::new_async().await;
        let _mock = mock_check(&mut server, "/badKey/check/1.2.3.251", 404, "").await;

        let result = check_ip(&server, "1.2.3.251", &["badKey"]).await;
        assert!(matches!(
            result,
            Err(Error::ClientError(StatusCode::NOT_FOUND))
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_unauthorized() {
        let mut server = Server::new_async().await;
        let _mock = mock_check(
            &mut server,
            "/badAuth/check/1.2.3.251",
            401,
            r#"{"ID": "unauthorized"}"#,
        )
        .await;

        let result = check_ip(&server, "1.2.3.251", &["badAuth"]).await;
        assert!(matches!(result, Err(Error::Unauthorized)));
    }

    #[test_log::test(tokio::test)]
    async fn test_cancelled_before_start() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = setup_client(&server)
            .check_ip("1.2.3.251", &["testKey"], &cancel)
            .await;
        assert!(matches!(result, Err(Error::Cancelled)));

        mock.assert_async().await;
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(StatusCode::OK).is_ok());
        assert!(check_status(StatusCode::BAD_REQUEST).is_ok());
        assert!(check_status(StatusCode::TOO_MANY_REQUESTS).is_ok());
        for status in [
            StatusCode::CONTINUE,
            StatusCode::NOT_MODIFIED,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            assert!(matches!(
                check_status(status),
                Err(Error::UnexpectedStatus(_))
            ));
        }
    }
}
