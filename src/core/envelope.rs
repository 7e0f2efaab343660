use crate::core::errors::{Error, Result};
use reqwest::StatusCode;
use serde::Deserialize;

/*-------------------------------------------------------------------------------------------------
  Envelope Sentinels
-------------------------------------------------------------------------------------------------*/

/// Identifier value marking the last page of the ban list.
pub const END_OF_LIST: &str = "none";

const UNAUTHORIZED: &str = "unauthorized";
const RATE_LIMIT_EXCEEDED: &str = "rate limit exceeded";
const NO_NEW_BANS: &str = "no new bans";
const NOT_BLOCKED: &str = "not blocked";

/*-------------------------------------------------------------------------------------------------
  Envelope
-------------------------------------------------------------------------------------------------*/

/// A successfully decoded APIBAN reply.
///
/// Both endpoints answer with the same JSON shape: an `ID` string (the next cursor on the ban-list
/// endpoint) and an `ipaddress` field whose shape depends on the outcome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Envelope {
    pub id: String,
    pub addresses: Addresses,
}

/// The `ipaddress` field of an [Envelope].
///
/// String values never reach this type; the decoder turns them into [Error::RateLimit] or
/// [Error::BadRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Addresses {
    /// Field missing or `null`.
    #[default]
    Absent,

    /// `["no new bans"]`
    NoNewBans,

    /// `["not blocked"]`
    NotBlocked,

    /// Any other array of addresses.
    List(Vec<String>),
}

impl Envelope {
    /// True when the identifier is the end-of-list sentinel.
    pub fn is_end_of_list(&self) -> bool {
        self.id == END_OF_LIST
    }
}

impl Addresses {
    /// Addresses carried by a ban-list page; the sentinel markers yield an empty page.
    pub fn into_banned(self) -> Vec<String> {
        match self {
            Addresses::List(addresses) => addresses,
            Addresses::Absent | Addresses::NoNewBans | Addresses::NotBlocked => Vec::new(),
        }
    }

    /// True when the field is exactly one address equal to `address`.
    pub fn echoes(&self, address: &str) -> bool {
        match self {
            Addresses::List(addresses) => addresses.len() == 1 && addresses[0] == address,
            _ => false,
        }
    }
}

impl From<Vec<String>> for Addresses {
    fn from(addresses: Vec<String>) -> Self {
        if let [only] = addresses.as_slice() {
            match only.as_str() {
                NO_NEW_BANS => return Addresses::NoNewBans,
                NOT_BLOCKED => return Addresses::NotBlocked,
                _ => {}
            }
        }
        Addresses::List(addresses)
    }
}

/*-------------------------------------------------------------------------------------------------
  Decode
-------------------------------------------------------------------------------------------------*/

/// Decode a reply body into an [Envelope].
///
/// The status code is only used to re-label an undecodable body from a 4xx reply as
/// [Error::ClientError]; deciding what a status means for a given endpoint is up to the caller.
pub fn decode(status: StatusCode, body: &[u8]) -> Result<Envelope> {
    let json: JsonEnvelope = serde_json::from_slice(body).map_err(|error| {
        if status.is_client_error() {
            Error::ClientError(status)
        } else {
            Error::MalformedResponse(error)
        }
    })?;

    let id = json.id.unwrap_or_default();
    match id.as_str() {
        "" => return Err(Error::EmptyId),
        UNAUTHORIZED => return Err(Error::Unauthorized),
        _ => {}
    }

    let addresses = match json.ipaddress {
        None => Addresses::Absent,
        Some(JsonAddresses::Text(text)) if text == RATE_LIMIT_EXCEEDED => {
            return Err(Error::RateLimit)
        }
        Some(JsonAddresses::Text(_)) => return Err(Error::BadRequest),
        Some(JsonAddresses::List(addresses)) => Addresses::from(addresses),
    };

    Ok(Envelope { id, addresses })
}

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

#[derive(Debug, Deserialize)]
struct JsonEnvelope {
    #[serde(rename = "ID", alias = "id", default)]
    id: Option<String>,

    #[serde(default)]
    ipaddress: Option<JsonAddresses>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonAddresses {
    Text(String),
    List(Vec<String>),
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
