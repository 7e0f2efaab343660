use log::{info, warn};

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  API Keys
--------------------------------------------------------------------------------------*/

pub fn keys(keys: &[String]) {
    match keys.len() {
        0 => warn!("No API keys supplied; use --key or APIBAN_KEYS"),
        1 => info!("Using 1 API key"),
        count => info!("Using {count} API keys; falling back on rate limit"),
    }
}

/*--------------------------------------------------------------------------------------
  Ban List Summary
--------------------------------------------------------------------------------------*/

pub fn banned_summary(banned: &[String]) {
    let count_ipv6 = banned.iter().filter(|address| address.contains(':')).count();
    let count_ipv4 = banned.len() - count_ipv6;
    info!("Retrieved {} banned address(es): {count_ipv4} IPv4, {count_ipv6} IPv6", banned.len());
}
