/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod banned;
pub mod check;
pub mod client;
pub mod envelope;
pub mod errors;
pub mod transport;
