#![warn(clippy::missing_docs_in_private_items)]

/// Chain client capability, forwarding client and reconnecting adapter.
pub mod client;
/// Chain client configuration.
pub mod config;
/// Blockchain errors.
pub mod errors;
/// Contract proxies.
pub mod proxies;
/// Contract transactions.
pub mod transactions;
