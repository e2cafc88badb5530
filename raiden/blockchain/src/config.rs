use std::time::Duration;

use serde::Deserialize;

/// Settings of the chain client and the transactions sent through it.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ChainClientConfig {
	pub eth_rpc_endpoint: String,
	/// Delay between two attempts to dial the node after a disconnect.
	pub reconnect_interval: Duration,
	/// Give up reconnecting after this many failed dials. Unbounded when not set.
	pub max_reconnect_attempts: Option<u32>,
	pub receipt_poll_interval: Duration,
}

impl Default for ChainClientConfig {
	fn default() -> Self {
		Self {
			eth_rpc_endpoint: "http://localhost:8545".to_owned(),
			reconnect_interval: Duration::from_secs(3),
			max_reconnect_attempts: None,
			receipt_poll_interval: Duration::from_secs(1),
		}
	}
}
