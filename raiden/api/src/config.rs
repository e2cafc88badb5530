use std::time::Duration;

use raiden_state_machine::constants::{
	DEFAULT_PUNISH_WINDOW,
	DEFAULT_SETTLE_TIMEOUT,
};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DisputeConfig {
	/// Blocks after the close during which balance proofs can still be updated.
	pub settle_timeout: u64,
	/// Blocks after an update during which obsolete unlocks can be punished.
	pub punish_window: u64,
	/// Upper bound for a transition to get its transactions confirmed.
	pub transaction_timeout: Duration,
}

impl Default for DisputeConfig {
	fn default() -> Self {
		Self {
			settle_timeout: DEFAULT_SETTLE_TIMEOUT,
			punish_window: DEFAULT_PUNISH_WINDOW,
			transaction_timeout: Duration::from_secs(180),
		}
	}
}
