#![warn(clippy::missing_docs_in_private_items)]

use raiden_primitives::types::{
	BlockNumber,
	Nonce,
};
use thiserror::Error;

/// The state transition error type.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum DisputeError {
	#[error("Validation error: `{0}`")]
	Validation(String),
	#[error("Signature does not match the expected signer")]
	SignatureMismatch,
	#[error("Stale nonce {received}, last recorded nonce is {recorded}")]
	StaleNonce { received: Nonce, recorded: Nonce },
	#[error("No balance proof update was recorded for the beneficiary")]
	NoPriorUpdate,
	#[error("Window expired at block {window_end}, current block is {block_number}")]
	WindowExpired { block_number: BlockNumber, window_end: BlockNumber },
	#[error("Settle timeout has not elapsed, settle is possible from block {settle_block}")]
	SettleTimeoutPending { block_number: BlockNumber, settle_block: BlockNumber },
	#[error("Channel is already settled")]
	ChannelFinalized,
	#[error("Leaf is not part of the merkle tree")]
	ProofNotFound,
}

impl From<String> for DisputeError {
	fn from(msg: String) -> Self {
		DisputeError::Validation(msg)
	}
}
