use raiden_primitives::types::TransactionHash;
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ChainError {
	#[error("Chain unavailable: `{0}`")]
	Unavailable(String),
	#[error("RPC error: `{0}`")]
	Rpc(String),
	#[error("Signing error: `{0}`")]
	Signing(String),
}

impl ChainError {
	pub fn is_unavailable(&self) -> bool {
		matches!(self, ChainError::Unavailable(_))
	}
}

impl From<web3::Error> for ChainError {
	fn from(e: web3::Error) -> Self {
		match e {
			web3::Error::Unreachable | web3::Error::Transport(_) | web3::Error::Io(_) =>
				Self::Unavailable(e.to_string()),
			web3::Error::Recovery(_) => Self::Signing(e.to_string()),
			_ => Self::Rpc(e.to_string()),
		}
	}
}

#[derive(Error, Debug)]
pub enum ProxyError {
	#[error("Chain error: `{0}`")]
	Chain(#[from] ChainError),
	#[error("Insufficient ETH: `{0}`")]
	InsufficientEth(String),
	#[error("Broken precondition: `{0}`")]
	BrokenPrecondition(String),
	#[error("Transaction {hash:?} failed: `{reason}`")]
	TransactionFailed { hash: TransactionHash, reason: String },
	#[error("Unrecoverable error: `{0}`")]
	Unrecoverable(String),
}
