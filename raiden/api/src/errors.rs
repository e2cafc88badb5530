use raiden_blockchain::proxies::ProxyError;
use raiden_primitives::types::ChannelIdentifier;
use raiden_state_machine::errors::DisputeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
	#[error("Transition Error: `{0}`")]
	Transition(DisputeError),
	#[error("Proxy error: `{0}`")]
	Proxy(ProxyError),
	#[error("Chain unavailable: `{0}`")]
	ChainUnavailable(String),
	#[error("Channel `{0:?}` not found")]
	ChannelNotFound(ChannelIdentifier),
}
