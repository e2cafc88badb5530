use serde::{
	Deserialize,
	Serialize,
};
pub use web3::types::{
	Address,
	BlockId,
	Bytes,
	H160,
	H256,
	U256,
};

mod chain_id;
pub use chain_id::*;

mod numeric;
pub use numeric::*;

pub type BlockExpiration = U64;

pub type BlockHash = H256;

pub type BlockNumber = U64;

pub type BlockTimeout = U64;

pub type ChannelIdentifier = H256;

pub type EncodedLock = Bytes;

pub type GasLimit = U256;

pub type GasPrice = U256;

pub type LockHash = H256;

pub type Locksroot = H256;

pub type MessageHash = H256;

pub type Nonce = U64;

pub type Secret = Bytes;

pub type SecretHash = H256;

pub type SettleTimeout = U64;

pub type Signature = Bytes;

pub type TokenAmount = U256;

pub type TokenNetworkAddress = Address;

pub type TransactionHash = H256;

/// Uniquely identifies a channel across chains and token networks.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct CanonicalIdentifier {
	pub chain_identifier: ChainID,
	pub token_network_address: TokenNetworkAddress,
	pub channel_identifier: ChannelIdentifier,
}
