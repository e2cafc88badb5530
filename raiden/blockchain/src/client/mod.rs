use std::time::Duration;

use futures::stream::BoxStream;
use raiden_primitives::{
	keys::PrivateKey,
	types::{
		Address,
		BlockHash,
		BlockNumber,
		Bytes,
		ChainID,
		TransactionHash,
		H256,
		U256,
	},
};
use web3::types::{
	Block,
	CallRequest,
	Filter,
	Log,
	SignedTransaction,
	SyncState,
	Transaction,
	TransactionParameters,
	TransactionReceipt,
};

use crate::errors::ChainError;

mod connector;
mod registry;
mod rpc;
mod safe;

pub use connector::*;
pub use registry::*;
pub use rpc::*;
pub use safe::*;

pub type Result<T> = std::result::Result<T, ChainError>;

/// A stream of items polled from the node.
pub type ChainStream<T> = BoxStream<'static, Result<T>>;

/// The chain capabilities the dispute core relies on.
///
/// Block arguments of `None` refer to the latest block.
#[async_trait::async_trait]
pub trait ChainClient: Send + Sync {
	async fn block_number(&self) -> Result<BlockNumber>;

	async fn block_by_hash(&self, hash: BlockHash) -> Result<Option<Block<Transaction>>>;

	async fn block_by_number(&self, number: BlockNumber) -> Result<Option<Block<Transaction>>>;

	/// A block without its transaction bodies.
	async fn header_by_hash(&self, hash: BlockHash) -> Result<Option<Block<H256>>>;

	async fn header_by_number(&self, number: BlockNumber) -> Result<Option<Block<H256>>>;

	async fn transaction_by_hash(&self, hash: TransactionHash) -> Result<Option<Transaction>>;

	async fn transaction_receipt(&self, hash: TransactionHash)
		-> Result<Option<TransactionReceipt>>;

	async fn sync_progress(&self) -> Result<SyncState>;

	async fn chain_id(&self) -> Result<ChainID>;

	async fn balance_at(&self, address: Address, block: Option<BlockNumber>) -> Result<U256>;

	async fn storage_at(
		&self,
		address: Address,
		position: U256,
		block: Option<BlockNumber>,
	) -> Result<H256>;

	async fn code_at(&self, address: Address, block: Option<BlockNumber>) -> Result<Bytes>;

	async fn nonce_at(&self, address: Address, block: Option<BlockNumber>) -> Result<U256>;

	async fn filter_logs(&self, filter: Filter) -> Result<Vec<Log>>;

	async fn call_contract(&self, call: CallRequest, block: Option<BlockNumber>) -> Result<Bytes>;

	async fn estimate_gas(&self, call: CallRequest, block: Option<BlockNumber>) -> Result<U256>;

	async fn gas_price(&self) -> Result<U256>;

	async fn sign_transaction(
		&self,
		transaction: TransactionParameters,
		private_key: &PrivateKey,
	) -> Result<SignedTransaction>;

	async fn send_raw_transaction(&self, raw_transaction: Bytes) -> Result<TransactionHash>;

	/// Hashes of new blocks, polled every `poll_interval`.
	async fn subscribe_new_heads(&self, poll_interval: Duration) -> Result<ChainStream<BlockHash>>;

	/// Logs matching `filter`, polled every `poll_interval`.
	async fn subscribe_filter_logs(
		&self,
		filter: Filter,
		poll_interval: Duration,
	) -> Result<ChainStream<Log>>;
}
