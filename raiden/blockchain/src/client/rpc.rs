use std::time::Duration;

use futures::StreamExt;
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
use web3::{
	types::{
		Block,
		BlockId,
		BlockNumber as Web3BlockNumber,
		CallRequest,
		Filter,
		Log,
		SignedTransaction,
		SyncState,
		Transaction,
		TransactionId,
		TransactionParameters,
		TransactionReceipt,
	},
	Transport,
	Web3,
};

use super::{
	ChainClient,
	ChainStream,
	Result,
};
use crate::errors::ChainError;

fn block_number(block: Option<BlockNumber>) -> Option<Web3BlockNumber> {
	block.map(|number| Web3BlockNumber::Number(number.into()))
}

/// Forwards every call to a `web3` instance over transport `T`.
#[derive(Clone)]
pub struct Web3Client<T: Transport> {
	web3: Web3<T>,
}

impl<T: Transport> Web3Client<T> {
	pub fn new(transport: T) -> Self {
		Self { web3: Web3::new(transport) }
	}

	pub fn web3(&self) -> &Web3<T> {
		&self.web3
	}
}

#[async_trait::async_trait]
impl<T> ChainClient for Web3Client<T>
where
	T: Transport + Send + Sync + 'static,
	T::Out: Send,
{
	async fn block_number(&self) -> Result<BlockNumber> {
		Ok(self.web3.eth().block_number().await?.into())
	}

	async fn block_by_hash(&self, hash: BlockHash) -> Result<Option<Block<Transaction>>> {
		Ok(self.web3.eth().block_with_txs(BlockId::Hash(hash)).await?)
	}

	async fn block_by_number(&self, number: BlockNumber) -> Result<Option<Block<Transaction>>> {
		let block_id = BlockId::Number(Web3BlockNumber::Number(number.into()));
		Ok(self.web3.eth().block_with_txs(block_id).await?)
	}

	async fn header_by_hash(&self, hash: BlockHash) -> Result<Option<Block<H256>>> {
		Ok(self.web3.eth().block(BlockId::Hash(hash)).await?)
	}

	async fn header_by_number(&self, number: BlockNumber) -> Result<Option<Block<H256>>> {
		let block_id = BlockId::Number(Web3BlockNumber::Number(number.into()));
		Ok(self.web3.eth().block(block_id).await?)
	}

	async fn transaction_by_hash(&self, hash: TransactionHash) -> Result<Option<Transaction>> {
		Ok(self.web3.eth().transaction(TransactionId::Hash(hash)).await?)
	}

	async fn transaction_receipt(
		&self,
		hash: TransactionHash,
	) -> Result<Option<TransactionReceipt>> {
		Ok(self.web3.eth().transaction_receipt(hash).await?)
	}

	async fn sync_progress(&self) -> Result<SyncState> {
		Ok(self.web3.eth().syncing().await?)
	}

	async fn chain_id(&self) -> Result<ChainID> {
		Ok(self.web3.eth().chain_id().await?.into())
	}

	async fn balance_at(&self, address: Address, block: Option<BlockNumber>) -> Result<U256> {
		Ok(self.web3.eth().balance(address, block_number(block)).await?)
	}

	async fn storage_at(
		&self,
		address: Address,
		position: U256,
		block: Option<BlockNumber>,
	) -> Result<H256> {
		Ok(self.web3.eth().storage(address, position, block_number(block)).await?)
	}

	async fn code_at(&self, address: Address, block: Option<BlockNumber>) -> Result<Bytes> {
		Ok(self.web3.eth().code(address, block_number(block)).await?)
	}

	async fn nonce_at(&self, address: Address, block: Option<BlockNumber>) -> Result<U256> {
		Ok(self.web3.eth().transaction_count(address, block_number(block)).await?)
	}

	async fn filter_logs(&self, filter: Filter) -> Result<Vec<Log>> {
		Ok(self.web3.eth().logs(filter).await?)
	}

	async fn call_contract(&self, call: CallRequest, block: Option<BlockNumber>) -> Result<Bytes> {
		Ok(self.web3.eth().call(call, block_number(block).map(BlockId::Number)).await?)
	}

	async fn estimate_gas(&self, call: CallRequest, block: Option<BlockNumber>) -> Result<U256> {
		Ok(self.web3.eth().estimate_gas(call, block_number(block)).await?)
	}

	async fn gas_price(&self) -> Result<U256> {
		Ok(self.web3.eth().gas_price().await?)
	}

	async fn sign_transaction(
		&self,
		transaction: TransactionParameters,
		private_key: &PrivateKey,
	) -> Result<SignedTransaction> {
		Ok(self.web3.accounts().sign_transaction(transaction, private_key.clone()).await?)
	}

	async fn send_raw_transaction(&self, raw_transaction: Bytes) -> Result<TransactionHash> {
		Ok(self.web3.eth().send_raw_transaction(raw_transaction).await?)
	}

	async fn subscribe_new_heads(&self, poll_interval: Duration) -> Result<ChainStream<BlockHash>> {
		let filter = self.web3.eth_filter().create_blocks_filter().await?;
		Ok(filter.stream(poll_interval).map(|item| item.map_err(ChainError::from)).boxed())
	}

	async fn subscribe_filter_logs(
		&self,
		filter: Filter,
		poll_interval: Duration,
	) -> Result<ChainStream<Log>> {
		let filter = self.web3.eth_filter().create_logs_filter(filter).await?;
		Ok(filter.stream(poll_interval).map(|item| item.map_err(ChainError::from)).boxed())
	}
}
