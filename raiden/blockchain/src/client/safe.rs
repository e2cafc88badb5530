use std::{
	future::Future,
	sync::Arc,
	time::Duration,
};

use derive_more::Display;
use parking_lot::RwLock;
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
use tokio::sync::Mutex;
use tracing::{
	info,
	warn,
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

use super::{
	ChainClient,
	ChainStream,
	Connector,
	ReconnectRegistry,
	ReconnectSignal,
	Result,
};
use crate::{
	config::ChainClientConfig,
	errors::ChainError,
};

#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
pub enum ConnectionStatus {
	#[display(fmt = "connected")]
	Connected,
	#[display(fmt = "reconnecting")]
	Reconnecting,
	#[display(fmt = "failed")]
	Failed,
}

/// A chain client that survives losing the node.
///
/// Every call goes through one FIFO lock around the current connection. When a call finds
/// the node unavailable, the connection is redialed while the lock is held, so calls issued
/// meanwhile wait in order and are retried on the new connection. Registered reconnect
/// signals fire once the new connection is in place.
pub struct SafeChainClient<C: Connector> {
	connector: C,
	config: ChainClientConfig,
	connection: Mutex<Option<Arc<C::Client>>>,
	status: RwLock<ConnectionStatus>,
	registry: ReconnectRegistry,
}

impl<C: Connector> SafeChainClient<C> {
	/// Create a client which dials the node on first use.
	pub fn new(connector: C, config: ChainClientConfig) -> Self {
		Self {
			connector,
			config,
			connection: Mutex::new(None),
			status: RwLock::new(ConnectionStatus::Failed),
			registry: ReconnectRegistry::new(),
		}
	}

	/// Create a client connected to the node, failing if the node can't be reached.
	pub async fn connect(connector: C, config: ChainClientConfig) -> Result<Self> {
		let client = connector.connect().await?;
		Ok(Self {
			connector,
			config,
			connection: Mutex::new(Some(Arc::new(client))),
			status: RwLock::new(ConnectionStatus::Connected),
			registry: ReconnectRegistry::new(),
		})
	}

	pub fn connection_status(&self) -> ConnectionStatus {
		*self.status.read()
	}

	pub fn registry(&self) -> &ReconnectRegistry {
		&self.registry
	}

	/// Be notified of the next successful reconnect.
	pub fn register_reconnect_notify(&self, name: &str) -> ReconnectSignal {
		self.registry.register(name)
	}

	/// Drop the current connection and redial the node.
	pub async fn recover_disconnect(&self) -> Result<()> {
		let mut connection = self.connection.lock().await;
		*connection = None;
		self.set_status(ConnectionStatus::Failed);
		self.reconnect(&mut connection).await
	}

	fn set_status(&self, status: ConnectionStatus) {
		*self.status.write() = status;
	}

	async fn reconnect(&self, connection: &mut Option<Arc<C::Client>>) -> Result<()> {
		self.set_status(ConnectionStatus::Reconnecting);

		let mut attempt: u32 = 0;
		loop {
			attempt += 1;
			info!(
				message = "Connecting to chain node.",
				endpoint = self.config.eth_rpc_endpoint.as_str(),
				attempt = attempt,
			);

			match self.connector.connect().await {
				Ok(client) => {
					*connection = Some(Arc::new(client));
					self.set_status(ConnectionStatus::Connected);
					let notified = self.registry.notify_all();
					info!(
						message = "Connected to chain node.",
						attempt = attempt,
						notified = notified as u64,
					);
					return Ok(())
				},
				Err(e) => {
					warn!(
						message = "Could not connect to chain node.",
						attempt = attempt,
						error = format!("{:?}", e),
					);
					if let Some(max_attempts) = self.config.max_reconnect_attempts {
						if attempt >= max_attempts {
							self.set_status(ConnectionStatus::Failed);
							return Err(ChainError::Unavailable(format!(
								"Gave up connecting after {} attempts",
								attempt
							)))
						}
					}
					tokio::time::sleep(self.config.reconnect_interval).await;
				},
			}
		}
	}

	/// Run `call` against the current client, reconnecting and retrying for as long as the
	/// node is unavailable.
	async fn forward<R, F, Fut>(&self, name: &'static str, call: F) -> Result<R>
	where
		F: Fn(Arc<C::Client>) -> Fut + Send + Sync,
		Fut: Future<Output = Result<R>> + Send,
		R: Send,
	{
		let mut connection = self.connection.lock().await;
		loop {
			let client = match connection.as_ref() {
				Some(client) => client.clone(),
				None => {
					self.reconnect(&mut connection).await?;
					continue
				},
			};

			match call(client).await {
				Err(ChainError::Unavailable(reason)) => {
					warn!(
						message = "Chain node unavailable.",
						call = name,
						reason = reason.as_str(),
					);
					*connection = None;
					self.set_status(ConnectionStatus::Failed);
				},
				result => return result,
			}
		}
	}
}

#[async_trait::async_trait]
impl<C: Connector> ChainClient for SafeChainClient<C> {
	async fn block_number(&self) -> Result<BlockNumber> {
		self.forward("block_number", |client| async move { client.block_number().await })
			.await
	}

	async fn block_by_hash(&self, hash: BlockHash) -> Result<Option<Block<Transaction>>> {
		self.forward("block_by_hash", |client| async move { client.block_by_hash(hash).await })
			.await
	}

	async fn block_by_number(&self, number: BlockNumber) -> Result<Option<Block<Transaction>>> {
		self.forward("block_by_number", |client| async move {
			client.block_by_number(number).await
		})
		.await
	}

	async fn header_by_hash(&self, hash: BlockHash) -> Result<Option<Block<H256>>> {
		self.forward("header_by_hash", |client| async move { client.header_by_hash(hash).await })
			.await
	}

	async fn header_by_number(&self, number: BlockNumber) -> Result<Option<Block<H256>>> {
		self.forward("header_by_number", |client| async move {
			client.header_by_number(number).await
		})
		.await
	}

	async fn transaction_by_hash(&self, hash: TransactionHash) -> Result<Option<Transaction>> {
		self.forward("transaction_by_hash", |client| async move {
			client.transaction_by_hash(hash).await
		})
		.await
	}

	async fn transaction_receipt(
		&self,
		hash: TransactionHash,
	) -> Result<Option<TransactionReceipt>> {
		self.forward("transaction_receipt", |client| async move {
			client.transaction_receipt(hash).await
		})
		.await
	}

	async fn sync_progress(&self) -> Result<SyncState> {
		self.forward("sync_progress", |client| async move { client.sync_progress().await })
			.await
	}

	async fn chain_id(&self) -> Result<ChainID> {
		self.forward("chain_id", |client| async move { client.chain_id().await }).await
	}

	async fn balance_at(&self, address: Address, block: Option<BlockNumber>) -> Result<U256> {
		self.forward("balance_at", |client| async move { client.balance_at(address, block).await })
			.await
	}

	async fn storage_at(
		&self,
		address: Address,
		position: U256,
		block: Option<BlockNumber>,
	) -> Result<H256> {
		self.forward("storage_at", |client| async move {
			client.storage_at(address, position, block).await
		})
		.await
	}

	async fn code_at(&self, address: Address, block: Option<BlockNumber>) -> Result<Bytes> {
		self.forward("code_at", |client| async move { client.code_at(address, block).await })
			.await
	}

	async fn nonce_at(&self, address: Address, block: Option<BlockNumber>) -> Result<U256> {
		self.forward("nonce_at", |client| async move { client.nonce_at(address, block).await })
			.await
	}

	async fn filter_logs(&self, filter: Filter) -> Result<Vec<Log>> {
		self.forward("filter_logs", |client| {
			let filter = filter.clone();
			async move { client.filter_logs(filter).await }
		})
		.await
	}

	async fn call_contract(&self, call: CallRequest, block: Option<BlockNumber>) -> Result<Bytes> {
		self.forward("call_contract", |client| {
			let call = call.clone();
			async move { client.call_contract(call, block).await }
		})
		.await
	}

	async fn estimate_gas(&self, call: CallRequest, block: Option<BlockNumber>) -> Result<U256> {
		self.forward("estimate_gas", |client| {
			let call = call.clone();
			async move { client.estimate_gas(call, block).await }
		})
		.await
	}

	async fn gas_price(&self) -> Result<U256> {
		self.forward("gas_price", |client| async move { client.gas_price().await }).await
	}

	async fn sign_transaction(
		&self,
		transaction: TransactionParameters,
		private_key: &PrivateKey,
	) -> Result<SignedTransaction> {
		self.forward("sign_transaction", |client| {
			let transaction = transaction.clone();
			let private_key = private_key.clone();
			async move { client.sign_transaction(transaction, &private_key).await }
		})
		.await
	}

	async fn send_raw_transaction(&self, raw_transaction: Bytes) -> Result<TransactionHash> {
		self.forward("send_raw_transaction", |client| {
			let raw_transaction = raw_transaction.clone();
			async move { client.send_raw_transaction(raw_transaction).await }
		})
		.await
	}

	async fn subscribe_new_heads(&self, poll_interval: Duration) -> Result<ChainStream<BlockHash>> {
		self.forward("subscribe_new_heads", |client| async move {
			client.subscribe_new_heads(poll_interval).await
		})
		.await
	}

	async fn subscribe_filter_logs(
		&self,
		filter: Filter,
		poll_interval: Duration,
	) -> Result<ChainStream<Log>> {
		self.forward("subscribe_filter_logs", |client| {
			let filter = filter.clone();
			async move { client.subscribe_filter_logs(filter, poll_interval).await }
		})
		.await
	}
}
