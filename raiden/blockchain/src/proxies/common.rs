use std::sync::Arc;

use raiden_primitives::{
	keys::PrivateKey,
	types::{
		Address,
		U256,
	},
};
use tokio::sync::{
	Mutex,
	OwnedMutexGuard,
};
use web3::signing::Key;

use super::ProxyError;
use crate::client::ChainClient;

pub type Result<T> = std::result::Result<T, ProxyError>;

/// The nonce of the next transaction sent by an account.
#[derive(Clone)]
pub struct Nonce {
	inner: Arc<Mutex<U256>>,
}

impl Nonce {
	pub fn new(next: U256) -> Self {
		Self { inner: Arc::new(Mutex::new(next)) }
	}

	/// Reserve the next nonce. Other senders wait until the reservation is dropped, and the
	/// nonce only advances once the reservation is committed.
	pub async fn reserve(&self) -> NonceReservation {
		NonceReservation { guard: self.inner.clone().lock_owned().await }
	}

	pub async fn peek_next(&self) -> U256 {
		*self.inner.lock().await
	}
}

/// A nonce held by one sender until its transaction reached the node.
pub struct NonceReservation {
	guard: OwnedMutexGuard<U256>,
}

impl NonceReservation {
	pub fn value(&self) -> U256 {
		*self.guard
	}

	/// Mark the nonce as used by a transaction the node accepted.
	pub fn commit(mut self) {
		*self.guard += U256::from(1);
	}
}

pub struct Account<C: ChainClient> {
	client: Arc<C>,
	private_key: PrivateKey,
	nonce: Nonce,
}

impl<C: ChainClient> Clone for Account<C> {
	fn clone(&self) -> Self {
		Self {
			client: self.client.clone(),
			private_key: self.private_key.clone(),
			nonce: self.nonce.clone(),
		}
	}
}

impl<C: ChainClient> Account<C> {
	pub fn new(client: Arc<C>, private_key: PrivateKey, next_nonce: U256) -> Self {
		Self { client, private_key, nonce: Nonce::new(next_nonce) }
	}

	/// Create an account whose nonce continues from the transactions the chain has seen.
	pub async fn load(client: Arc<C>, private_key: PrivateKey) -> Result<Self> {
		let next_nonce = client.nonce_at(private_key.address(), None).await?;
		Ok(Self::new(client, private_key, next_nonce))
	}

	pub fn private_key(&self) -> &PrivateKey {
		&self.private_key
	}

	pub fn address(&self) -> Address {
		self.private_key.address()
	}

	pub async fn reserve_nonce(&self) -> NonceReservation {
		self.nonce.reserve().await
	}

	pub async fn peek_next_nonce(&self) -> U256 {
		self.nonce.peek_next().await
	}

	pub async fn check_for_insufficient_eth(
		&self,
		required_gas: U256,
		gas_price: U256,
	) -> Result<()> {
		let actual_balance = self.client.balance_at(self.address(), None).await?;
		let required_balance = required_gas.saturating_mul(gas_price);
		if actual_balance < required_balance {
			return Err(ProxyError::InsufficientEth(format!(
				"Balance is not enough to execute transaction. Current: {}, required: {}",
				actual_balance, required_balance,
			)))
		}
		Ok(())
	}
}
