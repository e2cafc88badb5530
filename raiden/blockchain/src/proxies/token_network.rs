use std::{
	sync::Arc,
	time::Duration,
};

use derive_more::Display;
use ethabi::{
	ParamType,
	Token,
};
use raiden_primitives::types::{
	Address,
	BlockNumber,
	Bytes,
	CanonicalIdentifier,
	ChainID,
	GasLimit,
	GasPrice,
	TokenNetworkAddress,
	TransactionHash,
	U256,
};
use raiden_state_machine::types::{
	BalanceProofState,
	SettlementState,
};
use tracing::{
	error,
	info,
};
use web3::types::{
	CallRequest,
	TransactionParameters,
	TransactionReceipt,
	U64 as Web3U64,
};

use super::{
	common::{
		Account,
		Result,
	},
	ProxyError,
};
use crate::{
	client::ChainClient,
	config::ChainClientConfig,
	errors::ChainError,
	transactions::{
		ChannelCloseTransaction,
		ChannelCloseTransactionParams,
		ChannelPunishObsoleteUnlockTransaction,
		ChannelPunishObsoleteUnlockTransactionParams,
		ChannelSettleTransaction,
		ChannelSettleTransactionParams,
		ChannelUpdateBalanceProofTransaction,
		ChannelUpdateBalanceProofTransactionParams,
		Transaction,
	},
};

/// Functions of the token network contract used to resolve disputes.
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
pub enum TokenNetworkFunction {
	#[display(fmt = "closeChannel")]
	CloseChannel,
	#[display(fmt = "updateBalanceProof")]
	UpdateBalanceProof,
	#[display(fmt = "punishObsoleteUnlock")]
	PunishObsoleteUnlock,
	#[display(fmt = "settleChannel")]
	SettleChannel,
}

impl TokenNetworkFunction {
	pub fn param_types(&self) -> Vec<ParamType> {
		match self {
			Self::CloseChannel | Self::UpdateBalanceProof => vec![
				ParamType::Address,
				ParamType::Uint(256),
				ParamType::FixedBytes(32),
				ParamType::Uint(64),
				ParamType::FixedBytes(32),
				ParamType::Bytes,
			],
			Self::PunishObsoleteUnlock => vec![
				ParamType::Address,
				ParamType::Address,
				ParamType::FixedBytes(32),
				ParamType::FixedBytes(32),
				ParamType::Bytes,
			],
			Self::SettleChannel => vec![
				ParamType::Address,
				ParamType::Uint(256),
				ParamType::FixedBytes(32),
				ParamType::Address,
				ParamType::Uint(256),
				ParamType::FixedBytes(32),
			],
		}
	}

	/// Gas kept in reserve to tell an out of funds account apart from a rejected call.
	pub fn gas_reserve(&self) -> GasLimit {
		let gas: u64 = match self {
			Self::CloseChannel => 110_000,
			Self::UpdateBalanceProof => 95_000,
			Self::PunishObsoleteUnlock => 80_000,
			Self::SettleChannel => 130_000,
		};
		gas.into()
	}

	/// ABI encoded call data: the 4 byte selector followed by the encoded arguments.
	pub fn encode(&self, tokens: &[Token]) -> Bytes {
		let mut data = ethabi::short_signature(&self.to_string(), &self.param_types()).to_vec();
		data.extend(ethabi::encode(tokens));
		Bytes(data)
	}
}

/// Sends dispute transactions to one token network contract.
pub struct TokenNetworkProxy<C: ChainClient> {
	client: Arc<C>,
	address: TokenNetworkAddress,
	receipt_poll_interval: Duration,
}

impl<C: ChainClient> Clone for TokenNetworkProxy<C> {
	fn clone(&self) -> Self {
		Self {
			client: self.client.clone(),
			address: self.address,
			receipt_poll_interval: self.receipt_poll_interval,
		}
	}
}

impl<C: ChainClient + 'static> TokenNetworkProxy<C> {
	pub fn new(client: Arc<C>, address: TokenNetworkAddress, config: &ChainClientConfig) -> Self {
		Self { client, address, receipt_poll_interval: config.receipt_poll_interval }
	}

	pub fn address(&self) -> TokenNetworkAddress {
		self.address
	}

	pub fn client(&self) -> &Arc<C> {
		&self.client
	}

	pub async fn chain_id(&self) -> Result<ChainID> {
		Ok(self.client.chain_id().await?)
	}

	pub async fn block_number(&self) -> Result<BlockNumber> {
		Ok(self.client.block_number().await?)
	}

	pub async fn close(
		&self,
		account: Account<C>,
		canonical_identifier: CanonicalIdentifier,
		partner: Address,
		balance_proof: Option<BalanceProofState>,
		block: BlockNumber,
	) -> Result<TransactionHash> {
		let close_channel_transaction =
			ChannelCloseTransaction { account, token_network: self.clone() };

		let params = ChannelCloseTransactionParams { canonical_identifier, partner, balance_proof };
		close_channel_transaction.execute(params, block).await
	}

	pub async fn update_balance_proof(
		&self,
		account: Account<C>,
		partner: Address,
		balance_proof: BalanceProofState,
		block: BlockNumber,
	) -> Result<TransactionHash> {
		let update_transaction =
			ChannelUpdateBalanceProofTransaction { account, token_network: self.clone() };

		update_transaction
			.execute(ChannelUpdateBalanceProofTransactionParams { partner, balance_proof }, block)
			.await
	}

	pub async fn punish_obsolete_unlock(
		&self,
		account: Account<C>,
		params: ChannelPunishObsoleteUnlockTransactionParams,
		block: BlockNumber,
	) -> Result<TransactionHash> {
		let punish_transaction =
			ChannelPunishObsoleteUnlockTransaction { account, token_network: self.clone() };

		punish_transaction.execute(params, block).await
	}

	pub async fn settle(
		&self,
		account: Account<C>,
		canonical_identifier: CanonicalIdentifier,
		partner: Address,
		settlement: SettlementState,
		settle_block_number: BlockNumber,
		block: BlockNumber,
	) -> Result<TransactionHash> {
		let settle_transaction = ChannelSettleTransaction { account, token_network: self.clone() };

		let params = ChannelSettleTransactionParams {
			canonical_identifier,
			partner,
			settlement,
			settle_block_number,
		};
		settle_transaction.execute(params, block).await
	}

	pub(crate) async fn estimate_gas(
		&self,
		from: Address,
		data: Bytes,
	) -> Result<(GasLimit, GasPrice)> {
		let gas_price = self.client.gas_price().await?;
		let call = CallRequest {
			from: Some(from),
			to: Some(self.address),
			gas_price: Some(gas_price),
			data: Some(data),
			..Default::default()
		};
		let gas_estimate = self.client.estimate_gas(call, None).await?;
		Ok((gas_estimate, gas_price))
	}

	/// Sign and send a call to the contract, then wait for it to be mined.
	///
	/// A mined transaction with a failed status is never resent.
	pub(crate) async fn transact(
		&self,
		account: &Account<C>,
		function: TokenNetworkFunction,
		data: Bytes,
		gas_limit: GasLimit,
		gas_price: GasPrice,
	) -> Result<TransactionHash> {
		account.check_for_insufficient_eth(gas_limit, gas_price).await?;

		let chain_id = self.client.chain_id().await?;
		let reservation = account.reserve_nonce().await;
		let nonce = reservation.value();

		let transaction = TransactionParameters {
			nonce: Some(nonce),
			to: Some(self.address),
			gas: gas_limit,
			gas_price: Some(gas_price),
			value: U256::zero(),
			data: data.clone(),
			chain_id: Some(chain_id.into()),
			..Default::default()
		};
		let signed = self.client.sign_transaction(transaction, account.private_key()).await?;
		let transaction_hash = self.client.send_raw_transaction(signed.raw_transaction).await?;
		reservation.commit();

		info!(
			message = "Transaction sent.",
			function = function.to_string(),
			transaction_hash = format!("{:#x}", transaction_hash),
			nonce = nonce.to_string(),
		);

		let receipt = self.wait_for_receipt(transaction_hash).await?;
		if receipt.status != Some(Web3U64::from(1)) {
			let failed_at = receipt.block_number.map(BlockNumber::from);
			let reason = self.revert_reason(account.address(), data, failed_at).await;
			error!(
				message = "Transaction failed.",
				function = function.to_string(),
				transaction_hash = format!("{:#x}", transaction_hash),
				reason = reason.as_str(),
			);
			return Err(ProxyError::TransactionFailed { hash: transaction_hash, reason })
		}

		info!(
			message = "Transaction mined.",
			function = function.to_string(),
			transaction_hash = format!("{:#x}", transaction_hash),
		);
		Ok(transaction_hash)
	}

	/// Replay a call at `block` and report why the contract rejects it.
	pub(crate) async fn revert_reason(
		&self,
		from: Address,
		data: Bytes,
		block: Option<BlockNumber>,
	) -> String {
		let call = CallRequest {
			from: Some(from),
			to: Some(self.address),
			data: Some(data),
			..Default::default()
		};
		match self.client.call_contract(call, block).await {
			Ok(_) => "Call succeeds when replayed, no revert reason available".to_owned(),
			Err(ChainError::Rpc(reason)) => reason,
			Err(e) => e.to_string(),
		}
	}

	async fn wait_for_receipt(&self, transaction_hash: TransactionHash) -> Result<TransactionReceipt> {
		loop {
			if let Some(receipt) = self.client.transaction_receipt(transaction_hash).await? {
				if receipt.block_number.is_some() {
					return Ok(receipt)
				}
			}
			tokio::time::sleep(self.receipt_poll_interval).await;
		}
	}
}
