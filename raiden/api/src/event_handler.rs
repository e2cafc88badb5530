use raiden_blockchain::{
	client::ChainClient,
	proxies::{
		Account,
		ProxyError,
		TokenNetworkProxy,
	},
	transactions::ChannelPunishObsoleteUnlockTransactionParams,
};
use raiden_primitives::{
	traits::ToChecksummed,
	types::{
		Address,
		BlockNumber,
		TransactionHash,
	},
};
use raiden_state_machine::types::{
	ChannelState,
	Event,
};
use tracing::info;

/// Turns the events of a channel transition into token network transactions.
pub struct EventHandler<C: ChainClient + 'static> {
	account: Account<C>,
	token_network: TokenNetworkProxy<C>,
}

impl<C: ChainClient + 'static> EventHandler<C> {
	pub fn new(account: Account<C>, token_network: TokenNetworkProxy<C>) -> Self {
		Self { account, token_network }
	}

	pub fn address(&self) -> Address {
		self.account.address()
	}

	pub async fn block_number(&self) -> Result<BlockNumber, ProxyError> {
		self.token_network.block_number().await
	}

	/// Send the transaction behind `event` and wait until it is mined.
	///
	/// `channel_state` is the state the event was emitted with.
	pub async fn handle_event(
		&self,
		event: Event,
		channel_state: &ChannelState,
	) -> Result<TransactionHash, ProxyError> {
		let channel_identifier = channel_state.canonical_identifier.channel_identifier;
		info!(
			message = "Handling event.",
			event = event.type_name(),
			channel_identifier = format!("{:#x}", channel_identifier),
		);

		match event {
			Event::ContractSendChannelClose(inner) => {
				let block = inner.triggered_by_block_number;
				self.token_network
					.close(
						self.account.clone(),
						inner.canonical_identifier,
						inner.partner,
						inner.balance_proof,
						block,
					)
					.await
			},
			Event::ContractSendChannelUpdateBalanceProof(inner) => {
				let block = inner.triggered_by_block_number;
				self.token_network
					.update_balance_proof(
						self.account.clone(),
						inner.partner,
						inner.balance_proof,
						block,
					)
					.await
			},
			Event::ContractSendChannelPunishObsoleteUnlock(inner) => {
				info!(
					message = "Punishing obsolete unlock.",
					cheater = inner.cheater.to_checksummed(),
					lock_hash = format!("{:#x}", inner.lock_hash),
				);
				let block = inner.triggered_by_block_number;
				let params = ChannelPunishObsoleteUnlockTransactionParams {
					canonical_identifier: inner.canonical_identifier,
					open_block_number: inner.open_block_number,
					beneficiary: inner.beneficiary,
					cheater: inner.cheater,
					lock_hash: inner.lock_hash,
					additional_hash: inner.additional_hash,
					cheater_signature: inner.cheater_signature,
				};
				self.token_network.punish_obsolete_unlock(self.account.clone(), params, block).await
			},
			Event::ContractSendChannelSettle(inner) => {
				let settle_block_number = channel_state
					.settle_timeout_end()
					.map(|end| end.saturating_add(1u64.into()))
					.ok_or_else(|| {
						ProxyError::BrokenPrecondition("Channel was never closed".to_owned())
					})?;
				let block = inner.triggered_by_block_number;
				self.token_network
					.settle(
						self.account.clone(),
						inner.canonical_identifier,
						inner.partner_address,
						inner.settlement,
						settle_block_number,
						block,
					)
					.await
			},
		}
	}
}
