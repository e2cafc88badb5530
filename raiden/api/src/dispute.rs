use std::{
	collections::HashMap,
	sync::Arc,
};

use parking_lot::RwLock;
use raiden_blockchain::{
	client::ChainClient,
	config::ChainClientConfig,
	proxies::{
		Account,
		TokenNetworkProxy,
	},
};
use raiden_primitives::types::{
	Address,
	BlockNumber,
	CanonicalIdentifier,
	ChannelIdentifier,
	TokenAmount,
	TransactionHash,
};
use raiden_state_machine::{
	machine::channel::state_transition,
	types::{
		BalanceProofState,
		ChannelEndState,
		ChannelState,
		ChannelStatus,
		CloseChannel,
		HashTimeLockState,
		PunishObsoleteUnlock,
		PunishRequestState,
		SettleChannel,
		StateChange,
		UpdateBalanceProof,
	},
};
use tokio::sync::Mutex;
use tracing::{
	error,
	info,
};

use crate::{
	config::DisputeConfig,
	errors::ApiError,
	event_handler::EventHandler,
};

/// The dispute of a single channel.
///
/// The channel state lock is held for a whole transition, including the wait for its
/// transactions, so transitions of one channel never interleave.
pub struct ChannelDispute<C: ChainClient + 'static> {
	channel_state: Mutex<ChannelState>,
	event_handler: EventHandler<C>,
	config: DisputeConfig,
}

impl<C: ChainClient + 'static> ChannelDispute<C> {
	pub fn new(
		channel_state: ChannelState,
		event_handler: EventHandler<C>,
		config: DisputeConfig,
	) -> Self {
		Self { channel_state: Mutex::new(channel_state), event_handler, config }
	}

	/// A snapshot of the channel state.
	pub async fn state(&self) -> ChannelState {
		self.channel_state.lock().await.clone()
	}

	pub async fn status(&self) -> ChannelStatus {
		self.channel_state.lock().await.status()
	}

	/// Close the channel with the latest balance proof received from the partner.
	pub async fn close(
		&self,
		balance_proof: Option<BalanceProofState>,
	) -> Result<Vec<TransactionHash>, ApiError> {
		let state_change =
			CloseChannel { sender: self.event_handler.address(), balance_proof }.into();
		self.transition_and_submit(state_change).await
	}

	/// Replace the partner's balance proof the closer submitted with a newer one.
	pub async fn update_balance_proof(
		&self,
		balance_proof: BalanceProofState,
	) -> Result<Vec<TransactionHash>, ApiError> {
		let state_change =
			UpdateBalanceProof { sender: self.event_handler.address(), balance_proof }.into();
		self.transition_and_submit(state_change).await
	}

	pub async fn punish_obsolete_unlock(
		&self,
		punish_request: PunishRequestState,
		lock: HashTimeLockState,
	) -> Result<Vec<TransactionHash>, ApiError> {
		let state_change =
			PunishObsoleteUnlock { sender: self.event_handler.address(), punish_request, lock }
				.into();
		self.transition_and_submit(state_change).await
	}

	pub async fn settle(&self) -> Result<Vec<TransactionHash>, ApiError> {
		let state_change = SettleChannel { sender: self.event_handler.address() }.into();
		self.transition_and_submit(state_change).await
	}

	/// Apply a transition the counterparty already performed on chain.
	///
	/// Nothing is submitted, the emitted events describe the counterparty's transaction.
	pub async fn handle_chain_event(
		&self,
		state_change: StateChange,
		block_number: BlockNumber,
	) -> Result<ChannelStatus, ApiError> {
		let mut channel_state = self.channel_state.lock().await;
		let transition = state_transition(channel_state.clone(), state_change, block_number)
			.map_err(ApiError::Transition)?;
		*channel_state = transition.new_state;
		Ok(channel_state.status())
	}

	/// Run `state_change` through the state machine and submit the resulting transactions.
	///
	/// The new state is committed only once every transaction is confirmed. A failed
	/// transition, a failed transaction or an elapsed timeout leave the state untouched.
	async fn transition_and_submit(
		&self,
		state_change: StateChange,
	) -> Result<Vec<TransactionHash>, ApiError> {
		let mut channel_state = self.channel_state.lock().await;
		let channel_identifier = channel_state.canonical_identifier.channel_identifier;
		let state_change_type = state_change.type_name();

		let submission = async {
			let block_number = self.event_handler.block_number().await.map_err(ApiError::Proxy)?;
			let transition = state_transition(channel_state.clone(), state_change, block_number)
				.map_err(ApiError::Transition)?;

			let mut transaction_hashes = vec![];
			for event in transition.events {
				let transaction_hash = self
					.event_handler
					.handle_event(event, &transition.new_state)
					.await
					.map_err(ApiError::Proxy)?;
				transaction_hashes.push(transaction_hash);
			}
			Ok::<_, ApiError>((transition.new_state, transaction_hashes))
		};

		let result = match tokio::time::timeout(self.config.transaction_timeout, submission).await {
			Ok(result) => result,
			Err(_) => Err(ApiError::ChainUnavailable(format!(
				"{} was not confirmed within {:?}",
				state_change_type, self.config.transaction_timeout
			))),
		};

		match result {
			Ok((new_state, transaction_hashes)) => {
				*channel_state = new_state;
				info!(
					message = "Channel transition committed.",
					channel_identifier = format!("{:#x}", channel_identifier),
					state_change = state_change_type,
					status = channel_state.status().to_string(),
				);
				Ok(transaction_hashes)
			},
			Err(e) => {
				error!(
					message = "Channel transition failed.",
					channel_identifier = format!("{:#x}", channel_identifier),
					state_change = state_change_type,
					error = format!("{:?}", e),
				);
				Err(e)
			},
		}
	}
}

/// Runs the disputes of every channel of one account.
pub struct DisputeService<C: ChainClient + 'static> {
	client: Arc<C>,
	account: Account<C>,
	config: DisputeConfig,
	chain_config: ChainClientConfig,
	channels: RwLock<HashMap<ChannelIdentifier, Arc<ChannelDispute<C>>>>,
}

impl<C: ChainClient + 'static> DisputeService<C> {
	pub fn new(
		client: Arc<C>,
		account: Account<C>,
		config: DisputeConfig,
		chain_config: ChainClientConfig,
	) -> Self {
		Self { client, account, config, chain_config, channels: RwLock::new(HashMap::new()) }
	}

	/// Track the dispute of an existing channel. A channel registered twice keeps its
	/// first state.
	pub fn register_channel(&self, channel_state: ChannelState) -> Arc<ChannelDispute<C>> {
		let channel_identifier = channel_state.canonical_identifier.channel_identifier;
		let mut channels = self.channels.write();
		if let Some(channel) = channels.get(&channel_identifier) {
			return channel.clone()
		}

		let token_network = TokenNetworkProxy::new(
			self.client.clone(),
			channel_state.canonical_identifier.token_network_address,
			&self.chain_config,
		);
		let event_handler = EventHandler::new(self.account.clone(), token_network);
		let channel =
			Arc::new(ChannelDispute::new(channel_state, event_handler, self.config.clone()));
		channels.insert(channel_identifier, channel.clone());

		info!(
			message = "Channel registered.",
			channel_identifier = format!("{:#x}", channel_identifier),
		);
		channel
	}

	/// Track a channel opened between our account and `partner` using the configured
	/// settle timeout and punish window.
	pub fn register_opened_channel(
		&self,
		canonical_identifier: CanonicalIdentifier,
		open_block_number: BlockNumber,
		our_deposit: TokenAmount,
		partner: Address,
		partner_deposit: TokenAmount,
	) -> Result<Arc<ChannelDispute<C>>, ApiError> {
		let channel_state = ChannelState::new(
			canonical_identifier,
			open_block_number,
			ChannelEndState::new(self.account.address(), our_deposit),
			ChannelEndState::new(partner, partner_deposit),
			self.config.settle_timeout.into(),
			self.config.punish_window.into(),
		)
		.map_err(ApiError::Transition)?;
		Ok(self.register_channel(channel_state))
	}

	pub fn channel(
		&self,
		channel_identifier: ChannelIdentifier,
	) -> Result<Arc<ChannelDispute<C>>, ApiError> {
		self.channels
			.read()
			.get(&channel_identifier)
			.cloned()
			.ok_or(ApiError::ChannelNotFound(channel_identifier))
	}

	pub fn channel_identifiers(&self) -> Vec<ChannelIdentifier> {
		self.channels.read().keys().cloned().collect()
	}
}
