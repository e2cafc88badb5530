use self::{
	utils::compute_settlement,
	validators::{
		is_channel_under_dispute,
		is_valid_balance_proof,
		is_valid_punish_request,
		is_valid_update,
	},
};
use crate::{
	constants::CHANNEL_STATES_PRIOR_TO_CLOSE,
	errors::DisputeError,
	types::{
		BlockNumber,
		ChannelState,
		ChannelStatus,
		CloseChannel,
		ContractSendChannelClose,
		ContractSendChannelPunishObsoleteUnlock,
		ContractSendChannelSettle,
		ContractSendChannelUpdateBalanceProof,
		ContractSendEventInner,
		Event,
		PunishObsoleteUnlock,
		PunishmentState,
		SettleChannel,
		StateChange,
		TransactionExecutionStatus,
		UpdateBalanceProof,
	},
	views,
};

pub mod utils;
pub mod validators;

type TransitionResult = std::result::Result<ChannelTransition, DisputeError>;

#[derive(Clone, Debug)]
pub struct ChannelTransition {
	pub new_state: ChannelState,
	pub events: Vec<Event>,
}

fn handle_close(
	mut channel_state: ChannelState,
	state_change: CloseChannel,
	block_number: BlockNumber,
) -> TransitionResult {
	let status = channel_state.status();
	if !CHANNEL_STATES_PRIOR_TO_CLOSE.contains(&status) {
		return Err(DisputeError::Validation(format!("Channel is already {}", status)))
	}

	let partner = views::get_counterparty(&channel_state, state_change.sender)?;
	if let Some(balance_proof) = &state_change.balance_proof {
		is_valid_balance_proof(&channel_state, balance_proof, partner)?;
	}

	if let Some(partner_state) = views::get_end_state_mut(&mut channel_state, partner) {
		partner_state.balance_proof = state_change.balance_proof.clone();
	}
	channel_state.closing_participant = Some(state_change.sender);
	channel_state.close_transaction = Some(TransactionExecutionStatus::succeeded(block_number));

	let event = ContractSendChannelClose {
		inner: ContractSendEventInner { triggered_by_block_number: block_number },
		canonical_identifier: channel_state.canonical_identifier.clone(),
		partner,
		balance_proof: state_change.balance_proof,
	};

	Ok(ChannelTransition { new_state: channel_state, events: vec![event.into()] })
}

fn handle_update_balance_proof(
	mut channel_state: ChannelState,
	state_change: UpdateBalanceProof,
	block_number: BlockNumber,
) -> TransitionResult {
	is_channel_under_dispute(&channel_state)?;

	let partner = views::get_counterparty(&channel_state, state_change.sender)?;
	is_valid_update(&channel_state, &state_change.balance_proof, partner, block_number)?;

	if let Some(partner_state) = views::get_end_state_mut(&mut channel_state, partner) {
		partner_state.balance_proof = Some(state_change.balance_proof.clone());
		partner_state.update_block_number = Some(block_number);
	}
	channel_state.update_transaction = Some(TransactionExecutionStatus::succeeded(block_number));

	let event = ContractSendChannelUpdateBalanceProof {
		inner: ContractSendEventInner { triggered_by_block_number: block_number },
		canonical_identifier: channel_state.canonical_identifier.clone(),
		partner,
		balance_proof: state_change.balance_proof,
	};

	Ok(ChannelTransition { new_state: channel_state, events: vec![event.into()] })
}

fn handle_punish_obsolete_unlock(
	mut channel_state: ChannelState,
	state_change: PunishObsoleteUnlock,
	block_number: BlockNumber,
) -> TransitionResult {
	is_channel_under_dispute(&channel_state)?;

	let (cheater, locksroot) = is_valid_punish_request(&channel_state, &state_change, block_number)?;
	let request = state_change.punish_request;
	let cheater_signature = request.signature.clone().ok_or(DisputeError::SignatureMismatch)?;

	channel_state.punishments.push(PunishmentState {
		beneficiary: request.beneficiary,
		cheater,
		lock_hash: request.lock_hash,
		locksroot,
		amount: state_change.lock.amount,
		block_number,
	});

	let event = ContractSendChannelPunishObsoleteUnlock {
		inner: ContractSendEventInner { triggered_by_block_number: block_number },
		canonical_identifier: channel_state.canonical_identifier.clone(),
		open_block_number: request.open_block_number,
		beneficiary: request.beneficiary,
		cheater,
		lock_hash: request.lock_hash,
		additional_hash: request.additional_hash,
		cheater_signature,
	};

	Ok(ChannelTransition { new_state: channel_state, events: vec![event.into()] })
}

fn handle_settle(
	mut channel_state: ChannelState,
	state_change: SettleChannel,
	block_number: BlockNumber,
) -> TransitionResult {
	is_channel_under_dispute(&channel_state)?;
	views::get_end_states(&channel_state, state_change.sender)?;

	let settle_timeout_end = channel_state.settle_timeout_end().ok_or_else(|| {
		DisputeError::Validation("Channel is closed but the close block is missing".to_owned())
	})?;
	if block_number <= settle_timeout_end {
		return Err(DisputeError::SettleTimeoutPending {
			block_number,
			settle_block: settle_timeout_end.saturating_add(1u64.into()),
		})
	}

	let settlement = compute_settlement(&channel_state);
	channel_state.settlement = Some(settlement.clone());
	channel_state.settle_transaction = Some(TransactionExecutionStatus::succeeded(block_number));

	let event = ContractSendChannelSettle {
		inner: ContractSendEventInner { triggered_by_block_number: block_number },
		canonical_identifier: channel_state.canonical_identifier.clone(),
		our_address: channel_state.our_state.address,
		partner_address: channel_state.partner_state.address,
		settlement,
	};

	Ok(ChannelTransition { new_state: channel_state, events: vec![event.into()] })
}

/// Apply `state_change` to a copy of the channel.
///
/// The same transition is used for actions of our node and for actions of the partner
/// observed on chain, the state change's sender tells them apart. Nothing is applied when
/// an error is returned.
pub fn state_transition(
	channel_state: ChannelState,
	state_change: StateChange,
	block_number: BlockNumber,
) -> TransitionResult {
	if channel_state.status() == ChannelStatus::Settled {
		return Err(DisputeError::ChannelFinalized)
	}

	match state_change {
		StateChange::CloseChannel(inner) => handle_close(channel_state, inner, block_number),
		StateChange::UpdateBalanceProof(inner) =>
			handle_update_balance_proof(channel_state, inner, block_number),
		StateChange::PunishObsoleteUnlock(inner) =>
			handle_punish_obsolete_unlock(channel_state, inner, block_number),
		StateChange::SettleChannel(inner) => handle_settle(channel_state, inner, block_number),
	}
}
