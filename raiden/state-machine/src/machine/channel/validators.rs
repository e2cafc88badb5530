use crate::{
	constants::CHANNEL_STATES_UNDER_DISPUTE,
	errors::DisputeError,
	merkle::verify_proof,
	types::{
		Address,
		BalanceProofState,
		BlockNumber,
		ChannelState,
		Locksroot,
		PunishObsoleteUnlock,
	},
	views,
};

pub(crate) fn is_channel_under_dispute(channel_state: &ChannelState) -> Result<(), DisputeError> {
	let status = channel_state.status();
	if !CHANNEL_STATES_UNDER_DISPUTE.contains(&status) {
		return Err(DisputeError::Validation(format!(
			"Channel is {}, expected it to be closed",
			status
		)))
	}
	Ok(())
}

pub(crate) fn is_valid_balance_proof(
	channel_state: &ChannelState,
	balance_proof: &BalanceProofState,
	signer: Address,
) -> Result<(), DisputeError> {
	if balance_proof.canonical_identifier != channel_state.canonical_identifier {
		return Err(DisputeError::Validation(
			"Balance proof does not belong to this channel".to_owned(),
		))
	}
	if balance_proof.open_block_number != channel_state.open_block_number {
		return Err(DisputeError::Validation(format!(
			"Balance proof open block {} does not match channel open block {}",
			balance_proof.open_block_number, channel_state.open_block_number
		)))
	}
	balance_proof.verify(signer)
}

/// Checks an update of `signer`'s balance proof against the proof already recorded for
/// `signer`. Nonces of the other participant are never looked at.
pub(crate) fn is_valid_update(
	channel_state: &ChannelState,
	balance_proof: &BalanceProofState,
	signer: Address,
	block_number: BlockNumber,
) -> Result<(), DisputeError> {
	let window_end = channel_state.settle_timeout_end().ok_or_else(|| {
		DisputeError::Validation("Channel is closed but the close block is missing".to_owned())
	})?;
	if block_number > window_end {
		return Err(DisputeError::WindowExpired { block_number, window_end })
	}

	is_valid_balance_proof(channel_state, balance_proof, signer)?;

	let (signer_state, _) = views::get_end_states(channel_state, signer)?;
	if let Some(recorded) = &signer_state.balance_proof {
		if balance_proof.nonce <= recorded.nonce {
			return Err(DisputeError::StaleNonce {
				received: balance_proof.nonce,
				recorded: recorded.nonce,
			})
		}
		if balance_proof.transferred_amount < recorded.transferred_amount {
			return Err(DisputeError::Validation(
				"Transferred amount must not decrease".to_owned(),
			))
		}
	}

	Ok(())
}

/// Checks a punish request and returns the cheater's address together with the commitment
/// the lock is proven against.
pub(crate) fn is_valid_punish_request(
	channel_state: &ChannelState,
	state_change: &PunishObsoleteUnlock,
	block_number: BlockNumber,
) -> Result<(Address, Locksroot), DisputeError> {
	let request = &state_change.punish_request;
	views::get_end_states(channel_state, state_change.sender)?;

	if request.canonical_identifier != channel_state.canonical_identifier ||
		request.open_block_number != channel_state.open_block_number
	{
		return Err(DisputeError::Validation(
			"Punish request does not belong to this channel".to_owned(),
		))
	}

	let (beneficiary_state, cheater_state) =
		views::get_end_states(channel_state, request.beneficiary)?;

	let (update_block_number, locksroot) =
		match (beneficiary_state.update_block_number, &beneficiary_state.balance_proof) {
			(Some(update_block_number), Some(balance_proof)) =>
				(update_block_number, balance_proof.locksroot),
			_ => return Err(DisputeError::NoPriorUpdate),
		};

	let window_end = update_block_number.saturating_add(channel_state.punish_window);
	if block_number > window_end {
		return Err(DisputeError::WindowExpired { block_number, window_end })
	}

	if request.recover_signer()? != cheater_state.address {
		return Err(DisputeError::SignatureMismatch)
	}

	if state_change.lock.lockhash() != request.lock_hash {
		return Err(DisputeError::Validation(
			"Lock does not hash to the punished lock hash".to_owned(),
		))
	}

	if !verify_proof(&request.lock_hash, &request.merkle_proof, &locksroot) {
		return Err(DisputeError::Validation(
			"Merkle proof does not match the recorded locksroot".to_owned(),
		))
	}

	if channel_state.is_lock_punished(cheater_state.address, &request.lock_hash) {
		return Err(DisputeError::Validation("Lock has already been punished".to_owned()))
	}

	Ok((cheater_state.address, locksroot))
}
