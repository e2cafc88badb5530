#![warn(clippy::missing_docs_in_private_items)]

use crate::{
	errors::DisputeError,
	types::{
		Address,
		ChannelEndState,
		ChannelState,
		TokenAmount,
	},
};

/// Returns the end state of `participant` followed by the end state of its counterparty.
pub fn get_end_states(
	channel_state: &ChannelState,
	participant: Address,
) -> Result<(&ChannelEndState, &ChannelEndState), DisputeError> {
	if participant == channel_state.our_state.address {
		Ok((&channel_state.our_state, &channel_state.partner_state))
	} else if participant == channel_state.partner_state.address {
		Ok((&channel_state.partner_state, &channel_state.our_state))
	} else {
		Err(DisputeError::Validation(format!(
			"{:?} is not a participant of channel {}",
			participant, channel_state.canonical_identifier.channel_identifier
		)))
	}
}

/// Returns the address of the other participant.
pub fn get_counterparty(
	channel_state: &ChannelState,
	participant: Address,
) -> Result<Address, DisputeError> {
	get_end_states(channel_state, participant).map(|(_, counterparty)| counterparty.address)
}

/// Returns the mutable end state of `participant`.
pub fn get_end_state_mut(
	channel_state: &mut ChannelState,
	participant: Address,
) -> Option<&mut ChannelEndState> {
	if participant == channel_state.our_state.address {
		Some(&mut channel_state.our_state)
	} else if participant == channel_state.partner_state.address {
		Some(&mut channel_state.partner_state)
	} else {
		None
	}
}

/// Sum of the locks `cheater` forfeited to `beneficiary`.
pub fn get_forfeited_amount(
	channel_state: &ChannelState,
	cheater: Address,
	beneficiary: Address,
) -> TokenAmount {
	channel_state
		.punishments
		.iter()
		.filter(|p| p.cheater == cheater && p.beneficiary == beneficiary)
		.fold(TokenAmount::zero(), |total, p| total.saturating_add(p.amount))
}

/// The amount `end_state` receives once the channel is settled.
///
/// `deposit + received + forfeited to it - sent - forfeited by it`, bounded by the channel
/// capacity.
pub fn channel_balance(
	channel_state: &ChannelState,
	end_state: &ChannelEndState,
	counterparty_state: &ChannelEndState,
) -> TokenAmount {
	let gained = end_state
		.deposit
		.saturating_add(counterparty_state.transferred_amount())
		.saturating_add(get_forfeited_amount(
			channel_state,
			counterparty_state.address,
			end_state.address,
		));
	let lost = end_state.transferred_amount().saturating_add(get_forfeited_amount(
		channel_state,
		end_state.address,
		counterparty_state.address,
	));

	gained.saturating_sub(lost).min(channel_state.capacity())
}
