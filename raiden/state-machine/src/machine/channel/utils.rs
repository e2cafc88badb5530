#![warn(clippy::missing_docs_in_private_items)]

use crate::{
	types::{
		ChannelState,
		SettlementState,
	},
	views::channel_balance,
};

pub(crate) fn compute_settlement(channel_state: &ChannelState) -> SettlementState {
	let our_state = &channel_state.our_state;
	let partner_state = &channel_state.partner_state;

	let our_balance = channel_balance(channel_state, our_state, partner_state);
	let partner_balance = channel_state.capacity().saturating_sub(our_balance);

	SettlementState {
		our_transferred_amount: our_state.transferred_amount(),
		our_locksroot: our_state.locksroot(),
		our_balance,
		partner_transferred_amount: partner_state.transferred_amount(),
		partner_locksroot: partner_state.locksroot(),
		partner_balance,
	}
}
