use raiden_primitives::types::{
	Address,
	BlockNumber,
	CanonicalIdentifier,
	ChainID,
	ChannelIdentifier,
	TokenAmount,
};

use super::Keyring;
use crate::types::{
	ChannelEndState,
	ChannelState,
};

pub const OPEN_BLOCK: u64 = 10;
pub const SETTLE_TIMEOUT: u64 = 40;
pub const PUNISH_WINDOW: u64 = 5;

pub struct ChannelStateBuilder {
	canonical_identifier: CanonicalIdentifier,
	our_deposit: TokenAmount,
	partner_deposit: TokenAmount,
	settle_timeout: u64,
	punish_window: u64,
}

impl ChannelStateBuilder {
	pub fn new() -> Self {
		Self {
			canonical_identifier: CanonicalIdentifier {
				chain_identifier: ChainID::Private(337u64.into()),
				token_network_address: Address::repeat_byte(0x0e),
				channel_identifier: ChannelIdentifier::repeat_byte(0x01),
			},
			our_deposit: TokenAmount::zero(),
			partner_deposit: TokenAmount::zero(),
			settle_timeout: SETTLE_TIMEOUT,
			punish_window: PUNISH_WINDOW,
		}
	}

	pub fn with_deposits(mut self, our_deposit: u64, partner_deposit: u64) -> Self {
		self.our_deposit = our_deposit.into();
		self.partner_deposit = partner_deposit.into();
		self
	}

	pub fn with_punish_window(mut self, punish_window: u64) -> Self {
		self.punish_window = punish_window;
		self
	}

	pub fn build(self) -> ChannelState {
		ChannelState::new(
			self.canonical_identifier,
			BlockNumber::from(OPEN_BLOCK),
			ChannelEndState::new(Keyring::Alice.address(), self.our_deposit),
			ChannelEndState::new(Keyring::Bob.address(), self.partner_deposit),
			self.settle_timeout.into(),
			self.punish_window.into(),
		)
		.expect("Channel state should be valid")
	}
}
