use derive_more::Deref;
use raiden_macros::IntoEvent;
use serde::{
	Deserialize,
	Serialize,
};

use crate::types::{
	Address,
	BalanceProofState,
	BlockNumber,
	CanonicalIdentifier,
	LockHash,
	MessageHash,
	SettlementState,
	Signature,
};

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub enum Event {
	ContractSendChannelClose(ContractSendChannelClose),
	ContractSendChannelUpdateBalanceProof(ContractSendChannelUpdateBalanceProof),
	ContractSendChannelPunishObsoleteUnlock(ContractSendChannelPunishObsoleteUnlock),
	ContractSendChannelSettle(ContractSendChannelSettle),
}

impl Event {
	pub fn type_name(&self) -> &'static str {
		match self {
			Event::ContractSendChannelClose(_) => "ContractSendChannelClose",
			Event::ContractSendChannelUpdateBalanceProof(_) =>
				"ContractSendChannelUpdateBalanceProof",
			Event::ContractSendChannelPunishObsoleteUnlock(_) =>
				"ContractSendChannelPunishObsoleteUnlock",
			Event::ContractSendChannelSettle(_) => "ContractSendChannelSettle",
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct ContractSendEventInner {
	pub triggered_by_block_number: BlockNumber,
}

#[derive(Deref, Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoEvent)]
pub struct ContractSendChannelClose {
	#[deref]
	pub inner: ContractSendEventInner,
	pub canonical_identifier: CanonicalIdentifier,
	pub partner: Address,
	pub balance_proof: Option<BalanceProofState>,
}

#[derive(Deref, Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoEvent)]
pub struct ContractSendChannelUpdateBalanceProof {
	#[deref]
	pub inner: ContractSendEventInner,
	pub canonical_identifier: CanonicalIdentifier,
	pub partner: Address,
	pub balance_proof: BalanceProofState,
}

#[derive(Deref, Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoEvent)]
pub struct ContractSendChannelPunishObsoleteUnlock {
	#[deref]
	pub inner: ContractSendEventInner,
	pub canonical_identifier: CanonicalIdentifier,
	pub open_block_number: BlockNumber,
	pub beneficiary: Address,
	pub cheater: Address,
	pub lock_hash: LockHash,
	pub additional_hash: MessageHash,
	pub cheater_signature: Signature,
}

#[derive(Deref, Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoEvent)]
pub struct ContractSendChannelSettle {
	#[deref]
	pub inner: ContractSendEventInner,
	pub canonical_identifier: CanonicalIdentifier,
	pub our_address: Address,
	pub partner_address: Address,
	pub settlement: SettlementState,
}
