#![warn(clippy::missing_docs_in_private_items)]

use raiden_macros::IntoStateChange;
use serde::{
	Deserialize,
	Serialize,
};

use crate::types::{
	Address,
	BalanceProofState,
	HashTimeLockState,
	PunishRequestState,
};

/// An enum containing all possible state change variants.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(tag = "type")]
pub enum StateChange {
	CloseChannel(CloseChannel),
	UpdateBalanceProof(UpdateBalanceProof),
	PunishObsoleteUnlock(PunishObsoleteUnlock),
	SettleChannel(SettleChannel),
}

impl StateChange {
	pub fn type_name(&self) -> &'static str {
		match self {
			StateChange::CloseChannel(_) => "CloseChannel",
			StateChange::UpdateBalanceProof(_) => "UpdateBalanceProof",
			StateChange::PunishObsoleteUnlock(_) => "PunishObsoleteUnlock",
			StateChange::SettleChannel(_) => "SettleChannel",
		}
	}

	/// The participant submitting the transaction behind this state change.
	pub fn sender(&self) -> Address {
		match self {
			StateChange::CloseChannel(inner) => inner.sender,
			StateChange::UpdateBalanceProof(inner) => inner.sender,
			StateChange::PunishObsoleteUnlock(inner) => inner.sender,
			StateChange::SettleChannel(inner) => inner.sender,
		}
	}
}

/// `sender` closes the channel with the latest balance proof of its partner, if any.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct CloseChannel {
	pub sender: Address,
	pub balance_proof: Option<BalanceProofState>,
}

/// `sender` submits a newer balance proof of its partner while the settle timeout runs.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct UpdateBalanceProof {
	pub sender: Address,
	pub balance_proof: BalanceProofState,
}

/// `sender` proves that a lock in the beneficiary's commitment was declared obsolete by
/// the cheater.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct PunishObsoleteUnlock {
	pub sender: Address,
	pub punish_request: PunishRequestState,
	pub lock: HashTimeLockState,
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct SettleChannel {
	pub sender: Address,
}
