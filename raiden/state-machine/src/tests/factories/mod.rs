mod builder;
mod generator;
mod keyring;

pub use builder::*;
pub use generator::*;
pub use keyring::*;
use raiden_primitives::{
	constants::EMPTY_HASH,
	hashing::hash_secret,
	types::{
		BlockNumber,
		LockHash,
		Locksroot,
		Nonce,
		TokenAmount,
	},
};

use crate::{
	merkle::MerkleLockTree,
	types::{
		BalanceProofState,
		ChannelState,
		HashTimeLockState,
		PunishObsoleteUnlock,
		PunishRequestState,
	},
};

pub fn make_locks(count: usize, amount: u64) -> Vec<HashTimeLockState> {
	(0..count)
		.map(|index| {
			let secrethash = hash_secret(&Generator::random_secret().0);
			HashTimeLockState::create(
				amount.into(),
				BlockNumber::from(100u64 + index as u64),
				secrethash,
			)
		})
		.collect()
}

pub fn make_balance_proof(
	signer: Keyring,
	channel_state: &ChannelState,
	nonce: u64,
	transferred_amount: u64,
	locksroot: Locksroot,
) -> BalanceProofState {
	let mut balance_proof = BalanceProofState::new(
		channel_state.canonical_identifier.clone(),
		channel_state.open_block_number,
		Nonce::from(nonce),
		TokenAmount::from(transferred_amount),
		locksroot.as_bytes(),
		EMPTY_HASH,
	)
	.expect("Balance proof should be valid");
	balance_proof.sign(&signer.private_key()).expect("Balance proof should be signed");
	balance_proof
}

pub fn make_punish_request(
	cheater: Keyring,
	beneficiary: Keyring,
	channel_state: &ChannelState,
	locks: &[HashTimeLockState],
	lock: &HashTimeLockState,
) -> PunishObsoleteUnlock {
	let tree = MerkleLockTree::new(locks);
	let lock_hash: LockHash = lock.lockhash();
	let mut punish_request = PunishRequestState {
		canonical_identifier: channel_state.canonical_identifier.clone(),
		open_block_number: channel_state.open_block_number,
		beneficiary: beneficiary.address(),
		lock_hash,
		additional_hash: EMPTY_HASH,
		merkle_proof: tree.make_proof(&lock_hash).expect("Lock should be in the tree"),
		signature: None,
	};
	punish_request.sign(&cheater.private_key()).expect("Punish request should be signed");

	PunishObsoleteUnlock { sender: beneficiary.address(), punish_request, lock: lock.clone() }
}
