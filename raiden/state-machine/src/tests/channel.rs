use raiden_primitives::{
	constants::{
		EMPTY_HASH,
		LOCKSROOT_OF_NO_LOCKS,
	},
	types::{
		Address,
		BlockNumber,
		ChannelIdentifier,
		Nonce,
		TokenAmount,
	},
};

use crate::{
	errors::DisputeError,
	machine::channel::{
		state_transition,
		ChannelTransition,
	},
	merkle::MerkleLockTree,
	tests::factories::{
		make_balance_proof,
		make_locks,
		make_punish_request,
		ChannelStateBuilder,
		Keyring,
		PUNISH_WINDOW,
		SETTLE_TIMEOUT,
	},
	types::{
		ChannelState,
		ChannelStatus,
		CloseChannel,
		Event,
		HashTimeLockState,
		SettleChannel,
		StateChange,
		UpdateBalanceProof,
	},
};

const CLOSE_BLOCK: u64 = 20;
const UPDATE_BLOCK: u64 = 30;

fn transition(
	channel_state: &ChannelState,
	state_change: impl Into<StateChange>,
	block_number: u64,
) -> Result<ChannelTransition, DisputeError> {
	state_transition(channel_state.clone(), state_change.into(), BlockNumber::from(block_number))
}

/// Alice closes with Bob's balance proof of 10 tokens at nonce 3.
fn closed_channel() -> ChannelState {
	let channel_state = ChannelStateBuilder::new().with_deposits(25, 20).build();
	let balance_proof =
		make_balance_proof(Keyring::Bob, &channel_state, 3, 10, LOCKSROOT_OF_NO_LOCKS);
	let close = CloseChannel { sender: Keyring::Alice.address(), balance_proof: Some(balance_proof) };

	transition(&channel_state, close, CLOSE_BLOCK).expect("Close should succeed").new_state
}

/// Bob updates with Alice's balance proof committing to `locks`.
fn updated_channel(locks: &[HashTimeLockState]) -> ChannelState {
	let channel_state = closed_channel();
	let locksroot = MerkleLockTree::new(locks).root();
	let balance_proof = make_balance_proof(Keyring::Alice, &channel_state, 1, 0, locksroot);
	let update = UpdateBalanceProof { sender: Keyring::Bob.address(), balance_proof };

	transition(&channel_state, update, UPDATE_BLOCK).expect("Update should succeed").new_state
}

#[test]
fn test_close_records_partner_balance_proof() {
	let channel_state = ChannelStateBuilder::new().with_deposits(25, 20).build();
	assert_eq!(channel_state.status(), ChannelStatus::Opened);

	let balance_proof =
		make_balance_proof(Keyring::Bob, &channel_state, 3, 10, LOCKSROOT_OF_NO_LOCKS);
	let close = CloseChannel {
		sender: Keyring::Alice.address(),
		balance_proof: Some(balance_proof.clone()),
	};
	let result = transition(&channel_state, close, CLOSE_BLOCK).expect("Close should succeed");

	let new_state = result.new_state;
	assert_eq!(new_state.status(), ChannelStatus::Closed);
	assert_eq!(new_state.closing_participant, Some(Keyring::Alice.address()));
	assert_eq!(new_state.close_block_number(), Some(BlockNumber::from(CLOSE_BLOCK)));
	assert_eq!(new_state.partner_state.balance_proof, Some(balance_proof.clone()));
	assert_eq!(new_state.our_state.balance_proof, None);

	assert_eq!(result.events.len(), 1);
	match &result.events[0] {
		Event::ContractSendChannelClose(event) => {
			assert_eq!(event.partner, Keyring::Bob.address());
			assert_eq!(event.balance_proof, Some(balance_proof));
			assert_eq!(event.triggered_by_block_number, BlockNumber::from(CLOSE_BLOCK));
		},
		event => panic!("Unexpected event {:?}", event),
	}
}

#[test]
fn test_close_without_balance_proof() {
	let channel_state = ChannelStateBuilder::new().with_deposits(25, 20).build();
	let close = CloseChannel { sender: Keyring::Bob.address(), balance_proof: None };

	let result = transition(&channel_state, close, CLOSE_BLOCK).expect("Close should succeed");
	assert_eq!(result.new_state.status(), ChannelStatus::Closed);
	assert_eq!(result.new_state.our_state.balance_proof, None);
}

#[test]
fn test_close_rejects_invalid_balance_proofs() {
	let channel_state = ChannelStateBuilder::new().with_deposits(25, 20).build();

	// Signed by the closer instead of the partner.
	let own_proof = make_balance_proof(Keyring::Alice, &channel_state, 3, 10, LOCKSROOT_OF_NO_LOCKS);
	let close = CloseChannel { sender: Keyring::Alice.address(), balance_proof: Some(own_proof) };
	assert_eq!(
		transition(&channel_state, close, CLOSE_BLOCK).unwrap_err(),
		DisputeError::SignatureMismatch
	);

	let mut other_channel = channel_state.clone();
	other_channel.canonical_identifier.channel_identifier = ChannelIdentifier::repeat_byte(9);
	let foreign_proof =
		make_balance_proof(Keyring::Bob, &other_channel, 3, 10, LOCKSROOT_OF_NO_LOCKS);
	let close = CloseChannel { sender: Keyring::Alice.address(), balance_proof: Some(foreign_proof) };
	assert!(matches!(
		transition(&channel_state, close, CLOSE_BLOCK),
		Err(DisputeError::Validation(_))
	));

	let mut reopened_channel = channel_state.clone();
	reopened_channel.open_block_number = BlockNumber::from(99u64);
	let stale_proof =
		make_balance_proof(Keyring::Bob, &reopened_channel, 3, 10, LOCKSROOT_OF_NO_LOCKS);
	let close = CloseChannel { sender: Keyring::Alice.address(), balance_proof: Some(stale_proof) };
	assert!(matches!(
		transition(&channel_state, close, CLOSE_BLOCK),
		Err(DisputeError::Validation(_))
	));
}

#[test]
fn test_only_participants_can_act() {
	let channel_state = ChannelStateBuilder::new().with_deposits(25, 20).build();
	let close = CloseChannel { sender: Keyring::Charlie.address(), balance_proof: None };
	assert!(matches!(
		transition(&channel_state, close, CLOSE_BLOCK),
		Err(DisputeError::Validation(_))
	));

	let channel_state = closed_channel();
	let settle = SettleChannel { sender: Address::repeat_byte(0x42) };
	assert!(matches!(
		transition(&channel_state, settle, CLOSE_BLOCK + SETTLE_TIMEOUT + 1),
		Err(DisputeError::Validation(_))
	));
}

#[test]
fn test_close_twice_fails() {
	let channel_state = closed_channel();
	let close = CloseChannel { sender: Keyring::Bob.address(), balance_proof: None };
	assert!(matches!(
		transition(&channel_state, close, CLOSE_BLOCK + 1),
		Err(DisputeError::Validation(_))
	));
}

#[test]
fn test_update_requires_closed_channel() {
	let channel_state = ChannelStateBuilder::new().with_deposits(25, 20).build();
	let balance_proof =
		make_balance_proof(Keyring::Alice, &channel_state, 1, 0, LOCKSROOT_OF_NO_LOCKS);
	let update = UpdateBalanceProof { sender: Keyring::Bob.address(), balance_proof };
	assert!(matches!(
		transition(&channel_state, update, CLOSE_BLOCK),
		Err(DisputeError::Validation(_))
	));
}

#[test]
fn test_update_nonce_is_compared_per_signer() {
	let channel_state = closed_channel();

	// Bob's proof was recorded with nonce 3, Alice's stream starts at 1.
	let balance_proof =
		make_balance_proof(Keyring::Alice, &channel_state, 1, 0, LOCKSROOT_OF_NO_LOCKS);
	let update = UpdateBalanceProof { sender: Keyring::Bob.address(), balance_proof };
	let channel_state = transition(&channel_state, update.clone(), UPDATE_BLOCK)
		.expect("Update should succeed")
		.new_state;
	assert_eq!(channel_state.status(), ChannelStatus::Updated);
	assert_eq!(channel_state.our_state.update_block_number, Some(BlockNumber::from(UPDATE_BLOCK)));
	assert_eq!(
		channel_state.partner_state.balance_proof.as_ref().map(|bp| bp.nonce),
		Some(Nonce::from(3u64))
	);

	assert_eq!(
		transition(&channel_state, update, UPDATE_BLOCK + 1).unwrap_err(),
		DisputeError::StaleNonce { received: Nonce::from(1u64), recorded: Nonce::from(1u64) }
	);

	let newer = make_balance_proof(Keyring::Alice, &channel_state, 2, 5, LOCKSROOT_OF_NO_LOCKS);
	let update = UpdateBalanceProof { sender: Keyring::Bob.address(), balance_proof: newer };
	let channel_state =
		transition(&channel_state, update, UPDATE_BLOCK + 2).expect("Update should succeed").new_state;
	assert_eq!(channel_state.our_state.transferred_amount(), TokenAmount::from(5u64));
	assert_eq!(
		channel_state.our_state.update_block_number,
		Some(BlockNumber::from(UPDATE_BLOCK + 2))
	);
}

#[test]
fn test_update_with_older_proof_of_closing_partner_fails() {
	let channel_state = closed_channel();
	let balance_proof = make_balance_proof(Keyring::Bob, &channel_state, 2, 8, LOCKSROOT_OF_NO_LOCKS);
	let update = UpdateBalanceProof { sender: Keyring::Alice.address(), balance_proof };

	assert_eq!(
		transition(&channel_state, update, UPDATE_BLOCK).unwrap_err(),
		DisputeError::StaleNonce { received: Nonce::from(2u64), recorded: Nonce::from(3u64) }
	);
}

#[test]
fn test_update_window_edges() {
	let channel_state = closed_channel();
	let balance_proof =
		make_balance_proof(Keyring::Alice, &channel_state, 1, 0, LOCKSROOT_OF_NO_LOCKS);
	let update = UpdateBalanceProof { sender: Keyring::Bob.address(), balance_proof };

	let last_block = CLOSE_BLOCK + SETTLE_TIMEOUT;
	assert!(transition(&channel_state, update.clone(), last_block).is_ok());
	assert_eq!(
		transition(&channel_state, update, last_block + 1).unwrap_err(),
		DisputeError::WindowExpired {
			block_number: BlockNumber::from(last_block + 1),
			window_end: BlockNumber::from(last_block),
		}
	);
}

#[test]
fn test_punish_obsolete_unlock_scenario() {
	let locks = make_locks(20, 1);
	let channel_state = updated_channel(&locks);

	let punish = make_punish_request(Keyring::Bob, Keyring::Alice, &channel_state, &locks, &locks[5]);
	let result = transition(&channel_state, punish, UPDATE_BLOCK + 2).expect("Punish should succeed");

	let channel_state = result.new_state;
	assert_eq!(channel_state.status(), ChannelStatus::Punished);
	assert_eq!(channel_state.punishments.len(), 1);
	assert_eq!(channel_state.punishments[0].cheater, Keyring::Bob.address());
	assert_eq!(channel_state.punishments[0].amount, TokenAmount::from(1u64));

	match &result.events[0] {
		Event::ContractSendChannelPunishObsoleteUnlock(event) => {
			assert_eq!(event.beneficiary, Keyring::Alice.address());
			assert_eq!(event.cheater, Keyring::Bob.address());
			assert_eq!(event.lock_hash, locks[5].lockhash());
			assert_eq!(event.additional_hash, EMPTY_HASH);
		},
		event => panic!("Unexpected event {:?}", event),
	}

	let settle = SettleChannel { sender: Keyring::Alice.address() };
	let result = transition(&channel_state, settle, CLOSE_BLOCK + SETTLE_TIMEOUT + 1)
		.expect("Settle should succeed");
	let settlement = result.new_state.settlement.clone().expect("Settlement should be computed");

	assert_eq!(result.new_state.status(), ChannelStatus::Settled);
	assert_eq!(settlement.our_balance, TokenAmount::from(36u64));
	assert_eq!(settlement.partner_balance, TokenAmount::from(9u64));
	assert_eq!(settlement.our_locksroot, MerkleLockTree::new(&locks).root());
	assert_eq!(settlement.partner_transferred_amount, TokenAmount::from(10u64));
	assert!(matches!(result.events[0], Event::ContractSendChannelSettle(_)));
}

#[test]
fn test_punish_window_edges() {
	let locks = make_locks(4, 1);
	let channel_state = updated_channel(&locks);
	let punish = make_punish_request(Keyring::Bob, Keyring::Alice, &channel_state, &locks, &locks[0]);

	let window_end = UPDATE_BLOCK + PUNISH_WINDOW;
	assert!(transition(&channel_state, punish.clone(), window_end).is_ok());
	assert_eq!(
		transition(&channel_state, punish, window_end + 1).unwrap_err(),
		DisputeError::WindowExpired {
			block_number: BlockNumber::from(window_end + 1),
			window_end: BlockNumber::from(window_end),
		}
	);
}

#[test]
fn test_punish_requires_prior_update() {
	let locks = make_locks(4, 1);
	let channel_state = closed_channel();

	let punish = make_punish_request(Keyring::Bob, Keyring::Alice, &channel_state, &locks, &locks[0]);
	assert_eq!(
		transition(&channel_state, punish, CLOSE_BLOCK + 1).unwrap_err(),
		DisputeError::NoPriorUpdate
	);

	// Bob's end carries the closing proof, which was not recorded by an update.
	let punish = make_punish_request(Keyring::Alice, Keyring::Bob, &channel_state, &locks, &locks[0]);
	assert_eq!(
		transition(&channel_state, punish, CLOSE_BLOCK + 1).unwrap_err(),
		DisputeError::NoPriorUpdate
	);
}

#[test]
fn test_punish_is_consumed_once() {
	let locks = make_locks(4, 1);
	let channel_state = updated_channel(&locks);
	let punish = make_punish_request(Keyring::Bob, Keyring::Alice, &channel_state, &locks, &locks[1]);

	let channel_state = transition(&channel_state, punish.clone(), UPDATE_BLOCK + 1)
		.expect("Punish should succeed")
		.new_state;
	assert!(matches!(
		transition(&channel_state, punish, UPDATE_BLOCK + 2),
		Err(DisputeError::Validation(_))
	));

	let other = make_punish_request(Keyring::Bob, Keyring::Alice, &channel_state, &locks, &locks[2]);
	let channel_state = transition(&channel_state, other, UPDATE_BLOCK + 2)
		.expect("Punish of another lock should succeed")
		.new_state;
	assert_eq!(channel_state.punishments.len(), 2);
}

#[test]
fn test_punished_lock_stays_consumed_after_newer_update() {
	let locks = make_locks(20, 1);
	let channel_state = updated_channel(&locks);
	let punish = make_punish_request(Keyring::Bob, Keyring::Alice, &channel_state, &locks, &locks[0]);
	let channel_state = transition(&channel_state, punish, UPDATE_BLOCK + 1)
		.expect("Punish should succeed")
		.new_state;

	// A newer commitment of Alice that still carries the punished lock.
	let mut newer_locks = locks.clone();
	newer_locks.extend(make_locks(1, 1));
	let locksroot = MerkleLockTree::new(&newer_locks).root();
	let balance_proof = make_balance_proof(Keyring::Alice, &channel_state, 2, 0, locksroot);
	let update = UpdateBalanceProof { sender: Keyring::Bob.address(), balance_proof };
	let channel_state = transition(&channel_state, update, UPDATE_BLOCK + 2)
		.expect("Newer update should succeed")
		.new_state;

	let punish =
		make_punish_request(Keyring::Bob, Keyring::Alice, &channel_state, &newer_locks, &locks[0]);
	assert!(matches!(
		transition(&channel_state, punish, UPDATE_BLOCK + 3),
		Err(DisputeError::Validation(_))
	));
	assert_eq!(channel_state.punishments.len(), 1);

	let settle = SettleChannel { sender: Keyring::Alice.address() };
	let settlement = transition(&channel_state, settle, CLOSE_BLOCK + SETTLE_TIMEOUT + 1)
		.expect("Settle should succeed")
		.new_state
		.settlement
		.expect("Settlement should be computed");
	assert_eq!(settlement.our_balance, TokenAmount::from(36u64));
	assert_eq!(settlement.partner_balance, TokenAmount::from(9u64));
}

#[test]
fn test_punish_rejects_invalid_requests() {
	let locks = make_locks(6, 1);
	let channel_state = updated_channel(&locks);

	// Signed by the beneficiary itself.
	let punish =
		make_punish_request(Keyring::Alice, Keyring::Alice, &channel_state, &locks, &locks[0]);
	assert_eq!(
		transition(&channel_state, punish, UPDATE_BLOCK + 1).unwrap_err(),
		DisputeError::SignatureMismatch
	);

	// The lock is not part of the recorded commitment.
	let outsiders = make_locks(3, 1);
	let punish =
		make_punish_request(Keyring::Bob, Keyring::Alice, &channel_state, &outsiders, &outsiders[0]);
	assert!(matches!(
		transition(&channel_state, punish, UPDATE_BLOCK + 1),
		Err(DisputeError::Validation(_))
	));

	// The supplied lock does not match the punished lock hash.
	let mut punish =
		make_punish_request(Keyring::Bob, Keyring::Alice, &channel_state, &locks, &locks[0]);
	punish.lock = locks[1].clone();
	assert!(matches!(
		transition(&channel_state, punish, UPDATE_BLOCK + 1),
		Err(DisputeError::Validation(_))
	));
}

#[test]
fn test_settle_timeout_edges() {
	let channel_state = closed_channel();
	let settle = SettleChannel { sender: Keyring::Bob.address() };

	let last_block = CLOSE_BLOCK + SETTLE_TIMEOUT;
	assert_eq!(
		transition(&channel_state, settle.clone(), last_block).unwrap_err(),
		DisputeError::SettleTimeoutPending {
			block_number: BlockNumber::from(last_block),
			settle_block: BlockNumber::from(last_block + 1),
		}
	);

	let result = transition(&channel_state, settle, last_block + 1).expect("Settle should succeed");
	let settlement = result.new_state.settlement.expect("Settlement should be computed");
	assert_eq!(settlement.our_balance, TokenAmount::from(35u64));
	assert_eq!(settlement.partner_balance, TokenAmount::from(10u64));
}

#[test]
fn test_settled_channel_is_finalized() {
	let channel_state = closed_channel();
	let settle = SettleChannel { sender: Keyring::Bob.address() };
	let channel_state = transition(&channel_state, settle.clone(), CLOSE_BLOCK + SETTLE_TIMEOUT + 1)
		.expect("Settle should succeed")
		.new_state;

	let balance_proof =
		make_balance_proof(Keyring::Alice, &channel_state, 1, 0, LOCKSROOT_OF_NO_LOCKS);
	let state_changes: Vec<StateChange> = vec![
		CloseChannel { sender: Keyring::Alice.address(), balance_proof: None }.into(),
		UpdateBalanceProof { sender: Keyring::Bob.address(), balance_proof }.into(),
		settle.into(),
	];
	for state_change in state_changes {
		assert_eq!(
			transition(&channel_state, state_change, CLOSE_BLOCK + SETTLE_TIMEOUT + 2).unwrap_err(),
			DisputeError::ChannelFinalized
		);
	}
}
