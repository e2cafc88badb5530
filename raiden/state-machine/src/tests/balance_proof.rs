use raiden_primitives::{
	constants::EMPTY_HASH,
	hashing::hash_secret,
	types::{
		BlockNumber,
		Bytes,
		ChainID,
		Locksroot,
		Nonce,
		TokenAmount,
		H256,
	},
};

use crate::{
	errors::DisputeError,
	tests::factories::{
		make_balance_proof,
		make_locks,
		make_punish_request,
		ChannelStateBuilder,
		Generator,
		Keyring,
	},
	types::{
		BalanceProofState,
		HashTimeLockState,
	},
};

#[test]
fn test_balance_proof_construction_is_validated() {
	let channel_state = ChannelStateBuilder::new().build();

	let result = BalanceProofState::new(
		channel_state.canonical_identifier.clone(),
		channel_state.open_block_number,
		Nonce::zero(),
		TokenAmount::from(1u64),
		Locksroot::zero().as_bytes(),
		EMPTY_HASH,
	);
	assert!(matches!(result, Err(DisputeError::Validation(_))));

	let result = BalanceProofState::new(
		channel_state.canonical_identifier.clone(),
		channel_state.open_block_number,
		Nonce::from(1u64),
		TokenAmount::from(1u64),
		&[0u8; 31],
		EMPTY_HASH,
	);
	assert!(matches!(result, Err(DisputeError::Validation(_))));
}

#[test]
fn test_signed_balance_proof_verifies() {
	let channel_state = ChannelStateBuilder::new().build();
	let balance_proof =
		make_balance_proof(Keyring::Bob, &channel_state, 3, 10, H256::repeat_byte(7));

	assert_eq!(balance_proof.sender, Some(Keyring::Bob.address()));
	assert_eq!(balance_proof.recover_signer(), Ok(Keyring::Bob.address()));
	assert_eq!(balance_proof.verify(Keyring::Bob.address()), Ok(()));
	assert_eq!(balance_proof.verify(Keyring::Alice.address()), Err(DisputeError::SignatureMismatch));
}

#[test]
fn test_signing_is_deterministic() {
	let channel_state = ChannelStateBuilder::new().build();
	let first = make_balance_proof(Keyring::Bob, &channel_state, 3, 10, Locksroot::zero());
	let second = make_balance_proof(Keyring::Bob, &channel_state, 3, 10, Locksroot::zero());
	assert_eq!(first.signature, second.signature);
}

#[test]
fn test_any_mutated_field_fails_verification() {
	let channel_state = ChannelStateBuilder::new().build();
	let signed = make_balance_proof(Keyring::Bob, &channel_state, 3, 10, H256::repeat_byte(7));
	let signer = Keyring::Bob.address();

	let mutations: Vec<Box<dyn Fn(&mut BalanceProofState)>> = vec![
		Box::new(|bp: &mut BalanceProofState| bp.nonce = Nonce::from(4u64)),
		Box::new(|bp: &mut BalanceProofState| bp.transferred_amount = TokenAmount::from(11u64)),
		Box::new(|bp: &mut BalanceProofState| bp.locksroot = H256::repeat_byte(8)),
		Box::new(|bp: &mut BalanceProofState| bp.additional_hash = H256::repeat_byte(1)),
		Box::new(|bp: &mut BalanceProofState| {
			bp.canonical_identifier.channel_identifier = H256::repeat_byte(2)
		}),
		Box::new(|bp: &mut BalanceProofState| {
			bp.canonical_identifier.chain_identifier = ChainID::Mainnet
		}),
		Box::new(|bp: &mut BalanceProofState| bp.open_block_number = BlockNumber::from(11u64)),
	];

	for mutate in mutations {
		let mut balance_proof = signed.clone();
		mutate(&mut balance_proof);
		assert_eq!(balance_proof.verify(signer), Err(DisputeError::SignatureMismatch));
	}
}

#[test]
fn test_unsigned_or_malformed_signature_fails_verification() {
	let channel_state = ChannelStateBuilder::new().build();
	let mut balance_proof =
		make_balance_proof(Keyring::Bob, &channel_state, 1, 0, Locksroot::zero());

	balance_proof.signature = Some(Bytes(vec![1u8; 12]));
	assert_eq!(balance_proof.verify(Keyring::Bob.address()), Err(DisputeError::SignatureMismatch));

	balance_proof.signature = None;
	assert_eq!(balance_proof.verify(Keyring::Bob.address()), Err(DisputeError::SignatureMismatch));
}

#[test]
fn test_lock_secret_must_match_secrethash() {
	let secret = Generator::random_secret();
	let lock = HashTimeLockState::create(
		TokenAmount::from(1u64),
		BlockNumber::from(50u64),
		hash_secret(&secret.0),
	);

	let revealed = lock.clone().with_secret(secret.clone()).expect("Secret should match");
	assert_eq!(revealed.secret, Some(secret));
	assert_eq!(revealed.lockhash(), lock.lockhash());

	let result = lock.with_secret(Generator::random_secret());
	assert!(matches!(result, Err(DisputeError::Validation(_))));
}

#[test]
fn test_lock_encoding() {
	let secrethash = H256::repeat_byte(0x55);
	let lock = HashTimeLockState::create(TokenAmount::from(3u64), BlockNumber::from(9u64), secrethash);

	assert_eq!(lock.encoded.0.len(), 96);
	assert_eq!(lock.encoded.0[31], 9);
	assert_eq!(lock.encoded.0[63], 3);
	assert_eq!(&lock.encoded.0[64..], secrethash.as_bytes());
}

#[test]
fn test_punish_request_recovers_cheater() {
	let channel_state = ChannelStateBuilder::new().build();
	let locks = make_locks(4, 1);
	let punish = make_punish_request(Keyring::Bob, Keyring::Alice, &channel_state, &locks, &locks[2]);

	assert_eq!(punish.punish_request.recover_signer(), Ok(Keyring::Bob.address()));

	let mut tampered = punish.punish_request;
	tampered.lock_hash = locks[1].lockhash();
	assert_ne!(tampered.recover_signer(), Ok(Keyring::Bob.address()));
}
