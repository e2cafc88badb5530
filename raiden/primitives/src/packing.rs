use crate::{
	traits::ToBytes,
	types::{
		BlockNumber,
		Bytes,
		ChainID,
		ChannelIdentifier,
		LockHash,
		Locksroot,
		MessageHash,
		Nonce,
		TokenAmount,
	},
};

/// Pack the fields of a balance proof in the order and width the token network contract
/// recovers the signer from.
///
/// `transferred_amount (32) ‖ locksroot (32) ‖ nonce (8) ‖ additional_hash (32) ‖
/// channel_identifier (32) ‖ open_block_number (8) ‖ chain_id (32)`
pub fn pack_balance_proof(
	transferred_amount: TokenAmount,
	locksroot: Locksroot,
	nonce: Nonce,
	additional_hash: MessageHash,
	channel_identifier: ChannelIdentifier,
	open_block_number: BlockNumber,
	chain_identifier: ChainID,
) -> Bytes {
	let mut b = vec![];

	b.extend(transferred_amount.to_bytes());
	b.extend(locksroot.as_bytes());
	b.extend(nonce.as_bytes());
	b.extend(additional_hash.as_bytes());
	b.extend(channel_identifier.as_bytes());
	b.extend(open_block_number.as_bytes());
	b.extend(chain_identifier.to_be_bytes());

	Bytes(b)
}

/// Pack an obsolete unlock statement.
///
/// `lock_hash (32) ‖ channel_identifier (32) ‖ open_block_number (8) ‖ chain_id (32) ‖
/// additional_hash (32)`
pub fn pack_obsolete_unlock(
	lock_hash: LockHash,
	channel_identifier: ChannelIdentifier,
	open_block_number: BlockNumber,
	chain_identifier: ChainID,
	additional_hash: MessageHash,
) -> Bytes {
	let mut b = vec![];

	b.extend(lock_hash.as_bytes());
	b.extend(channel_identifier.as_bytes());
	b.extend(open_block_number.as_bytes());
	b.extend(chain_identifier.to_be_bytes());
	b.extend(additional_hash.as_bytes());

	Bytes(b)
}
