use lazy_static::lazy_static;

use crate::types::{
	Bytes,
	Locksroot,
	MessageHash,
	H256,
};

/// Lock commitment of an empty set of pending locks.
pub const LOCKSROOT_OF_NO_LOCKS: Locksroot = H256([0u8; 32]);

/// Additional hash used when a balance proof carries no message.
pub const EMPTY_HASH: MessageHash = H256([0u8; 32]);

/// Length of an `r ‖ s ‖ v` signature.
pub const SIGNATURE_LENGTH: usize = 65;

lazy_static! {
	pub static ref EMPTY_SIGNATURE: Bytes = Bytes(vec![0; SIGNATURE_LENGTH]);
}
