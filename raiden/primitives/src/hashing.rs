use sha2::{
	Digest,
	Sha256,
};
use web3::signing::keccak256;

use crate::types::{
	SecretHash,
	H256,
};

pub fn hash_secret(secret: &[u8]) -> SecretHash {
	let mut hasher = Sha256::new();
	hasher.update(secret);
	SecretHash::from_slice(&hasher.finalize())
}

/// Hash two merkle nodes with the smaller one first, so that the result does not depend on
/// which side of the pair a node was on.
pub fn hash_pair(first: &H256, second: &H256) -> H256 {
	let (left, right) = if first < second { (first, second) } else { (second, first) };
	H256::from(keccak256(&[left.as_bytes(), right.as_bytes()].concat()))
}
