use itertools::Itertools;
use raiden_primitives::{
	constants::LOCKSROOT_OF_NO_LOCKS,
	hashing::hash_pair,
	types::{
		Bytes,
		LockHash,
		Locksroot,
		H256,
	},
};
use serde::{
	Deserialize,
	Serialize,
};

use crate::{
	errors::DisputeError,
	types::HashTimeLockState,
};

/// Which side of the pair the sibling occupied when the parent was hashed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SiblingPosition {
	Left,
	Right,
}

/// One level of an inclusion proof.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MerkleProofElement {
	pub hash: H256,
	pub position: SiblingPosition,
}

/// Commitment over a set of pending locks.
///
/// Leaves are de-duplicated and sorted before the tree is built, which makes the root
/// independent of the order locks were added in. Parents hash the sorted pair of their
/// children and a node left without a sibling is promoted to the next layer as is.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MerkleLockTree {
	layers: Vec<Vec<H256>>,
}

impl MerkleLockTree {
	pub fn new(locks: &[HashTimeLockState]) -> Self {
		Self::from_leaves(locks.iter().map(|lock| lock.lockhash()))
	}

	pub fn from_leaves<I>(leaves: I) -> Self
	where
		I: IntoIterator<Item = LockHash>,
	{
		let leaves: Vec<H256> = leaves.into_iter().sorted().dedup().collect();

		let mut layer = leaves.clone();
		let mut layers = vec![leaves];
		while layer.len() > 1 {
			layer = layer
				.chunks(2)
				.map(|pair| if pair.len() == 2 { hash_pair(&pair[0], &pair[1]) } else { pair[0] })
				.collect();
			layers.push(layer.clone());
		}

		Self { layers }
	}

	pub fn root(&self) -> Locksroot {
		self.layers
			.last()
			.and_then(|layer| layer.first())
			.copied()
			.unwrap_or(LOCKSROOT_OF_NO_LOCKS)
	}

	pub fn leaves(&self) -> &[H256] {
		self.layers.first().map(|layer| layer.as_slice()).unwrap_or(&[])
	}

	pub fn contains(&self, leaf: &LockHash) -> bool {
		self.leaves().binary_search(leaf).is_ok()
	}

	/// Collect the siblings on the path from `leaf` up to the root.
	pub fn make_proof(&self, leaf: &LockHash) -> Result<Vec<MerkleProofElement>, DisputeError> {
		let mut index = self.leaves().binary_search(leaf).map_err(|_| DisputeError::ProofNotFound)?;

		let mut proof = vec![];
		for layer in self.layers.iter().take(self.layers.len().saturating_sub(1)) {
			let sibling_index = index ^ 1;
			if let Some(sibling) = layer.get(sibling_index) {
				let position =
					if sibling_index < index { SiblingPosition::Left } else { SiblingPosition::Right };
				proof.push(MerkleProofElement { hash: *sibling, position });
			}
			index /= 2;
		}

		Ok(proof)
	}
}

/// Recompute the root from `leaf` and its proof and compare it with `root`.
///
/// Siblings are combined with sorted pair hashing, the position recorded in each element
/// does not influence the result.
pub fn verify_proof(leaf: &LockHash, proof: &[MerkleProofElement], root: &Locksroot) -> bool {
	if *root == LOCKSROOT_OF_NO_LOCKS {
		return false
	}
	let computed = proof.iter().fold(*leaf, |computed, element| hash_pair(&computed, &element.hash));
	computed == *root
}

/// The concatenated sibling hashes, as the token network contract expects them.
pub fn proof_to_bytes(proof: &[MerkleProofElement]) -> Bytes {
	Bytes(proof.iter().flat_map(|element| element.hash.as_bytes().to_vec()).collect())
}
