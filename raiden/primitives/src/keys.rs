use std::fmt;

use ethsign::SecretKey;
use web3::signing::{
	self,
	Key,
	SigningError,
};

use crate::{
	signing::hash_data,
	traits::ToBytes,
	types::{
		Address,
		Bytes,
		Signature,
		H256,
	},
};

/// A secp256k1 key able to sign balance proofs, punish requests and transactions.
#[derive(Clone)]
pub struct PrivateKey {
	inner: SecretKey,
}

impl PrivateKey {
	pub fn new(inner: SecretKey) -> Self {
		Self { inner }
	}

	pub fn from_raw(raw: &[u8]) -> Result<Self, SigningError> {
		let inner = SecretKey::from_raw(raw).map_err(|_| SigningError::InvalidMessage)?;
		Ok(Self { inner })
	}

	/// Sign arbitrary data using the Ethereum signed message prefix.
	///
	/// Signing is deterministic (RFC6979), the same key and data always yield the same
	/// signature.
	pub fn sign_data(&self, data: &[u8]) -> Result<Signature, SigningError> {
		let data_hash = hash_data(data);
		let signature = self.sign_message(&data_hash)?;
		Ok(Bytes(signature.to_bytes()))
	}
}

impl fmt::Debug for PrivateKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PrivateKey").field("address", &self.address()).finish()
	}
}

impl Key for PrivateKey {
	fn sign(
		&self,
		message: &[u8],
		chain_id: Option<u64>,
	) -> Result<signing::Signature, SigningError> {
		let signature = self.inner.sign(message).map_err(|_| SigningError::InvalidMessage)?;

		let standard_v = signature.v as u64;
		let v = if let Some(chain_id) = chain_id {
			standard_v + 35 + chain_id * 2
		} else {
			standard_v + 27
		};
		Ok(signing::Signature { r: H256::from(signature.r), s: H256::from(signature.s), v })
	}

	fn sign_message(&self, message: &[u8]) -> Result<signing::Signature, SigningError> {
		let signature = self.inner.sign(message).map_err(|_| SigningError::InvalidMessage)?;

		Ok(signing::Signature {
			r: H256::from(signature.r),
			s: H256::from(signature.s),
			v: signature.v as u64 + 27,
		})
	}

	fn address(&self) -> Address {
		Address::from_slice(self.inner.public().address())
	}
}
