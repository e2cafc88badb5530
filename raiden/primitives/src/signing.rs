use web3::signing::{
	self,
	RecoveryError,
};

use crate::{
	constants::SIGNATURE_LENGTH,
	types::Address,
};

pub fn hash_data(data: &[u8]) -> [u8; 32] {
	let prefix_msg = "\x19Ethereum Signed Message:\n";
	let len_str = data.len().to_string();
	let mut res: Vec<u8> = Vec::new();
	res.append(&mut prefix_msg.as_bytes().to_vec());
	res.append(&mut len_str.as_bytes().to_vec());
	res.append(&mut data.to_vec());

	signing::keccak256(&res)
}

/// Recover the address that produced `signature` over `data`.
///
/// Accepts both the `{27, 28}` and the `{0, 1}` conventions for `v`.
pub fn recover(data: &[u8], signature: &[u8]) -> Result<Address, RecoveryError> {
	if signature.len() != SIGNATURE_LENGTH {
		return Err(RecoveryError::InvalidSignature)
	}
	let data_hash = hash_data(data);
	let v = signature[64];
	let recovery_id = i32::from(if v >= 27 { v - 27 } else { v });
	signing::recover(&data_hash, &signature[..64], recovery_id)
}
