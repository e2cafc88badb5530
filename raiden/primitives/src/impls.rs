use web3::{
	signing::{
		keccak256,
		Signature,
	},
	types::{
		Address,
		U256,
	},
};

use crate::traits::{
	ToBytes,
	ToChecksummed,
};

impl ToBytes for U256 {
	fn to_bytes(&self) -> Vec<u8> {
		let mut bytes = [0u8; 32];
		self.to_big_endian(&mut bytes);
		bytes.to_vec()
	}
}

impl ToBytes for Signature {
	fn to_bytes(&self) -> Vec<u8> {
		let rb = self.r.to_fixed_bytes();
		let sb = self.s.to_fixed_bytes();
		let sv = self.v.to_be_bytes();

		let mut b = vec![];
		b.extend(&rb);
		b.extend(&sb);
		b.push(sv[sv.len() - 1]);
		b
	}
}

impl ToChecksummed for Address {
	fn to_checksummed(&self) -> String {
		let lowercase = hex::encode(self.as_bytes());
		let hash = keccak256(lowercase.as_bytes());

		let mut checksummed = String::from("0x");
		for (index, c) in lowercase.chars().enumerate() {
			let nibble =
				if index % 2 == 0 { hash[index / 2] >> 4 } else { hash[index / 2] & 0x0f };
			if nibble >= 8 {
				checksummed.push(c.to_ascii_uppercase());
			} else {
				checksummed.push(c);
			}
		}
		checksummed
	}
}
