use raiden_primitives::{
	keys::PrivateKey,
	types::Address,
};
use web3::signing::Key;

pub const ALICE: &str = "ALICE";
pub const BOB: &str = "BOB";
pub const CHARLIE: &str = "CHARLIE";

pub enum Keyring {
	Alice,
	Bob,
	Charlie,
}

impl Keyring {
	pub fn private_key(&self) -> PrivateKey {
		let mut secret: [u8; 32] = [0; 32];
		let s = match self {
			Self::Alice => ALICE.as_bytes(),
			Self::Bob => BOB.as_bytes(),
			Self::Charlie => CHARLIE.as_bytes(),
		};
		secret[..s.len()].copy_from_slice(s);
		PrivateKey::from_raw(&secret).expect("Private key generation should not fail")
	}

	pub fn address(&self) -> Address {
		self.private_key().address()
	}
}
