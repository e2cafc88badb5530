use raiden_primitives::types::{
	Bytes,
	Secret,
};
use rand::{
	distributions::Alphanumeric,
	thread_rng,
	Rng,
};

use crate::constants::SECRET_LENGTH;

pub struct Generator;

impl Generator {
	pub fn random_secret() -> Secret {
		Bytes(
			thread_rng()
				.sample_iter(&Alphanumeric)
				.take(SECRET_LENGTH as usize)
				.collect::<Vec<u8>>(),
		)
	}
}
