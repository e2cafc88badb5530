use serde::Serialize;

use crate::types::{
	ChainID,
	U64,
};

impl Serialize for ChainID {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		let value: u64 = (*self).into();
		serializer.serialize_str(&value.to_string())
	}
}

impl Serialize for U64 {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.to_string())
	}
}
