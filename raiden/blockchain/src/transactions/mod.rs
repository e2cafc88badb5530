mod channel;

use raiden_primitives::types::{
	BlockNumber,
	GasLimit,
	GasPrice,
};

pub use crate::transactions::channel::*;
use crate::proxies::ProxyError;

/// A contract call going through validation, gas estimation and submission.
#[async_trait::async_trait]
pub trait Transaction {
	type Output: Send + Sync;
	type Params: Clone + Send + Sync;
	type Data: Clone + Send + Sync;

	async fn onchain_data(
		&self,
		params: Self::Params,
		at_block: BlockNumber,
	) -> Result<Self::Data, ProxyError>;

	async fn validate_preconditions(
		&self,
		params: Self::Params,
		data: Self::Data,
		at_block: BlockNumber,
	) -> Result<(), ProxyError>;

	async fn submit(
		&self,
		params: Self::Params,
		data: Self::Data,
		gas_estimate: GasLimit,
		gas_price: GasPrice,
	) -> Result<Self::Output, ProxyError>;

	/// Explain why gas estimation failed.
	async fn validate_postconditions(
		&self,
		params: Self::Params,
		at_block: BlockNumber,
	) -> Result<Self::Output, ProxyError>;

	async fn estimate_gas(
		&self,
		params: Self::Params,
		data: Self::Data,
	) -> Result<(GasLimit, GasPrice), ProxyError>;

	async fn execute(
		&self,
		params: Self::Params,
		at_block: BlockNumber,
	) -> Result<Self::Output, ProxyError> {
		let data = self.onchain_data(params.clone(), at_block).await?;
		self.validate_preconditions(params.clone(), data.clone(), at_block).await?;

		let (gas_estimate, gas_price) = match self.estimate_gas(params.clone(), data.clone()).await
		{
			Ok(estimate) => estimate,
			Err(ProxyError::Chain(e)) if !e.is_unavailable() =>
				return self.validate_postconditions(params, at_block).await,
			Err(e) => return Err(e),
		};
		self.submit(params, data, gas_estimate, gas_price).await
	}
}
