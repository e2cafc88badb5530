use raiden_primitives::types::{
	Address,
	BlockNumber,
	Bytes,
	GasLimit,
	GasPrice,
	TransactionHash,
};
use raiden_state_machine::types::BalanceProofState;

use super::{
	balance_proof_tokens,
	channel_onchain_data,
	explain_estimation_failure,
	validate_balance_proof,
	ChannelTransactionData,
};
use crate::{
	client::ChainClient,
	proxies::{
		Account,
		ProxyError,
		TokenNetworkFunction,
		TokenNetworkProxy,
	},
	transactions::Transaction,
};

#[derive(Clone)]
pub struct ChannelUpdateBalanceProofTransactionParams {
	pub(crate) partner: Address,
	pub(crate) balance_proof: BalanceProofState,
}

impl ChannelUpdateBalanceProofTransactionParams {
	fn call_data(&self) -> Bytes {
		TokenNetworkFunction::UpdateBalanceProof
			.encode(&balance_proof_tokens(self.partner, Some(&self.balance_proof)))
	}
}

pub struct ChannelUpdateBalanceProofTransaction<C: ChainClient> {
	pub(crate) account: Account<C>,
	pub(crate) token_network: TokenNetworkProxy<C>,
}

#[async_trait::async_trait]
impl<C> Transaction for ChannelUpdateBalanceProofTransaction<C>
where
	C: ChainClient + 'static,
{
	type Output = TransactionHash;
	type Params = ChannelUpdateBalanceProofTransactionParams;
	type Data = ChannelTransactionData;

	async fn onchain_data(
		&self,
		_params: Self::Params,
		_at_block: BlockNumber,
	) -> Result<Self::Data, ProxyError> {
		channel_onchain_data(&self.token_network).await
	}

	async fn validate_preconditions(
		&self,
		params: Self::Params,
		data: Self::Data,
		_at_block: BlockNumber,
	) -> Result<(), ProxyError> {
		if params.balance_proof.signature.is_none() {
			return Err(ProxyError::BrokenPrecondition(
				"Cannot update with an unsigned balance proof".to_owned(),
			))
		}
		validate_balance_proof(
			&self.token_network,
			&params.balance_proof,
			data.chain_id,
			params.partner,
		)
	}

	async fn submit(
		&self,
		params: Self::Params,
		_data: Self::Data,
		gas_estimate: GasLimit,
		gas_price: GasPrice,
	) -> Result<Self::Output, ProxyError> {
		self.token_network
			.transact(
				&self.account,
				TokenNetworkFunction::UpdateBalanceProof,
				params.call_data(),
				gas_estimate,
				gas_price,
			)
			.await
	}

	async fn validate_postconditions(
		&self,
		params: Self::Params,
		_at_block: BlockNumber,
	) -> Result<Self::Output, ProxyError> {
		Err(explain_estimation_failure(
			&self.token_network,
			&self.account,
			TokenNetworkFunction::UpdateBalanceProof,
			params.call_data(),
		)
		.await)
	}

	async fn estimate_gas(
		&self,
		params: Self::Params,
		_data: Self::Data,
	) -> Result<(GasLimit, GasPrice), ProxyError> {
		self.token_network.estimate_gas(self.account.address(), params.call_data()).await
	}
}
