use ethabi::Token;
use raiden_primitives::types::{
	Address,
	BlockNumber,
	Bytes,
	CanonicalIdentifier,
	GasLimit,
	GasPrice,
	TransactionHash,
};
use raiden_state_machine::types::SettlementState;

use super::{
	channel_onchain_data,
	explain_estimation_failure,
	validate_canonical_identifier,
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
pub struct ChannelSettleTransactionParams {
	pub(crate) canonical_identifier: CanonicalIdentifier,
	pub(crate) partner: Address,
	pub(crate) settlement: SettlementState,
	/// First block at which the contract accepts the settlement.
	pub(crate) settle_block_number: BlockNumber,
}

pub struct ChannelSettleTransaction<C: ChainClient> {
	pub(crate) account: Account<C>,
	pub(crate) token_network: TokenNetworkProxy<C>,
}

impl<C: ChainClient + 'static> ChannelSettleTransaction<C> {
	fn call_data(&self, params: &ChannelSettleTransactionParams) -> Bytes {
		let settlement = &params.settlement;
		TokenNetworkFunction::SettleChannel.encode(&[
			Token::Address(self.account.address()),
			Token::Uint(settlement.our_transferred_amount),
			Token::FixedBytes(settlement.our_locksroot.as_bytes().to_vec()),
			Token::Address(params.partner),
			Token::Uint(settlement.partner_transferred_amount),
			Token::FixedBytes(settlement.partner_locksroot.as_bytes().to_vec()),
		])
	}
}

#[async_trait::async_trait]
impl<C> Transaction for ChannelSettleTransaction<C>
where
	C: ChainClient + 'static,
{
	type Output = TransactionHash;
	type Params = ChannelSettleTransactionParams;
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
		validate_canonical_identifier(
			&self.token_network,
			&params.canonical_identifier,
			data.chain_id,
		)?;

		if data.block_number < params.settle_block_number {
			return Err(ProxyError::BrokenPrecondition(format!(
				"Settle timeout has not expired. Current block {}, settle possible at {}",
				data.block_number, params.settle_block_number,
			)))
		}

		Ok(())
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
				TokenNetworkFunction::SettleChannel,
				self.call_data(&params),
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
			TokenNetworkFunction::SettleChannel,
			self.call_data(&params),
		)
		.await)
	}

	async fn estimate_gas(
		&self,
		params: Self::Params,
		_data: Self::Data,
	) -> Result<(GasLimit, GasPrice), ProxyError> {
		self.token_network.estimate_gas(self.account.address(), self.call_data(&params)).await
	}
}
