use ethabi::Token;
use raiden_primitives::{
	packing::pack_obsolete_unlock,
	signing::recover,
	types::{
		Address,
		BlockNumber,
		Bytes,
		CanonicalIdentifier,
		GasLimit,
		GasPrice,
		LockHash,
		MessageHash,
		Signature,
		TransactionHash,
	},
};

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

/// An unlock of `lock_hash` the cheater signed and later dropped from its lock commitment.
#[derive(Clone, Debug)]
pub struct ChannelPunishObsoleteUnlockTransactionParams {
	pub canonical_identifier: CanonicalIdentifier,
	pub open_block_number: BlockNumber,
	pub beneficiary: Address,
	pub cheater: Address,
	pub lock_hash: LockHash,
	pub additional_hash: MessageHash,
	pub cheater_signature: Signature,
}

impl ChannelPunishObsoleteUnlockTransactionParams {
	fn call_data(&self) -> Bytes {
		TokenNetworkFunction::PunishObsoleteUnlock.encode(&[
			Token::Address(self.beneficiary),
			Token::Address(self.cheater),
			Token::FixedBytes(self.lock_hash.as_bytes().to_vec()),
			Token::FixedBytes(self.additional_hash.as_bytes().to_vec()),
			Token::Bytes(self.cheater_signature.0.clone()),
		])
	}
}

pub struct ChannelPunishObsoleteUnlockTransaction<C: ChainClient> {
	pub(crate) account: Account<C>,
	pub(crate) token_network: TokenNetworkProxy<C>,
}

#[async_trait::async_trait]
impl<C> Transaction for ChannelPunishObsoleteUnlockTransaction<C>
where
	C: ChainClient + 'static,
{
	type Output = TransactionHash;
	type Params = ChannelPunishObsoleteUnlockTransactionParams;
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

		if params.beneficiary != self.account.address() {
			return Err(ProxyError::BrokenPrecondition(format!(
				"Only the beneficiary {:?} can punish an obsolete unlock",
				params.beneficiary,
			)))
		}

		let signed_data = pack_obsolete_unlock(
			params.lock_hash,
			params.canonical_identifier.channel_identifier,
			params.open_block_number,
			data.chain_id,
			params.additional_hash,
		);
		let recovered_address = recover(&signed_data.0, &params.cheater_signature.0)
			.map_err(|_| {
				ProxyError::Unrecoverable("Could not verify the cheater signature".to_owned())
			})?;
		if recovered_address != params.cheater {
			return Err(ProxyError::Unrecoverable("Invalid cheater signature".to_owned()))
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
				TokenNetworkFunction::PunishObsoleteUnlock,
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
			TokenNetworkFunction::PunishObsoleteUnlock,
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
