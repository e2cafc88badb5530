mod close;
mod punish;
mod settle;
mod update;

pub use close::*;
use ethabi::Token;
pub use punish::*;
use raiden_primitives::{
	constants::{
		EMPTY_HASH,
		EMPTY_SIGNATURE,
		LOCKSROOT_OF_NO_LOCKS,
	},
	types::{
		Address,
		BlockNumber,
		Bytes,
		CanonicalIdentifier,
		ChainID,
		U256,
	},
};
use raiden_state_machine::types::BalanceProofState;
pub use settle::*;
pub use update::*;

use crate::{
	client::ChainClient,
	proxies::{
		Account,
		ProxyError,
		TokenNetworkFunction,
		TokenNetworkProxy,
	},
};

/// Chain state channel transactions validate their arguments against.
#[derive(Clone, Debug)]
pub struct ChannelTransactionData {
	pub(crate) chain_id: ChainID,
	pub(crate) block_number: BlockNumber,
}

pub(crate) async fn channel_onchain_data<C: ChainClient + 'static>(
	token_network: &TokenNetworkProxy<C>,
) -> Result<ChannelTransactionData, ProxyError> {
	let chain_id = token_network.chain_id().await?;
	let block_number = token_network.block_number().await?;
	Ok(ChannelTransactionData { chain_id, block_number })
}

/// Make sure the channel lives on this chain and in this token network.
pub(crate) fn validate_canonical_identifier<C: ChainClient + 'static>(
	token_network: &TokenNetworkProxy<C>,
	canonical_identifier: &CanonicalIdentifier,
	chain_id: ChainID,
) -> Result<(), ProxyError> {
	if canonical_identifier.token_network_address != token_network.address() {
		return Err(ProxyError::BrokenPrecondition(format!(
			"Channel belongs to token network {:?}, not {:?}",
			canonical_identifier.token_network_address,
			token_network.address(),
		)))
	}
	if canonical_identifier.chain_identifier != chain_id {
		return Err(ProxyError::BrokenPrecondition(format!(
			"Channel belongs to chain {}, connected to chain {}",
			canonical_identifier.chain_identifier, chain_id,
		)))
	}
	Ok(())
}

/// Make sure the balance proof is signed by `signer` for a channel of this token network.
pub(crate) fn validate_balance_proof<C: ChainClient + 'static>(
	token_network: &TokenNetworkProxy<C>,
	balance_proof: &BalanceProofState,
	chain_id: ChainID,
	signer: Address,
) -> Result<(), ProxyError> {
	validate_canonical_identifier(token_network, &balance_proof.canonical_identifier, chain_id)?;

	let recovered_address = balance_proof
		.recover_signer()
		.map_err(|_| ProxyError::Unrecoverable("Could not verify the balance proof".to_owned()))?;
	if recovered_address != signer {
		return Err(ProxyError::Unrecoverable(format!(
			"Balance proof is signed by {:?}, expected {:?}",
			recovered_address, signer,
		)))
	}
	Ok(())
}

/// Arguments shared by `closeChannel` and `updateBalanceProof`.
///
/// Closing without a balance proof sends the zero values the contract treats as no transfers.
pub(crate) fn balance_proof_tokens(
	partner: Address,
	balance_proof: Option<&BalanceProofState>,
) -> Vec<Token> {
	match balance_proof {
		Some(balance_proof) => vec![
			Token::Address(partner),
			Token::Uint(balance_proof.transferred_amount),
			Token::FixedBytes(balance_proof.locksroot.as_bytes().to_vec()),
			Token::Uint(balance_proof.nonce.into()),
			Token::FixedBytes(balance_proof.additional_hash.as_bytes().to_vec()),
			Token::Bytes(
				balance_proof.signature.clone().unwrap_or_else(|| EMPTY_SIGNATURE.clone()).0,
			),
		],
		None => vec![
			Token::Address(partner),
			Token::Uint(U256::zero()),
			Token::FixedBytes(LOCKSROOT_OF_NO_LOCKS.as_bytes().to_vec()),
			Token::Uint(U256::zero()),
			Token::FixedBytes(EMPTY_HASH.as_bytes().to_vec()),
			Token::Bytes(EMPTY_SIGNATURE.0.clone()),
		],
	}
}

/// Tell apart an account without funds from a call the contract rejects.
pub(crate) async fn explain_estimation_failure<C: ChainClient + 'static>(
	token_network: &TokenNetworkProxy<C>,
	account: &Account<C>,
	function: TokenNetworkFunction,
	data: Bytes,
) -> ProxyError {
	let gas_price = match token_network.client().gas_price().await {
		Ok(gas_price) => gas_price,
		Err(e) => return e.into(),
	};
	if let Err(e) = account.check_for_insufficient_eth(function.gas_reserve(), gas_price).await {
		return e
	}

	let failed_at = token_network.block_number().await.ok();
	let reason = token_network.revert_reason(account.address(), data, failed_at).await;
	ProxyError::BrokenPrecondition(format!(
		"{} failed. Gas estimation failed: {}",
		function, reason
	))
}
