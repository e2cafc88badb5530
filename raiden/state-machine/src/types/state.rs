#![warn(clippy::missing_docs_in_private_items)]

use derive_more::Display;
use raiden_primitives::{
	constants::LOCKSROOT_OF_NO_LOCKS,
	hashing::hash_secret,
	keys::PrivateKey,
	packing::{
		pack_balance_proof,
		pack_obsolete_unlock,
	},
	signing::recover,
	traits::ToBytes,
};
use serde::{
	Deserialize,
	Serialize,
};
use web3::signing::{
	keccak256,
	Key,
	SigningError,
};

use crate::{
	errors::DisputeError,
	merkle::MerkleProofElement,
	types::{
		Address,
		BlockExpiration,
		BlockNumber,
		BlockTimeout,
		Bytes,
		CanonicalIdentifier,
		EncodedLock,
		LockHash,
		Locksroot,
		MessageHash,
		Nonce,
		Secret,
		SecretHash,
		SettleTimeout,
		Signature,
		TokenAmount,
	},
};

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub enum TransactionResult {
	Success,
	Failure,
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct TransactionExecutionStatus {
	pub started_block_number: Option<BlockNumber>,
	pub finished_block_number: Option<BlockNumber>,
	pub result: Option<TransactionResult>,
}

impl TransactionExecutionStatus {
	/// A transaction mined successfully at `block_number`.
	pub fn succeeded(block_number: BlockNumber) -> Self {
		Self {
			started_block_number: Some(block_number),
			finished_block_number: Some(block_number),
			result: Some(TransactionResult::Success),
		}
	}

	pub fn is_success(&self) -> bool {
		self.result == Some(TransactionResult::Success)
	}
}

#[derive(Copy, Clone, Display, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
	#[display(fmt = "opened")]
	Opened,
	#[display(fmt = "closed")]
	Closed,
	#[display(fmt = "updated")]
	Updated,
	#[display(fmt = "punished")]
	Punished,
	#[display(fmt = "settled")]
	Settled,
}

/// A hash time lock, encoded as `expiration ‖ amount ‖ secrethash`.
#[derive(Default, Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct HashTimeLockState {
	pub amount: TokenAmount,
	pub expiration: BlockExpiration,
	pub secrethash: SecretHash,
	pub secret: Option<Secret>,
	pub encoded: EncodedLock,
}

impl HashTimeLockState {
	pub fn create(
		amount: TokenAmount,
		expiration: BlockExpiration,
		secrethash: SecretHash,
	) -> Self {
		let mut data = expiration.to_be_bytes();
		data.extend_from_slice(&amount.to_bytes());
		data.extend_from_slice(secrethash.as_bytes());
		Self { amount, expiration, secrethash, secret: None, encoded: Bytes(data) }
	}

	/// Attach the revealed secret, which has to hash to the lock's secrethash.
	pub fn with_secret(mut self, secret: Secret) -> Result<Self, DisputeError> {
		if hash_secret(&secret.0) != self.secrethash {
			return Err(DisputeError::Validation(
				"Secret does not match the lock's secrethash".to_owned(),
			))
		}
		self.secret = Some(secret);
		Ok(self)
	}

	/// The merkle leaf of this lock.
	pub fn lockhash(&self) -> LockHash {
		LockHash::from(keccak256(&self.encoded.0))
	}
}

/// A signed snapshot of one participant's transfers in a channel.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BalanceProofState {
	pub nonce: Nonce,
	pub transferred_amount: TokenAmount,
	pub locksroot: Locksroot,
	pub additional_hash: MessageHash,
	pub canonical_identifier: CanonicalIdentifier,
	pub open_block_number: BlockNumber,
	pub signature: Option<Signature>,
	pub sender: Option<Address>,
}

impl BalanceProofState {
	pub fn new(
		canonical_identifier: CanonicalIdentifier,
		open_block_number: BlockNumber,
		nonce: Nonce,
		transferred_amount: TokenAmount,
		locksroot: &[u8],
		additional_hash: MessageHash,
	) -> Result<Self, DisputeError> {
		if nonce == Nonce::zero() {
			return Err(DisputeError::Validation(
				"Balance proof nonce must be greater than zero".to_owned(),
			))
		}
		if locksroot.len() != 32 {
			return Err(DisputeError::Validation(format!(
				"Locksroot must be 32 bytes long, got {} bytes",
				locksroot.len()
			)))
		}

		Ok(Self {
			nonce,
			transferred_amount,
			locksroot: Locksroot::from_slice(locksroot),
			additional_hash,
			canonical_identifier,
			open_block_number,
			signature: None,
			sender: None,
		})
	}

	pub fn pack(&self) -> Bytes {
		pack_balance_proof(
			self.transferred_amount,
			self.locksroot,
			self.nonce,
			self.additional_hash,
			self.canonical_identifier.channel_identifier,
			self.open_block_number,
			self.canonical_identifier.chain_identifier,
		)
	}

	pub fn sign(&mut self, key: &PrivateKey) -> Result<(), SigningError> {
		let signature = key.sign_data(&self.pack().0)?;
		self.signature = Some(signature);
		self.sender = Some(key.address());
		Ok(())
	}

	pub fn recover_signer(&self) -> Result<Address, DisputeError> {
		let signature = self.signature.as_ref().ok_or(DisputeError::SignatureMismatch)?;
		recover(&self.pack().0, &signature.0).map_err(|_| DisputeError::SignatureMismatch)
	}

	pub fn verify(&self, signer: Address) -> Result<(), DisputeError> {
		if self.recover_signer()? != signer {
			return Err(DisputeError::SignatureMismatch)
		}
		Ok(())
	}
}

/// Evidence that the cheater declared a lock obsolete before trying to unlock it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PunishRequestState {
	pub canonical_identifier: CanonicalIdentifier,
	pub open_block_number: BlockNumber,
	pub beneficiary: Address,
	pub lock_hash: LockHash,
	pub additional_hash: MessageHash,
	pub merkle_proof: Vec<MerkleProofElement>,
	pub signature: Option<Signature>,
}

impl PunishRequestState {
	pub fn pack(&self) -> Bytes {
		pack_obsolete_unlock(
			self.lock_hash,
			self.canonical_identifier.channel_identifier,
			self.open_block_number,
			self.canonical_identifier.chain_identifier,
			self.additional_hash,
		)
	}

	pub fn sign(&mut self, key: &PrivateKey) -> Result<(), SigningError> {
		self.signature = Some(key.sign_data(&self.pack().0)?);
		Ok(())
	}

	pub fn recover_signer(&self) -> Result<Address, DisputeError> {
		let signature = self.signature.as_ref().ok_or(DisputeError::SignatureMismatch)?;
		recover(&self.pack().0, &signature.0).map_err(|_| DisputeError::SignatureMismatch)
	}
}

/// A lock forfeited by `cheater` to `beneficiary`.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct PunishmentState {
	pub beneficiary: Address,
	pub cheater: Address,
	pub lock_hash: LockHash,
	pub locksroot: Locksroot,
	pub amount: TokenAmount,
	pub block_number: BlockNumber,
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct SettlementState {
	pub our_transferred_amount: TokenAmount,
	pub our_locksroot: Locksroot,
	pub our_balance: TokenAmount,
	pub partner_transferred_amount: TokenAmount,
	pub partner_locksroot: Locksroot,
	pub partner_balance: TokenAmount,
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct ChannelEndState {
	pub address: Address,
	pub deposit: TokenAmount,
	/// The latest balance proof signed by this participant.
	pub balance_proof: Option<BalanceProofState>,
	/// Block at which `balance_proof` was recorded by a balance proof update.
	pub update_block_number: Option<BlockNumber>,
}

impl ChannelEndState {
	pub fn new(address: Address, deposit: TokenAmount) -> Self {
		Self { address, deposit, balance_proof: None, update_block_number: None }
	}

	pub fn transferred_amount(&self) -> TokenAmount {
		self.balance_proof
			.as_ref()
			.map(|bp| bp.transferred_amount)
			.unwrap_or_else(TokenAmount::zero)
	}

	pub fn locksroot(&self) -> Locksroot {
		self.balance_proof.as_ref().map(|bp| bp.locksroot).unwrap_or(LOCKSROOT_OF_NO_LOCKS)
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct ChannelState {
	pub canonical_identifier: CanonicalIdentifier,
	pub open_block_number: BlockNumber,
	pub settle_timeout: SettleTimeout,
	pub punish_window: BlockTimeout,
	pub our_state: ChannelEndState,
	pub partner_state: ChannelEndState,
	pub closing_participant: Option<Address>,
	pub close_transaction: Option<TransactionExecutionStatus>,
	pub update_transaction: Option<TransactionExecutionStatus>,
	pub settle_transaction: Option<TransactionExecutionStatus>,
	pub punishments: Vec<PunishmentState>,
	pub settlement: Option<SettlementState>,
}

impl ChannelState {
	pub fn new(
		canonical_identifier: CanonicalIdentifier,
		open_block_number: BlockNumber,
		our_state: ChannelEndState,
		partner_state: ChannelEndState,
		settle_timeout: SettleTimeout,
		punish_window: BlockTimeout,
	) -> Result<ChannelState, DisputeError> {
		if our_state.address == partner_state.address {
			return Err(DisputeError::Validation(
				"Channel participants must be different addresses".to_owned(),
			))
		}
		if settle_timeout == SettleTimeout::zero() || punish_window == BlockTimeout::zero() {
			return Err(DisputeError::Validation(
				"Settle timeout and punish window must be greater than zero".to_owned(),
			))
		}

		Ok(ChannelState {
			canonical_identifier,
			open_block_number,
			settle_timeout,
			punish_window,
			our_state,
			partner_state,
			closing_participant: None,
			close_transaction: None,
			update_transaction: None,
			settle_transaction: None,
			punishments: vec![],
			settlement: None,
		})
	}

	pub fn status(&self) -> ChannelStatus {
		if self.settle_transaction.as_ref().map(|t| t.is_success()).unwrap_or(false) {
			return ChannelStatus::Settled
		}
		if !self.punishments.is_empty() {
			return ChannelStatus::Punished
		}
		if self.update_transaction.is_some() {
			return ChannelStatus::Updated
		}
		if self.close_transaction.is_some() {
			return ChannelStatus::Closed
		}
		ChannelStatus::Opened
	}

	pub fn close_block_number(&self) -> Option<BlockNumber> {
		self.close_transaction.as_ref().and_then(|t| t.finished_block_number)
	}

	/// The last block at which a balance proof update is accepted.
	pub fn settle_timeout_end(&self) -> Option<BlockNumber> {
		self.close_block_number()
			.map(|close_block| close_block.saturating_add(self.settle_timeout))
	}

	pub fn capacity(&self) -> TokenAmount {
		self.our_state.deposit.saturating_add(self.partner_state.deposit)
	}

	/// A lock is forfeited at most once, whichever commitment it is proven against.
	pub fn is_lock_punished(&self, cheater: Address, lock_hash: &LockHash) -> bool {
		self.punishments.iter().any(|p| p.cheater == cheater && &p.lock_hash == lock_hash)
	}
}
