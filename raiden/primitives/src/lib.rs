#![warn(clippy::missing_docs_in_private_items)]

/// Base constants.
pub mod constants;
/// Base deserializers.
pub mod deserializers;
/// Base hashing functions.
pub mod hashing;
/// Base trait implementations.
pub mod impls;
/// Private keys used to sign balance proofs and transactions.
pub mod keys;
/// Canonical packing of signed messages.
pub mod packing;
/// Base serializers.
pub mod serializers;
/// Signature hashing and recovery utils.
pub mod signing;
/// Base traits.
pub mod traits;
/// Base types.
pub mod types;
