mod balance_proof;
mod channel;
pub mod factories;
