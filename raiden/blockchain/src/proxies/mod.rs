mod common;
mod token_network;

pub use common::*;
pub use token_network::*;

pub use crate::errors::ProxyError;
