use web3::transports::Http;

use super::{
	ChainClient,
	Result,
	Web3Client,
};
use crate::errors::ChainError;

/// Dials a fresh client connected to the node.
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
	type Client: ChainClient + 'static;

	async fn connect(&self) -> Result<Self::Client>;
}

/// Connects to a node over JSON-RPC on HTTP.
#[derive(Clone, Debug)]
pub struct HttpConnector {
	url: String,
}

impl HttpConnector {
	pub fn new(url: String) -> Self {
		Self { url }
	}
}

#[async_trait::async_trait]
impl Connector for HttpConnector {
	type Client = Web3Client<Http>;

	async fn connect(&self) -> Result<Self::Client> {
		let transport = Http::new(&self.url).map_err(ChainError::from)?;
		let client = Web3Client::new(transport);
		// HTTP transports connect lazily, so check the node before handing the client out.
		client.block_number().await?;
		Ok(client)
	}
}
