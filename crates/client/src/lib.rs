use alloy_provider::{Provider, RootProvider};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Error connecting to the RPC endpoint
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Create an http rpc provider from url.
///
/// No request is made; use [`connect`] to also check the endpoint.
pub fn create_provider(rpc_url: &str) -> Result<RootProvider, ClientError> {
    let url: reqwest::Url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;

    Ok(RootProvider::new_http(url))
}

/// Create a provider and make sure the endpoint answers.
///
/// The provider only issues read-only calls, so no fillers or wallet are
/// attached.
pub async fn connect(rpc_url: &str) -> Result<RootProvider, ClientError> {
    let provider = create_provider(rpc_url)?;

    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ClientError::Connection(format!("{}", e)))?;
    debug!(chain_id, "Connected to {}", rpc_url);

    Ok(provider)
}
