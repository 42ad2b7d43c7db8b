use crate::ContractCaller;
use alloy_primitives::{Address, Bytes};
use alloy_provider::Provider;
use alloy_rpc_types_eth::TransactionRequest;
use tracing::trace;

/// Contract caller backed by a JSON-RPC provider.
pub struct ProviderCaller<P> {
    provider: P,
}

impl<P> ProviderCaller<P>
where
    P: Provider,
{
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P> ContractCaller for ProviderCaller<P>
where
    P: Provider,
{
    async fn call(&self, to: Address, input: Bytes) -> eyre::Result<Bytes> {
        trace!("eth_call to={} input={}", to, input);

        // No block id: the node resolves the call against `latest`.
        let tx = TransactionRequest::default().to(to).input(input.into());
        let output = self.provider.call(tx).await?;

        Ok(output)
    }
}
