use crate::{Balance, CheckError, ContractCaller};
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use binding::token::IWETH9;
use tracing::debug;

// Balance monitor implementation.
pub struct BalanceMonitor<C> {
    caller: C,
}

impl<C> BalanceMonitor<C>
where
    C: ContractCaller,
{
    pub const fn new(caller: C) -> Self {
        Self { caller }
    }

    /// Query the token balance of `holder`.
    pub async fn query_erc20(
        &self,
        token: Address,
        holder: Address,
    ) -> Result<Balance, CheckError> {
        debug!("Querying erc20 {} balance: address={}", token, holder);

        let input = Bytes::from(IWETH9::balanceOfCall { owner: holder }.abi_encode());
        let output = self
            .caller
            .call(token, input)
            .await
            .map_err(|e| CheckError::Call(format!("{:#}", e)))?;

        debug!("Raw balanceOf result for {}: {}", holder, output);

        let amount = IWETH9::balanceOfCall::abi_decode_returns(&output)?;

        Ok(Balance {
            holder,
            asset: token,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    /// Caller answering every request with the same bytes.
    struct FixedCaller(Result<Bytes, String>);

    impl ContractCaller for FixedCaller {
        async fn call(&self, _to: Address, input: Bytes) -> eyre::Result<Bytes> {
            assert_eq!(&input[..4], IWETH9::balanceOfCall::SELECTOR.as_slice());
            self.0.clone().map_err(|e| eyre::eyre!(e))
        }
    }

    fn word(value: U256) -> Bytes {
        Bytes::from(value.to_be_bytes::<32>().to_vec())
    }

    #[tokio::test]
    async fn test_query_erc20() {
        let token = Address::repeat_byte(0x42);
        let holder = Address::repeat_byte(0x01);
        let raw = U256::from(3_000_000_000_000_000_000u128);

        let monitor = BalanceMonitor::new(FixedCaller(Ok(word(raw))));
        let balance = monitor.query_erc20(token, holder).await.unwrap();

        assert_eq!(
            balance,
            Balance {
                holder,
                asset: token,
                amount: raw,
            }
        );
    }

    #[tokio::test]
    async fn test_query_max_balance() {
        let monitor = BalanceMonitor::new(FixedCaller(Ok(word(U256::MAX))));
        let balance = monitor
            .query_erc20(Address::ZERO, Address::repeat_byte(0x01))
            .await
            .unwrap();

        assert_eq!(balance.amount, U256::MAX);
    }

    #[tokio::test]
    async fn test_call_failure() {
        let monitor = BalanceMonitor::new(FixedCaller(Err("connection refused".to_string())));
        let err = monitor
            .query_erc20(Address::ZERO, Address::repeat_byte(0x01))
            .await
            .unwrap_err();

        match err {
            CheckError::Call(reason) => assert!(reason.contains("connection refused")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_decode_failure() {
        // An EOA or a non-token contract answers with empty return data.
        let monitor = BalanceMonitor::new(FixedCaller(Ok(Bytes::new())));
        let err = monitor
            .query_erc20(Address::ZERO, Address::repeat_byte(0x01))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckError::Decode(_)));
    }
}
