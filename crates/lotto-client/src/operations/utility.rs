//! Lookups for the ledger's utility identities and basket currencies.

use serde_json::Value;

use crate::error::ClientError;
use crate::rpc::ChainRpc;

/// Fetch a utility identity (jackpot, payout, operations, …) by name.
pub async fn process_fetch_utility_identity(
    rpc: &dyn ChainRpc,
    name: &str,
    chain: Option<&str>,
) -> Result<Value, ClientError> {
    rpc.get_identity(name, chain)
        .await
        .map_err(|source| ClientError::UtilityLookup {
            name: name.to_owned(),
            source,
        })
}

/// Fetch a basket currency definition by name.
pub async fn process_fetch_utility_currency(
    rpc: &dyn ChainRpc,
    currency_name: &str,
    chain: Option<&str>,
) -> Result<Value, ClientError> {
    rpc.get_currency(currency_name, None, chain)
        .await
        .map_err(|source| ClientError::UtilityLookup {
            name: currency_name.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::mock::MockRpc;
    use serde_json::json;

    #[tokio::test]
    async fn resolves_identities_and_currencies() {
        let rpc = MockRpc::new()
            .with_identity("jackpot.lottery1@", json!({ "identity": {} }))
            .with_currency("basket1", json!({ "currencyid": "iBasket111" }));

        assert!(process_fetch_utility_identity(&rpc, "jackpot.lottery1@", None)
            .await
            .is_ok());
        let currency = process_fetch_utility_currency(&rpc, "basket1", None)
            .await
            .unwrap();
        assert_eq!(currency["currencyid"], "iBasket111");
    }

    #[tokio::test]
    async fn failures_name_the_target() {
        let rpc = MockRpc::new();
        let err = process_fetch_utility_identity(&rpc, "ghost@", None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ghost@"));
    }
}
