//! Remote-procedure collaborator consumed by the client operations.
//!
//! The client only ever reads already-confirmed chain state through this
//! request/response seam; wallet and transaction operations are out of
//! scope. All operations accept an optional lower-cased chain selector;
//! omitting it targets the default network.

mod client;
mod error;
mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use client::HttpRpcClient;
pub use error::RpcError;
pub use types::RpcCredentials;

use async_trait::async_trait;
use serde_json::Value;

/// The opaque remote-procedure client the state machine is built against.
///
/// Implementations suspend the calling operation only; the trait is the
/// exact set of suspension points in the client.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Resolve an identity by name, with its current on-chain state.
    async fn get_identity(&self, name: &str, chain: Option<&str>) -> Result<Value, RpcError>;

    /// Resolve an identity's content history, filtered to one VDXF key.
    async fn get_identity_content(
        &self,
        name: &str,
        height_start: Option<u64>,
        height_end: Option<u64>,
        tx_proofs: bool,
        vdxf_key: &str,
        chain: Option<&str>,
    ) -> Result<Value, RpcError>;

    /// Current chain height.
    async fn get_block_count(&self, chain: Option<&str>) -> Result<u64, RpcError>;

    /// Resolve a currency definition by name.
    async fn get_currency(
        &self,
        currency_name: &str,
        height: Option<u64>,
        chain: Option<&str>,
    ) -> Result<Value, RpcError>;

    /// Verify a signature over an arbitrary message.
    async fn verify_message(
        &self,
        identity_or_address: &str,
        signature: &str,
        message: &str,
        check_latest: bool,
        chain: Option<&str>,
    ) -> Result<bool, RpcError>;

    /// Verify a signature over a hex hash.
    async fn verify_hash(
        &self,
        identity_or_address: &str,
        signature: &str,
        hex_hash: &str,
        check_latest: bool,
        chain: Option<&str>,
    ) -> Result<bool, RpcError>;
}
