//! Wire types for the daemon's JSON-RPC dialect.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Connection settings for a daemon endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RpcCredentials {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
    pub id: String,
}

/// Daemon response wrapper. The daemon does not echo a `jsonrpc` field,
/// and error responses may carry a null id, so both are tolerated.
#[derive(Debug, Deserialize)]
pub(crate) struct DaemonRpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<DaemonRpcError>,
    #[serde(default)]
    #[allow(dead_code)]
    pub id: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DaemonRpcError {
    pub code: i64,
    pub message: String,
}
