//! Remote-procedure error taxonomy.

/// Errors surfaced by the remote-procedure layer.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("daemon offline or unreachable")]
    DaemonOffline,

    #[error("network error: {0}")]
    Network(String),

    #[error("rpc call failed: {0}")]
    Call(String),

    #[error("json parsing error: {0}")]
    JsonParse(String),

    #[error("invalid response from daemon")]
    InvalidResponse,

    #[error("identity not found: {0}")]
    IdentityNotFound(String),

    #[error("currency not found: {0}")]
    CurrencyNotFound(String),

    #[error("chain sync in progress")]
    ChainSyncing,
}

impl RpcError {
    /// Map a daemon error code onto the taxonomy. Codes a read-only client
    /// cannot trigger collapse into the generic call failure.
    pub(crate) fn from_daemon_error(code: i64, message: &str) -> Self {
        match code {
            -1 => RpcError::DaemonOffline,
            -17 => RpcError::ChainSyncing,
            -18 => RpcError::IdentityNotFound(message.to_owned()),
            -19 => RpcError::CurrencyNotFound(message.to_owned()),
            _ => RpcError::Call(format!("code {code}: {message}")),
        }
    }
}

impl From<reqwest::Error> for RpcError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            RpcError::DaemonOffline
        } else if err.is_timeout() {
            RpcError::Network("request timeout".to_owned())
        } else {
            RpcError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        RpcError::JsonParse(err.to_string())
    }
}
