//! Error types returned by the client's public operations.
//!
//! Payload-level problems (malformed JSON, unrecognized shapes) never reach
//! this module: the extractor and normalizer recover from them locally and
//! surface `None`. Only operations without a local fallback propagate errors.

use crate::rpc::RpcError;

/// Errors surfaced by the top-level client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The ledger identity resolved but its published payload could not be
    /// normalized into a usable snapshot.
    #[error("ledger data unavailable for {0}")]
    LedgerUnavailable(String),

    /// An operation that needs ledger parameters ran before any successful
    /// ledger fetch.
    #[error("ledger data not loaded")]
    LedgerNotLoaded,

    /// A utility identity or currency lookup failed.
    #[error("utility lookup for {name} failed: {source}")]
    UtilityLookup {
        name: String,
        #[source]
        source: RpcError,
    },

    /// The remote procedure layer failed and no fallback applied.
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

/// Why a single ticket could not be resolved.
///
/// Carried per skipped index in an enumeration report; enumeration itself
/// never aborts on these.
#[derive(Debug, thiserror::Error)]
pub enum TicketFetchError {
    /// Every name candidate failed at the transport or resolution layer.
    #[error("ticket identity did not resolve: {0}")]
    Unresolved(#[from] RpcError),

    /// The identity resolved but carries no published message.
    #[error("ticket identity has no published message")]
    MissingMessage,

    /// The published message could not be parsed as a ticket payload.
    #[error("ticket payload failed to parse")]
    MalformedPayload,
}
