//! Ledger identity fetch.

use tracing::debug;

use crate::cache::LottoCache;
use crate::content;
use crate::error::ClientError;
use crate::normalize;
use crate::rpc::ChainRpc;
use crate::state::LedgerSnapshot;

/// Fetch and cache the current ledger snapshot.
///
/// Steps performed:
/// 1. Flip the cache's loading flag on (reset on every exit path).
/// 2. Fetch the ledger identity, then the current chain height — in that
///    order, so a parameter change is compared against a height at least
///    as fresh as the identity data.
/// 3. Normalize the published payload into a snapshot.
/// 4. Replace the cached ledger slot; when the phase or drawing block
///    moved, drop all derived ticket data.
///
/// A failed fetch records the error on the cache for display and leaves
/// the previously cached snapshot intact.
pub async fn process_fetch_ledger(
    rpc: &dyn ChainRpc,
    cache: &LottoCache,
    ledger_identity: &str,
    chain: Option<&str>,
) -> Result<LedgerSnapshot, ClientError> {
    let _loading = cache.begin_loading();

    match fetch_and_cache(rpc, cache, ledger_identity, chain).await {
        Ok(snapshot) => Ok(snapshot),
        Err(err) => {
            cache.set_error(Some(err.to_string()));
            Err(err)
        }
    }
}

async fn fetch_and_cache(
    rpc: &dyn ChainRpc,
    cache: &LottoCache,
    ledger_identity: &str,
    chain: Option<&str>,
) -> Result<LedgerSnapshot, ClientError> {
    let identity = rpc.get_identity(ledger_identity, chain).await?;
    let height = rpc.get_block_count(chain).await?;

    let snapshot = normalize::parse_ledger_data(&identity)
        .ok_or_else(|| ClientError::LedgerUnavailable(ledger_identity.to_owned()))?;
    let parent = content::parent_address(&identity).map(str::to_owned);

    let parameters_changed = cache.set_ledger(snapshot.clone(), identity, height, parent);
    if parameters_changed {
        debug!(
            phase = %snapshot.current_phase,
            drawing_block = snapshot.parameters.drawing_block,
            "ledger parameters moved; dropping cached tickets"
        );
        cache.invalidate_tickets();
    }

    Ok(snapshot)
}

/// Raw identity fixture builders shared by this module's tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    /// Identity record publishing `message` as its latest content entry.
    pub fn identity_with_message(message: &str, parent: &str) -> Value {
        json!({
            "identity": {
                "parent": parent,
                "contentmultimap": {
                    "iContentKey111": [
                        { "iNested111": { "objectdata": { "message": message } } }
                    ]
                }
            }
        })
    }

    /// Ledger payload with the fields enumeration depends on.
    pub fn ledger_message(
        phase: &str,
        drawing_block: u64,
        planned: u64,
        main_identity: &str,
        drawing_hash: &str,
    ) -> Value {
        json!({
            "currentPhase": phase,
            "lotteryParameters": {
                "mainVerusID": main_identity,
                "drawingBlock": drawing_block,
                "requiredMatches": 5,
                "rAddressForTickets": "RUnsoldTickets1111111111111111111",
                "claimedTicketsAddress": "RClaimedTickets111111111111111111"
            },
            "ticketSummary": { "planned": planned },
            "drawingResults": { "drawingHash": drawing_hash }
        })
    }
}
