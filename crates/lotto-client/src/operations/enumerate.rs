//! Full enumeration of a cycle's tickets.

use tracing::warn;

use crate::cache::LottoCache;
use crate::content;
use crate::error::ClientError;
use crate::rpc::ChainRpc;
use crate::scoring::{compute_ticket_score, rank_tickets};
use crate::state::{EnumerationReport, SkippedTicket, TicketRecord, TicketScore};
use crate::status::{classify, Network};

use super::fetch_ticket::{generate_ticket_name, process_fetch_ticket, FallbackParams};

/// Resolve, classify, and score every planned ticket.
///
/// Indices `1..=planned` are fetched strictly in ascending order; each
/// index's full resolve-classify-score-cache sequence completes before the
/// next begins. The progress callback fires once per index after its
/// attempt, success or not. Per-ticket failures are recorded and skipped —
/// enumeration never aborts early, and every resolved ticket is cached
/// individually so partial results are visible before the pass completes.
/// After the pass the resolved set is ranked as a batch and replaces the
/// cache's ranking slot.
///
/// Fails only when no ledger snapshot has been cached yet.
pub async fn process_enumerate_tickets(
    rpc: &dyn ChainRpc,
    cache: &LottoCache,
    chain: Option<&str>,
    mut progress: impl FnMut(u64, u64),
) -> Result<EnumerationReport, ClientError> {
    let snapshot = cache.ledger_snapshot().ok_or(ClientError::LedgerNotLoaded)?;
    let params = snapshot.parameters;
    let planned = snapshot.tickets.planned;

    let drawing_hash = snapshot.drawing.drawing_hash;
    // Tickets can be enumerated before a drawing exists; they score zero.
    let has_drawing_hash = !drawing_hash.trim().is_empty();

    let network = Network::from_chain(chain);
    let mut tickets = Vec::new();
    let mut skipped = Vec::new();

    for index in 1..=planned {
        let name = generate_ticket_name(
            params.drawing_block,
            index,
            planned,
            &params.main_identity,
        );
        let fallback = FallbackParams {
            main_identity: &params.main_identity,
            index,
            planned,
            drawing_block: params.drawing_block,
        };

        let resolved = process_fetch_ticket(rpc, &name, None, chain, Some(fallback)).await;
        progress(index, planned);

        let resolved = match resolved {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!(index, %name, error = %err, "skipping unresolved ticket");
                skipped.push(SkippedTicket {
                    index,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let status = classify(
            content::primary_address(&resolved.identity),
            network,
            &params.r_address_for_tickets,
            &params.claimed_tickets_address,
        );
        let score = if has_drawing_hash {
            compute_ticket_score(&resolved.payload.playing_number, &drawing_hash)
        } else {
            TicketScore::default()
        };

        let record = TicketRecord {
            name: resolved.name,
            index,
            playing_number: resolved.payload.playing_number,
            registration_txid: resolved.payload.registration_txid,
            sold: status.sold,
            discarded: status.discarded,
            claimed: status.claimed,
            matches: score.matches,
            score: score.score,
            ticket_validation: resolved.payload.ticket_validation,
            proofguard_acknowledgement: resolved.payload.proofguard_acknowledgement,
        };

        cache.set_ticket(record.clone());
        tickets.push(record);
    }

    let ranked = rank_tickets(tickets);
    cache.set_ranked_tickets(ranked.clone());

    Ok(EnumerationReport {
        tickets: ranked,
        skipped,
    })
}
