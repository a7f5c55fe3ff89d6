//! Canonical data model for the lottery ledger and its tickets.
//!
//! Every record here is the normalized form of a chain payload. Missing
//! optional wire fields are mapped to defaults (`0` for counts, `""` for
//! strings, `{}` for nested objects) during normalization, so downstream
//! code never branches on absence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A signature/hash pair published by a signing identity.
///
/// Empty strings mean the field was absent from the wire payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureBundle {
    /// Base64 signature produced by the signing identity.
    pub signature: String,

    /// Hex hash the signature attests to.
    pub hash: String,
}

impl SignatureBundle {
    /// Both halves of the bundle are present.
    pub fn is_complete(&self) -> bool {
        !self.signature.is_empty() && !self.hash.is_empty()
    }
}

/// Denormalized view of the ledger's reported top winning ticket.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TopWinningTicket {
    /// Full ticket identity name as published by the ledger.
    pub name: String,

    /// Matches the ledger attributes to this ticket.
    pub matches: u64,

    /// Score the ledger attributes to this ticket.
    pub score: u64,

    /// The `<index>of<planned>` token extracted from the ticket name,
    /// empty when the name does not carry one.
    pub index: String,
}

/// Drawing outcome section of the ledger.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingResults {
    /// Hex-encoded random seed all tickets are scored against.
    /// Empty before the drawing has happened.
    pub drawing_hash: String,

    /// Timestamp the drawing was evaluated at.
    pub drawing_timestamp: String,

    /// Free-form winner status reported by the ledger.
    pub winner_status: String,

    /// Free-form verification status reported by the ledger.
    pub verification_status: String,

    /// How the drawing seed was produced.
    pub drawing_method: String,

    /// Whether the ledger reports its top ticket as authentic.
    pub top_ticket_authentic: bool,

    /// The ledger's reported top winning ticket, when one is named.
    pub top_winning_ticket: Option<TopWinningTicket>,
}

/// Parameters the lottery operator fixed for the current cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LotteryParameters {
    /// Root identity name tickets are derived from.
    pub main_identity: String,

    /// Block height the drawing is evaluated at.
    pub drawing_block: u64,

    /// Block height the cycle started at.
    pub start_block: u64,

    /// Planned drawing height before any grace adjustments.
    pub target_drawing_block: u64,

    /// Minimum matches a ticket needs to qualify as a winner.
    pub required_matches: u64,

    /// Address holding custody of unsold tickets.
    pub r_address_for_tickets: String,

    /// Address winning tickets are sent to once claimed.
    /// Empty when the ledger has not published one.
    pub claimed_tickets_address: String,

    /// Price of a single ticket.
    pub ticket_price: f64,

    /// Payout multiplier applied to the ticket price.
    pub ticket_multiplier: f64,

    /// Floor of the jackpot for this cycle.
    pub jackpot_minimum: f64,

    /// Cap of the jackpot for this cycle.
    pub jackpot_ceiling_cap: f64,

    /// Blocks of grace the operator allows around the drawing.
    pub grace_period: u64,

    /// Confirmations the operator waits for on ticket operations.
    pub confirmations: u64,

    /// Expiry height for payout offers.
    pub payout_offer_expiry: u64,

    /// Offset added to marketplace offer expiries.
    pub offer_expiry_offset: u64,

    /// Percentage of the pot rolled into the next jackpot.
    pub next_jackpot_percent: f64,

    /// Percentage of the pot reserved for operations.
    pub operations_percent: f64,
}

/// Ticket lifecycle counters reported by the ledger.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketSummary {
    /// Number of tickets the operator plans for this cycle.
    pub planned: u64,

    /// Tickets whose identities have been generated.
    pub generated: u64,

    /// Tickets whose identities have been registered on chain.
    pub registered: u64,

    /// Tickets whose data updates have confirmed.
    pub data_updated: u64,

    /// Tickets whose data updates failed.
    pub data_failed: u64,

    /// Tickets currently listed on the marketplace.
    pub on_marketplace: u64,

    /// Tickets reported sold.
    pub sold: u64,

    /// Tickets that passed the operator's verification sweep.
    pub verified: u64,

    /// Raw verification tallies, passed through verbatim.
    pub verification_results: Value,
}

/// Canonical ledger state decoded from the ledger identity's latest payload.
///
/// The typed sections above carry everything the client interprets. The
/// trailing `Value` sections are informational wire content preserved
/// verbatim for display layers; the client never reads into them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Schema version advertised by the ledger payload.
    pub ledger_version: String,

    /// Timestamp of the ledger's last update.
    pub last_updated: String,

    /// Current lifecycle phase, free-form (e.g. "Selling", "Drawing").
    pub current_phase: String,

    /// Operator-assigned identifier of the current drawing.
    pub drawing_id: String,

    /// Fixed parameters of the current cycle.
    pub parameters: LotteryParameters,

    /// Drawing outcome, meaningful once a drawing hash is published.
    pub drawing: DrawingResults,

    /// Ticket lifecycle counters.
    pub tickets: TicketSummary,

    /// Per-phase status detail, passed through verbatim.
    pub phase_status: Value,

    /// Timelock state, passed through verbatim.
    pub timelock_status: Value,

    /// Marketplace listing state, passed through verbatim.
    pub marketplace_status: Value,

    /// Payout state, passed through verbatim.
    pub payout_summary: Value,

    /// Distribution state, passed through verbatim.
    pub distribution_summary: Value,

    /// Operator metrics, passed through verbatim.
    pub operational_metrics: Value,

    /// Security metrics, passed through verbatim.
    pub security_metrics: Value,

    /// Utility identity roster, passed through verbatim.
    pub utilities: Value,

    /// Jackpot figures, passed through verbatim.
    pub financial_summary: Value,
}

/// Normalized content of a single ticket identity's published payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPayload {
    /// Fixed-length hex number the ticket plays against the drawing hash.
    pub playing_number: String,

    /// Transaction id of the ticket identity's registration.
    pub registration_txid: String,

    /// Signature bundle produced by the ticket identity itself.
    pub ticket_validation: SignatureBundle,

    /// Signature bundle produced by the co-signing proofguard identity.
    pub proofguard_acknowledgement: SignatureBundle,
}

/// Custody-derived status flags for one ticket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketStatus {
    /// Custody address differs from both the graveyard and the
    /// unsold-ticket address.
    pub sold: bool,

    /// Custody address equals the network's graveyard address.
    pub discarded: bool,

    /// Custody address equals the ledger's claimed-tickets address.
    pub claimed: bool,
}

/// Match/score pair computed against the drawing hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketScore {
    /// Positions where the ticket nibble equals the drawing nibble.
    pub matches: u64,

    /// Sum of the matched nibbles' hexadecimal values.
    pub score: u64,
}

/// Fully resolved per-ticket state held in the cache.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    /// Identity name the ticket actually resolved under.
    pub name: String,

    /// 1-based position of the ticket within the cycle.
    /// Unique for the lifetime of a single drawing.
    pub index: u64,

    /// Hex playing number, same length as the drawing hash.
    pub playing_number: String,

    /// Transaction id of the ticket's registration.
    pub registration_txid: String,

    /// Custody says the ticket was sold.
    pub sold: bool,

    /// Custody says the ticket was discarded.
    pub discarded: bool,

    /// Custody says the winning ticket was claimed.
    pub claimed: bool,

    /// Matches against the drawing hash; `0` before a drawing exists.
    pub matches: u64,

    /// Score against the drawing hash; `0` before a drawing exists.
    pub score: u64,

    /// Signatures published by the ticket identity.
    pub ticket_validation: SignatureBundle,

    /// Signatures published by the proofguard identity.
    pub proofguard_acknowledgement: SignatureBundle,
}

impl TicketRecord {
    /// Custody-derived flags as a unit.
    pub fn status(&self) -> TicketStatus {
        TicketStatus {
            sold: self.sold,
            discarded: self.discarded,
            claimed: self.claimed,
        }
    }
}

/// Outcome booleans of the four-step authenticity chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationChecks {
    /// The ticket identity signed its own registration txid.
    pub ticket_signed_registration: bool,

    /// The ticket identity signed the published content hash.
    pub ticket_signed_hash: bool,

    /// The proofguard identity co-signed the ticket's signature.
    pub proofguard_signed_ticket_sig: bool,

    /// The proofguard identity signed its acknowledgement hash.
    pub proofguard_signed_hash: bool,
}

impl VerificationChecks {
    /// Every check in the chain passed.
    pub fn all_passed(&self) -> bool {
        self.ticket_signed_registration
            && self.ticket_signed_hash
            && self.proofguard_signed_ticket_sig
            && self.proofguard_signed_hash
    }
}

/// Result of a full verification pass over one ticket.
///
/// `success` is only true when all four checks passed; the error list
/// names each check that could not be completed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Logical AND of the four checks.
    pub success: bool,

    /// Individual check outcomes, `false` for checks that errored.
    pub checks: VerificationChecks,

    /// Human-readable descriptions of every failure encountered.
    pub errors: Vec<String>,
}

/// A ticket index enumeration could not resolve, with the reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedTicket {
    /// 1-based index that was skipped.
    pub index: u64,

    /// Why the index produced no record.
    pub reason: String,
}

/// Outcome of a full enumeration pass.
///
/// Carrying the skips separately lets callers distinguish "no tickets
/// planned" from "nine planned, six failed to resolve".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumerationReport {
    /// Resolved tickets in ranked order.
    pub tickets: Vec<TicketRecord>,

    /// Indices that produced no record, with reasons.
    pub skipped: Vec<SkippedTicket>,
}

/// Aggregate statistics over a set of scored tickets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringSummary {
    pub total_tickets: u64,
    pub sold_tickets: u64,
    pub unsold_tickets: u64,
    pub highest_matches: u64,
    pub highest_score: u64,

    /// Tickets meeting the required-matches threshold.
    pub qualified_winners: u64,

    /// Qualified tickets that were also sold.
    pub sold_qualified_winners: u64,
}
