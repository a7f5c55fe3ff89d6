//! Schema normalization for ledger and ticket payloads.
//!
//! Chain payloads written by different operator tool versions carry the
//! same fields under camelCase, PascalCase, or snake_case keys. Each
//! canonical field declares its accepted aliases as an ordered table and
//! the first defined value wins, so the alias policy stays auditable in
//! one place instead of being spread over conditional chains.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::content::extract_multimap_message;
use crate::state::{
    DrawingResults, LedgerSnapshot, LotteryParameters, SignatureBundle, TicketPayload,
    TicketSummary, TopWinningTicket,
};

// Ledger top-level fields.
const LEDGER_VERSION: &[&str] = &["ledgerVersion", "LedgerVersion", "ledger_version"];
const LAST_UPDATED: &[&str] = &["lastUpdated", "LastUpdated", "last_updated"];
const CURRENT_PHASE: &[&str] = &["currentPhase", "CurrentPhase", "current_phase"];
const PHASE_STATUS: &[&str] = &["phaseStatus", "PhaseStatus", "phase_status"];
const DRAWING_ID: &[&str] = &["drawingId", "DrawingId", "drawing_id"];
const UTILITIES: &[&str] = &["utilities", "Utilities"];
const FINANCIAL_SUMMARY: &[&str] = &["financialSummary", "FinancialSummary", "financial_summary"];

// Ledger sections.
const LOTTERY_PARAMETERS: &[&str] =
    &["lotteryParameters", "LotteryParameters", "lottery_parameters"];
const TICKET_SUMMARY: &[&str] = &["ticketSummary", "TicketSummary", "ticket_summary"];
const DRAWING_RESULTS: &[&str] = &["drawingResults", "DrawingResults", "drawing_results"];
const TIMELOCK_STATUS: &[&str] = &["timelockStatus", "TimelockStatus", "timelock_status"];
const MARKETPLACE_STATUS: &[&str] =
    &["marketplaceStatus", "MarketplaceStatus", "marketplace_status"];
const PAYOUT_SUMMARY: &[&str] = &["payoutSummary", "PayoutSummary", "payout_summary"];
const DISTRIBUTION_SUMMARY: &[&str] =
    &["distributionSummary", "DistributionSummary", "distribution_summary"];
const OPERATIONAL_METRICS: &[&str] =
    &["operationalMetrics", "OperationalMetrics", "operational_metrics"];
const SECURITY_METRICS: &[&str] = &["securityMetrics", "SecurityMetrics", "security_metrics"];

// Drawing-results fields.
const DRAWING_HASH: &[&str] = &["drawingHash", "DrawingHash", "drawing_hash"];
const DRAWING_TIMESTAMP: &[&str] =
    &["drawingTimestamp", "DrawingTimestamp", "drawing_timestamp"];
const WINNER_STATUS: &[&str] = &["winnerStatus", "WinnerStatus", "winner_status"];
const VERIFICATION_STATUS: &[&str] =
    &["verificationStatus", "VerificationStatus", "verification_status"];
const DRAWING_METHOD: &[&str] = &["drawingMethod", "DrawingMethod", "drawing_method"];
const TOP_TICKET_AUTHENTIC: &[&str] =
    &["topTicketAuthentic", "TopTicketAuthentic", "top_ticket_authentic"];
const TOP_WINNING_TICKET: &[&str] =
    &["topWinningTicket", "TopWinningTicket", "top_winning_ticket"];
const TOP_TICKET_MATCHES: &[&str] =
    &["topTicketMatches", "TopTicketMatches", "top_ticket_matches"];
const TOP_TICKET_SCORE: &[&str] = &["topTicketScore", "TopTicketScore", "top_ticket_score"];

// Lottery-parameters fields. The main identity accumulated two naming
// generations, so its table is longer than the others.
const MAIN_IDENTITY: &[&str] = &[
    "mainVerusID",
    "MainVerusID",
    "main_verus_id",
    "mainLotteryID",
    "MainLotteryID",
];
const DRAWING_BLOCK: &[&str] = &["drawingBlock", "DrawingBlock", "drawing_block"];
const START_BLOCK: &[&str] = &["startBlock", "StartBlock", "start_block"];
const TARGET_DRAWING_BLOCK: &[&str] =
    &["targetDrawingBlock", "TargetDrawingBlock", "target_drawing_block"];
const REQUIRED_MATCHES: &[&str] = &["requiredMatches", "RequiredMatches", "required_matches"];
const R_ADDRESS_FOR_TICKETS: &[&str] =
    &["rAddressForTickets", "RAddressForTickets", "r_address_for_tickets"];
const TICKET_PRICE: &[&str] = &["ticketPrice", "TicketPrice", "ticket_price"];
const TICKET_MULTIPLIER: &[&str] =
    &["ticketMultiplier", "TicketMultiplier", "ticket_multiplier"];
const JACKPOT_MINIMUM: &[&str] = &["jackpotMinimum", "JackpotMinimum", "jackpot_minimum"];
const JACKPOT_CEILING_CAP: &[&str] =
    &["jackpotCeilingCap", "JackpotCeilingCap", "jackpot_ceiling_cap"];
const GRACE_PERIOD: &[&str] = &["gracePeriod", "GracePeriod", "grace_period"];
const CONFIRMATIONS: &[&str] = &["confirmations", "Confirmations"];
const PAYOUT_OFFER_EXPIRY: &[&str] =
    &["payoutOfferExpiry", "PayoutOfferExpiry", "payout_offer_expiry"];
const CLAIMED_TICKETS_ADDRESS: &[&str] =
    &["claimedTicketsAddress", "ClaimedTicketsAddress", "claimed_tickets_address"];
const OFFER_EXPIRY_OFFSET: &[&str] =
    &["offerExpiryOffset", "OfferExpiryOffset", "offer_expiry_offset"];
const NEXT_JACKPOT_PERCENT: &[&str] =
    &["nextJackpotPercent", "NextJackpotPercent", "next_jackpot_percent"];
const OPERATIONS_PERCENT: &[&str] =
    &["operationsPercent", "OperationsPercent", "operations_percent"];

// Ticket-summary fields.
const PLANNED: &[&str] = &["planned", "Planned"];
const GENERATED: &[&str] = &["generated", "Generated"];
const REGISTERED: &[&str] = &["registered", "Registered"];
const DATA_UPDATED: &[&str] = &["dataUpdated", "DataUpdated", "data_updated"];
const DATA_FAILED: &[&str] = &["dataFailed", "DataFailed", "data_failed"];
const ON_MARKETPLACE: &[&str] = &["onMarketplace", "OnMarketplace", "on_marketplace"];
const SOLD: &[&str] = &["sold", "Sold"];
const VERIFIED: &[&str] = &["verified", "Verified"];
const VERIFICATION_RESULTS: &[&str] =
    &["verificationResults", "VerificationResults", "verification_results"];

// Ticket payload fields. Ticket tooling wrote snake_case first.
const PLAYING_NUMBER: &[&str] = &["playing_number", "PlayingNumber", "playingnumber"];
const REGISTRATION_TXID: &[&str] =
    &["registration_txid", "RegistrationTxID", "registrationTxid"];
const TICKET_VALIDATION: &[&str] = &["ticket_validation", "TicketValidation"];
const PROOFGUARD_ACKNOWLEDGEMENT: &[&str] =
    &["proofguard_acknowledgement", "ProofguardAcknowledgement"];
const SIGNED_BY_TICKET_SIGNATURE: &[&str] =
    &["signed_by_ticket_signature", "SignedByTicketSignature"];
const SIGNED_BY_TICKET_HASH: &[&str] = &["signed_by_ticket_hash", "SignedByTicketHash"];
const SIGNED_BY_PROOFGUARD_SIGNATURE: &[&str] =
    &["signed_by_proofguard_signature", "SignedByProofguardSignature"];
const SIGNED_BY_PROOFGUARD_HASH: &[&str] =
    &["signed_by_proofguard_hash", "SignedByProofguardHash"];

/// Matches `<digits>_<digits>of<digits>` anywhere in a ticket name and
/// captures the `<index>of<planned>` token.
static TICKET_INDEX_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+_(\d+of\d+)").expect("index token pattern"));

/// First defined value among the aliases, in table order. JSON `null` is
/// treated as absent.
fn first_alias<'a>(obj: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .find_map(|name| obj.get(name))
        .filter(|value| !value.is_null())
}

fn string_field(obj: &Value, aliases: &[&str]) -> String {
    first_alias(obj, aliases)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

fn u64_field(obj: &Value, aliases: &[&str]) -> u64 {
    match first_alias(obj, aliases) {
        Some(value) => value
            .as_u64()
            .or_else(|| value.as_f64().map(|f| f as u64))
            .unwrap_or(0),
        None => 0,
    }
}

fn f64_field(obj: &Value, aliases: &[&str]) -> f64 {
    first_alias(obj, aliases)
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

fn bool_field(obj: &Value, aliases: &[&str]) -> bool {
    first_alias(obj, aliases)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Whole wire value under the first defined alias, `{}` when absent.
fn value_field(obj: &Value, aliases: &[&str]) -> Value {
    first_alias(obj, aliases)
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()))
}

/// Parse a ledger message string into a canonical snapshot.
///
/// Malformed JSON is recovered locally and surfaces as `None`; a decoded
/// object always normalizes, with absent fields taking their documented
/// defaults.
pub fn parse_ledger_message(message: &str) -> Option<LedgerSnapshot> {
    let data: Value = serde_json::from_str(message).ok()?;

    let params = value_field(&data, LOTTERY_PARAMETERS);
    let summary = value_field(&data, TICKET_SUMMARY);
    let drawing = value_field(&data, DRAWING_RESULTS);

    let current_phase = {
        let phase = string_field(&data, CURRENT_PHASE);
        if phase.is_empty() {
            "Unknown".to_owned()
        } else {
            phase
        }
    };

    Some(LedgerSnapshot {
        ledger_version: string_field(&data, LEDGER_VERSION),
        last_updated: string_field(&data, LAST_UPDATED),
        current_phase,
        drawing_id: string_field(&data, DRAWING_ID),
        parameters: LotteryParameters {
            main_identity: string_field(&params, MAIN_IDENTITY),
            drawing_block: u64_field(&params, DRAWING_BLOCK),
            start_block: u64_field(&params, START_BLOCK),
            target_drawing_block: u64_field(&params, TARGET_DRAWING_BLOCK),
            required_matches: u64_field(&params, REQUIRED_MATCHES),
            r_address_for_tickets: string_field(&params, R_ADDRESS_FOR_TICKETS),
            claimed_tickets_address: string_field(&params, CLAIMED_TICKETS_ADDRESS),
            ticket_price: f64_field(&params, TICKET_PRICE),
            ticket_multiplier: f64_field(&params, TICKET_MULTIPLIER),
            jackpot_minimum: f64_field(&params, JACKPOT_MINIMUM),
            jackpot_ceiling_cap: f64_field(&params, JACKPOT_CEILING_CAP),
            grace_period: u64_field(&params, GRACE_PERIOD),
            confirmations: u64_field(&params, CONFIRMATIONS),
            payout_offer_expiry: u64_field(&params, PAYOUT_OFFER_EXPIRY),
            offer_expiry_offset: u64_field(&params, OFFER_EXPIRY_OFFSET),
            next_jackpot_percent: f64_field(&params, NEXT_JACKPOT_PERCENT),
            operations_percent: f64_field(&params, OPERATIONS_PERCENT),
        },
        drawing: DrawingResults {
            drawing_hash: string_field(&drawing, DRAWING_HASH),
            drawing_timestamp: string_field(&drawing, DRAWING_TIMESTAMP),
            winner_status: string_field(&drawing, WINNER_STATUS),
            verification_status: string_field(&drawing, VERIFICATION_STATUS),
            drawing_method: string_field(&drawing, DRAWING_METHOD),
            top_ticket_authentic: bool_field(&drawing, TOP_TICKET_AUTHENTIC),
            top_winning_ticket: top_winning_ticket(&drawing),
        },
        tickets: TicketSummary {
            planned: u64_field(&summary, PLANNED),
            generated: u64_field(&summary, GENERATED),
            registered: u64_field(&summary, REGISTERED),
            data_updated: u64_field(&summary, DATA_UPDATED),
            data_failed: u64_field(&summary, DATA_FAILED),
            on_marketplace: u64_field(&summary, ON_MARKETPLACE),
            sold: u64_field(&summary, SOLD),
            verified: u64_field(&summary, VERIFIED),
            verification_results: value_field(&summary, VERIFICATION_RESULTS),
        },
        phase_status: value_field(&data, PHASE_STATUS),
        timelock_status: value_field(&data, TIMELOCK_STATUS),
        marketplace_status: value_field(&data, MARKETPLACE_STATUS),
        payout_summary: value_field(&data, PAYOUT_SUMMARY),
        distribution_summary: value_field(&data, DISTRIBUTION_SUMMARY),
        operational_metrics: value_field(&data, OPERATIONAL_METRICS),
        security_metrics: value_field(&data, SECURITY_METRICS),
        utilities: value_field(&data, UTILITIES),
        financial_summary: value_field(&data, FINANCIAL_SUMMARY),
    })
}

/// Rebuild the denormalized top-winning-ticket record the ledger spreads
/// over three scalar fields. The index token is recovered from the ticket
/// name, e.g. `"773160_6of9.lottery1@"` carries `"6of9"`.
fn top_winning_ticket(drawing: &Value) -> Option<TopWinningTicket> {
    let name = string_field(drawing, TOP_WINNING_TICKET);
    if name.is_empty() {
        return None;
    }

    let index = TICKET_INDEX_TOKEN
        .captures(&name)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str().to_owned())
        .unwrap_or_default();

    Some(TopWinningTicket {
        matches: u64_field(drawing, TOP_TICKET_MATCHES),
        score: u64_field(drawing, TOP_TICKET_SCORE),
        name,
        index,
    })
}

/// Parse a ticket message string into its canonical payload.
pub fn parse_ticket_message(message: &str) -> Option<TicketPayload> {
    let data: Value = serde_json::from_str(message).ok()?;

    let validation = value_field(&data, TICKET_VALIDATION);
    let acknowledgement = value_field(&data, PROOFGUARD_ACKNOWLEDGEMENT);

    Some(TicketPayload {
        playing_number: string_field(&data, PLAYING_NUMBER),
        registration_txid: string_field(&data, REGISTRATION_TXID),
        ticket_validation: SignatureBundle {
            signature: string_field(&validation, SIGNED_BY_TICKET_SIGNATURE),
            hash: string_field(&validation, SIGNED_BY_TICKET_HASH),
        },
        proofguard_acknowledgement: SignatureBundle {
            signature: string_field(&acknowledgement, SIGNED_BY_PROOFGUARD_SIGNATURE),
            hash: string_field(&acknowledgement, SIGNED_BY_PROOFGUARD_HASH),
        },
    })
}

/// Extract and normalize a ledger snapshot straight from an identity record.
pub fn parse_ledger_data(identity: &Value) -> Option<LedgerSnapshot> {
    parse_ledger_message(extract_multimap_message(identity)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_json_yields_none() {
        assert!(parse_ledger_message("{not json").is_none());
        assert!(parse_ticket_message("{not json").is_none());
    }

    #[test]
    fn camel_case_wins_over_other_casings() {
        let message = json!({
            "currentPhase": "Selling",
            "CurrentPhase": "Drawing",
            "current_phase": "Complete"
        })
        .to_string();

        let snapshot = parse_ledger_message(&message).unwrap();
        assert_eq!(snapshot.current_phase, "Selling");
    }

    #[test]
    fn snake_case_is_accepted_when_others_are_absent() {
        let message = json!({
            "current_phase": "Selling",
            "lottery_parameters": {
                "main_verus_id": "lottery1@",
                "drawing_block": 773160,
                "required_matches": 5,
                "r_address_for_tickets": "RTickets111"
            },
            "ticket_summary": { "planned": 9 }
        })
        .to_string();

        let snapshot = parse_ledger_message(&message).unwrap();
        assert_eq!(snapshot.current_phase, "Selling");
        assert_eq!(snapshot.parameters.main_identity, "lottery1@");
        assert_eq!(snapshot.parameters.drawing_block, 773160);
        assert_eq!(snapshot.parameters.required_matches, 5);
        assert_eq!(snapshot.tickets.planned, 9);
    }

    #[test]
    fn missing_fields_take_documented_defaults() {
        let snapshot = parse_ledger_message("{}").unwrap();
        assert_eq!(snapshot.current_phase, "Unknown");
        assert_eq!(snapshot.parameters.drawing_block, 0);
        assert_eq!(snapshot.parameters.main_identity, "");
        assert_eq!(snapshot.tickets.planned, 0);
        assert_eq!(snapshot.drawing.drawing_hash, "");
        assert!(snapshot.drawing.top_winning_ticket.is_none());
        assert_eq!(snapshot.phase_status, json!({}));
    }

    #[test]
    fn null_fields_are_treated_as_absent() {
        let message = json!({
            "currentPhase": null,
            "lotteryParameters": null
        })
        .to_string();

        let snapshot = parse_ledger_message(&message).unwrap();
        assert_eq!(snapshot.current_phase, "Unknown");
        assert_eq!(snapshot.parameters.drawing_block, 0);
    }

    #[test]
    fn top_winning_ticket_index_is_recovered_from_name() {
        let message = json!({
            "drawingResults": {
                "topWinningTicket": "773160_6of9.lottery1@",
                "topTicketMatches": 6,
                "topTicketScore": 41
            }
        })
        .to_string();

        let snapshot = parse_ledger_message(&message).unwrap();
        let top = snapshot.drawing.top_winning_ticket.unwrap();
        assert_eq!(top.name, "773160_6of9.lottery1@");
        assert_eq!(top.matches, 6);
        assert_eq!(top.score, 41);
        assert_eq!(top.index, "6of9");
    }

    #[test]
    fn top_winning_ticket_without_index_token_keeps_empty_index() {
        let message = json!({
            "drawingResults": { "topWinningTicket": "oddly-named@" }
        })
        .to_string();

        let snapshot = parse_ledger_message(&message).unwrap();
        let top = snapshot.drawing.top_winning_ticket.unwrap();
        assert_eq!(top.index, "");
    }

    #[test]
    fn ticket_payload_probes_both_naming_generations() {
        let snake = json!({
            "playing_number": "abc123",
            "registration_txid": "deadbeef",
            "ticket_validation": {
                "signed_by_ticket_signature": "sig1",
                "signed_by_ticket_hash": "hash1"
            },
            "proofguard_acknowledgement": {
                "signed_by_proofguard_signature": "sig2",
                "signed_by_proofguard_hash": "hash2"
            }
        })
        .to_string();

        let pascal = json!({
            "PlayingNumber": "abc123",
            "RegistrationTxID": "deadbeef",
            "TicketValidation": {
                "SignedByTicketSignature": "sig1",
                "SignedByTicketHash": "hash1"
            },
            "ProofguardAcknowledgement": {
                "SignedByProofguardSignature": "sig2",
                "SignedByProofguardHash": "hash2"
            }
        })
        .to_string();

        let from_snake = parse_ticket_message(&snake).unwrap();
        let from_pascal = parse_ticket_message(&pascal).unwrap();
        assert_eq!(from_snake, from_pascal);
        assert_eq!(from_snake.playing_number, "abc123");
        assert_eq!(from_snake.ticket_validation.signature, "sig1");
        assert_eq!(from_snake.proofguard_acknowledgement.hash, "hash2");
        assert!(from_snake.ticket_validation.is_complete());
    }

    #[test]
    fn absent_signature_bundles_default_to_empty() {
        let payload = parse_ticket_message("{}").unwrap();
        assert_eq!(payload.playing_number, "");
        assert!(!payload.ticket_validation.is_complete());
        assert!(!payload.proofguard_acknowledgement.is_complete());
    }

    #[test]
    fn informational_sections_pass_through_verbatim() {
        let message = json!({
            "operationalMetrics": { "retryOperations": { "totalRetries": 3 } },
            "financialSummary": { "jackpotCurrent": 1250.5 }
        })
        .to_string();

        let snapshot = parse_ledger_message(&message).unwrap();
        assert_eq!(
            snapshot.operational_metrics,
            json!({ "retryOperations": { "totalRetries": 3 } })
        );
        assert_eq!(snapshot.financial_summary, json!({ "jackpotCurrent": 1250.5 }));
    }
}
