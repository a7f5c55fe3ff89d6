//! Four-step ticket authenticity verification.
//!
//! Authenticity is proven without trusting any single signer: the ticket
//! identity attests to its own registration and content hash, and the
//! proofguard identity counter-signs the ticket's signature. The four
//! checks are independent — a failing or erroring check never prevents
//! the others from running, so partial diagnostics are always available.

use tracing::debug;

use crate::rpc::ChainRpc;
use crate::state::{TicketRecord, VerificationResult};

/// Derive the proofguard identity name for a lottery's main identity:
/// `"proofguard.<trimmedMainIdentity>@"`.
pub fn proofguard_identity(main_identity: &str) -> String {
    let trimmed = main_identity.strip_suffix('@').unwrap_or(main_identity);
    format!("proofguard.{trimmed}@")
}

/// Run the full signature chain for one ticket.
///
/// Checks, all attempted unconditionally:
/// 1. The ticket identity signed its registration txid.
/// 2. The ticket identity signed the published content hash.
/// 3. The proofguard identity signed the ticket's signature.
/// 4. The proofguard identity signed its acknowledgement hash.
///
/// Preconditions: both signature bundles complete and a non-empty
/// registration txid. When they fail the result carries a single
/// explanatory error and no remote call is made. This function never
/// fails outward; remote errors become entries of the result's error
/// list with the corresponding check left `false`.
pub async fn process_verify_ticket(
    rpc: &dyn ChainRpc,
    ticket: &TicketRecord,
    main_identity: &str,
    chain: Option<&str>,
) -> VerificationResult {
    let mut result = VerificationResult::default();

    let validation = &ticket.ticket_validation;
    let acknowledgement = &ticket.proofguard_acknowledgement;

    if !validation.is_complete() || !acknowledgement.is_complete() {
        result.errors.push("Incomplete signature data".to_owned());
        return result;
    }
    if ticket.registration_txid.is_empty() {
        result.errors.push("Missing registration txid".to_owned());
        return result;
    }

    let proofguard = proofguard_identity(main_identity);
    debug!(ticket = %ticket.name, %proofguard, "verifying ticket signature chain");

    match rpc
        .verify_message(
            &ticket.name,
            &validation.signature,
            &ticket.registration_txid,
            false,
            chain,
        )
        .await
    {
        Ok(passed) => result.checks.ticket_signed_registration = passed,
        Err(err) => result.errors.push(format!("Check 1 failed: {err}")),
    }

    match rpc
        .verify_hash(
            &ticket.name,
            &validation.signature,
            &validation.hash,
            false,
            chain,
        )
        .await
    {
        Ok(passed) => result.checks.ticket_signed_hash = passed,
        Err(err) => result.errors.push(format!("Check 2 failed: {err}")),
    }

    match rpc
        .verify_message(
            &proofguard,
            &acknowledgement.signature,
            &validation.signature,
            false,
            chain,
        )
        .await
    {
        Ok(passed) => result.checks.proofguard_signed_ticket_sig = passed,
        Err(err) => result.errors.push(format!("Check 3 failed: {err}")),
    }

    match rpc
        .verify_hash(
            &proofguard,
            &acknowledgement.signature,
            &acknowledgement.hash,
            false,
            chain,
        )
        .await
    {
        Ok(passed) => result.checks.proofguard_signed_hash = passed,
        Err(err) => result.errors.push(format!("Check 4 failed: {err}")),
    }

    result.success = result.checks.all_passed();
    result
}
