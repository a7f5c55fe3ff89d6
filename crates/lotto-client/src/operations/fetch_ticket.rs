//! Deterministic ticket resolution.
//!
//! Ticket identities are minted under a name derived from the drawing
//! block, the ticket's position, and the lottery's main identity. Name
//! minting upstream sometimes appends disambiguating digits to the parent
//! identity that are absent when the parent is queried later, so a failed
//! primary fetch degrades into a bounded trial-and-error ladder over
//! shortened parent names.

use serde_json::Value;
use tracing::debug;

use crate::constants::{TICKET_FINALIZED_DATA_KEY, TICKET_NAME_FALLBACK_ATTEMPTS};
use crate::content;
use crate::error::TicketFetchError;
use crate::normalize;
use crate::rpc::ChainRpc;
use crate::state::TicketPayload;

/// Parameters needed to rebuild candidate names for the fallback ladder.
#[derive(Clone, Copy, Debug)]
pub struct FallbackParams<'a> {
    /// Main lottery identity as published by the ledger.
    pub main_identity: &'a str,

    /// 1-based ticket position.
    pub index: u64,

    /// Planned ticket count for the cycle.
    pub planned: u64,

    /// Drawing block of the cycle.
    pub drawing_block: u64,
}

/// A ticket that resolved on chain.
#[derive(Clone, Debug)]
pub struct ResolvedTicket {
    /// Name the ticket actually resolved under; differs from the primary
    /// deterministic name when a fallback candidate succeeded.
    pub name: String,

    /// Normalized published payload.
    pub payload: TicketPayload,

    /// Current identity state, carrying the custody address.
    pub identity: Value,
}

/// Build the deterministic ticket identity name:
/// `"<drawingBlock>_<index>of<planned>.<trimmedMainIdentity>@"`, where the
/// trimmed main identity drops one trailing `@`.
pub fn generate_ticket_name(
    drawing_block: u64,
    index: u64,
    planned: u64,
    main_identity: &str,
) -> String {
    let trimmed = main_identity.strip_suffix('@').unwrap_or(main_identity);
    format!("{drawing_block}_{index}of{planned}.{trimmed}@")
}

/// Fetch one ticket's published payload and current identity state.
///
/// The primary name is tried first. When it fails — not-found, transport
/// error, missing message, or malformed payload — and fallback parameters
/// were supplied, up to three shortened-identity candidates are tried,
/// each stripping one more trailing character (assumed to be a minting
/// digit) from the trimmed main identity. The first success wins; when
/// every candidate fails the primary attempt's error is reported.
pub async fn process_fetch_ticket(
    rpc: &dyn ChainRpc,
    ticket_name: &str,
    vdxf_key: Option<&str>,
    chain: Option<&str>,
    fallback: Option<FallbackParams<'_>>,
) -> Result<ResolvedTicket, TicketFetchError> {
    let key = vdxf_key.unwrap_or(TICKET_FINALIZED_DATA_KEY);

    let primary_error = match try_fetch(rpc, ticket_name, key, chain).await {
        Ok(ticket) => return Ok(ticket),
        Err(err) => err,
    };

    let Some(params) = fallback else {
        return Err(primary_error);
    };

    let mut trimmed = params
        .main_identity
        .strip_suffix('@')
        .unwrap_or(params.main_identity)
        .to_owned();

    for attempt in 1..=TICKET_NAME_FALLBACK_ATTEMPTS {
        if trimmed.pop().is_none() {
            break;
        }
        let candidate = generate_ticket_name(
            params.drawing_block,
            params.index,
            params.planned,
            &format!("{trimmed}@"),
        );
        debug!(%candidate, attempt, "retrying ticket fetch under shortened parent name");

        match try_fetch(rpc, &candidate, key, chain).await {
            Ok(ticket) => return Ok(ticket),
            Err(err) => {
                debug!(%candidate, error = %err, "fallback candidate failed");
            }
        }
    }

    Err(primary_error)
}

async fn try_fetch(
    rpc: &dyn ChainRpc,
    name: &str,
    vdxf_key: &str,
    chain: Option<&str>,
) -> Result<ResolvedTicket, TicketFetchError> {
    let content = rpc
        .get_identity_content(name, None, None, false, vdxf_key, chain)
        .await?;

    let message =
        content::extract_multimap_message(&content).ok_or(TicketFetchError::MissingMessage)?;
    let payload =
        normalize::parse_ticket_message(message).ok_or(TicketFetchError::MalformedPayload)?;

    // Current identity state is fetched separately: the content call
    // returns history, not the present custody address.
    let identity = rpc.get_identity(name, chain).await?;

    Ok(ResolvedTicket {
        name: name.to_owned(),
        payload,
        identity,
    })
}
