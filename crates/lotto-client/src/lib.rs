//! Client-side state machine for a lottery run over a name-based
//! identity chain.
//!
//! Tickets and the lottery ledger are published as versioned JSON
//! payloads inside identity content multimaps; the chain itself is the
//! storage engine. This crate makes that data usable: it extracts and
//! normalizes the payloads, resolves deterministic ticket names with a
//! bounded fallback, scores and ranks tickets against the drawing hash,
//! classifies custody status, caches everything in memory keyed to
//! observed chain state, and proves ticket authenticity through a
//! four-step signature chain.
//!
//! [`LottoClient`] is the entry point; each operation delegates to a
//! handler in [`operations`]. All remote access goes through the
//! [`rpc::ChainRpc`] collaborator, so the state machine can be driven
//! against any daemon implementation.

pub mod cache;
pub mod constants;
pub mod content;
pub mod error;
pub mod normalize;
pub mod operations;
pub mod rpc;
pub mod scoring;
pub mod state;
pub mod status;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use cache::{CacheState, LedgerSlot, LottoCache};
pub use error::{ClientError, TicketFetchError};
pub use operations::fetch_ticket::{generate_ticket_name, FallbackParams, ResolvedTicket};
pub use operations::poll::PollerHandle;
pub use operations::verify::proofguard_identity;
pub use rpc::{ChainRpc, HttpRpcClient, RpcCredentials, RpcError};
pub use state::{
    EnumerationReport, LedgerSnapshot, TicketRecord, VerificationResult,
};
pub use status::Network;

use operations::{enumerate, fetch_ledger, fetch_ticket, poll, utility, verify};

/// Client settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Identity name the lottery ledger is published under.
    pub ledger_identity: String,

    /// Default chain selector; `None` targets the default network.
    pub chain: Option<String>,

    /// Period between block-height polls.
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ledger_identity: constants::DEFAULT_LEDGER_IDENTITY.to_owned(),
            chain: None,
            poll_interval: constants::DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Facade over the lottery state machine.
///
/// Owns the cache and the remote-procedure collaborator; every public
/// operation is a thin delegation to its handler.
pub struct LottoClient {
    rpc: Arc<dyn ChainRpc>,
    cache: Arc<LottoCache>,
    config: ClientConfig,
}

impl LottoClient {
    pub fn new(rpc: Arc<dyn ChainRpc>, config: ClientConfig) -> Self {
        Self {
            rpc,
            cache: Arc::new(LottoCache::new()),
            config,
        }
    }

    /// Build a client speaking to a daemon endpoint over HTTP.
    pub fn from_credentials(
        credentials: RpcCredentials,
        config: ClientConfig,
    ) -> Result<Self, RpcError> {
        let client = HttpRpcClient::new(credentials)?;
        Ok(Self::new(Arc::new(client), config))
    }

    /// Shared view of the cache.
    pub fn cache(&self) -> &LottoCache {
        &self.cache
    }

    /// Explicit chain selector, falling back to the configured default;
    /// always lower-cased before dispatch.
    fn effective_chain(&self, chain: Option<&str>) -> Option<String> {
        chain
            .or(self.config.chain.as_deref())
            .map(|name| name.to_ascii_lowercase())
    }

    /// Fetch and cache the current ledger snapshot.
    pub async fn fetch_ledger(&self, chain: Option<&str>) -> Result<LedgerSnapshot, ClientError> {
        let chain = self.effective_chain(chain);
        fetch_ledger::process_fetch_ledger(
            self.rpc.as_ref(),
            &self.cache,
            &self.config.ledger_identity,
            chain.as_deref(),
        )
        .await
    }

    /// Fetch one ticket by name, optionally degrading through shortened
    /// parent names when `fallback` is supplied. The content lookup reads
    /// the finalized-data key unless `vdxf_key` selects another entry.
    pub async fn fetch_ticket(
        &self,
        ticket_name: &str,
        vdxf_key: Option<&str>,
        chain: Option<&str>,
        fallback: Option<FallbackParams<'_>>,
    ) -> Result<ResolvedTicket, TicketFetchError> {
        let chain = self.effective_chain(chain);
        fetch_ticket::process_fetch_ticket(
            self.rpc.as_ref(),
            ticket_name,
            vdxf_key,
            chain.as_deref(),
            fallback,
        )
        .await
    }

    /// Resolve, classify, score, and rank every planned ticket.
    pub async fn enumerate_tickets(
        &self,
        chain: Option<&str>,
    ) -> Result<EnumerationReport, ClientError> {
        self.enumerate_tickets_with_progress(chain, |_, _| {}).await
    }

    /// [`Self::enumerate_tickets`] with a `(current, total)` progress
    /// callback fired after every index.
    pub async fn enumerate_tickets_with_progress(
        &self,
        chain: Option<&str>,
        progress: impl FnMut(u64, u64),
    ) -> Result<EnumerationReport, ClientError> {
        let chain = self.effective_chain(chain);
        enumerate::process_enumerate_tickets(
            self.rpc.as_ref(),
            &self.cache,
            chain.as_deref(),
            progress,
        )
        .await
    }

    /// Poll the chain height once, refreshing the ledger when it advanced.
    pub async fn check_for_updates(&self, chain: Option<&str>) -> Result<bool, ClientError> {
        let chain = self.effective_chain(chain);
        poll::process_check_for_updates(
            self.rpc.as_ref(),
            &self.cache,
            &self.config.ledger_identity,
            chain.as_deref(),
        )
        .await
    }

    /// Run the four-step signature chain for a ticket against the cached
    /// ledger's main identity.
    pub async fn verify_ticket(
        &self,
        ticket: &TicketRecord,
        chain: Option<&str>,
    ) -> Result<VerificationResult, ClientError> {
        let snapshot = self
            .cache
            .ledger_snapshot()
            .ok_or(ClientError::LedgerNotLoaded)?;
        let chain = self.effective_chain(chain);
        Ok(verify::process_verify_ticket(
            self.rpc.as_ref(),
            ticket,
            &snapshot.parameters.main_identity,
            chain.as_deref(),
        )
        .await)
    }

    /// Refetch the ledger; cached tickets are re-enumerated on demand.
    pub async fn manual_refresh(&self, chain: Option<&str>) -> Result<(), ClientError> {
        self.fetch_ledger(chain).await.map(|_| ())
    }

    /// Spawn the periodic height check with the configured interval.
    /// Dropping or stopping the returned handle ends the polling; an
    /// in-flight refresh still completes into the cache.
    pub fn start_auto_refresh(&self, chain: Option<&str>) -> PollerHandle {
        poll::start_auto_refresh(
            self.rpc.clone(),
            self.cache.clone(),
            self.config.ledger_identity.clone(),
            self.effective_chain(chain),
            self.config.poll_interval,
        )
    }

    /// Fetch a utility identity (jackpot, payout, operations, …).
    pub async fn fetch_utility_identity(
        &self,
        name: &str,
        chain: Option<&str>,
    ) -> Result<Value, ClientError> {
        let chain = self.effective_chain(chain);
        utility::process_fetch_utility_identity(self.rpc.as_ref(), name, chain.as_deref()).await
    }

    /// Fetch a basket currency definition.
    pub async fn fetch_utility_currency(
        &self,
        currency_name: &str,
        chain: Option<&str>,
    ) -> Result<Value, ClientError> {
        let chain = self.effective_chain(chain);
        utility::process_fetch_utility_currency(self.rpc.as_ref(), currency_name, chain.as_deref())
            .await
    }
}
