//! Process-lifetime in-memory cache of ledger and ticket state.
//!
//! The cache is the only mutable shared state in the client. Every
//! mutation replaces a whole slot (the ledger, one ticket by key, the
//! ranked sequence), never edits fields in place, so a reader between two
//! operations never observes a torn slot. A `parking_lot::RwLock` guards
//! the state because the client runs on a multi-threaded runtime; the
//! "fetch fully, then replace" granularity is preserved under the lock.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::state::{LedgerSnapshot, TicketRecord};

/// The ledger side of the cache, replaced wholesale on every successful
/// fetch.
#[derive(Clone, Debug, Default)]
pub struct LedgerSlot {
    /// Last successfully normalized snapshot.
    pub snapshot: Option<LedgerSnapshot>,

    /// Raw identity record the snapshot was derived from.
    pub raw_source: Option<Value>,

    /// When the snapshot was fetched.
    pub last_fetched_at: Option<DateTime<Utc>>,

    /// Chain height observed alongside the fetch.
    pub observed_height: u64,

    /// Parent i-address of the ledger identity.
    pub parent_address: Option<String>,
}

/// Full cache state. Created empty at process start; destroyed only by an
/// explicit clear or process exit.
#[derive(Clone, Debug, Default)]
pub struct CacheState {
    /// Ledger slot.
    pub ledger: LedgerSlot,

    /// Resolved tickets keyed by identity name.
    pub tickets: HashMap<String, TicketRecord>,

    /// Tickets in winning order, replaced as a batch after enumeration.
    pub ranked_tickets: Vec<TicketRecord>,

    /// Phase of the last cached ledger, for invalidation comparison.
    pub last_phase: Option<String>,

    /// Drawing block of the last cached ledger, for invalidation comparison.
    pub last_drawing_block: Option<u64>,

    /// A ledger fetch is in flight.
    pub loading: bool,

    /// Message of the last failed ledger fetch, cleared on success.
    pub last_error: Option<String>,
}

/// Shared handle over the cache state.
#[derive(Debug, Default)]
pub struct LottoCache {
    state: RwLock<CacheState>,
}

impl LottoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cloned snapshot view of the full state.
    pub fn state(&self) -> CacheState {
        self.state.read().clone()
    }

    /// Last successfully cached ledger snapshot.
    pub fn ledger_snapshot(&self) -> Option<LedgerSnapshot> {
        self.state.read().ledger.snapshot.clone()
    }

    /// Chain height observed by the last ledger fetch.
    pub fn observed_height(&self) -> u64 {
        self.state.read().ledger.observed_height
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.read().last_error.clone()
    }

    /// Replace the ledger slot and update the last-seen phase and drawing
    /// block. Returns whether either differed from the previously cached
    /// values — the signal that every derived ticket is stale. The first
    /// fetch has nothing to compare against and reports no change.
    pub fn set_ledger(
        &self,
        snapshot: LedgerSnapshot,
        raw_source: Value,
        observed_height: u64,
        parent_address: Option<String>,
    ) -> bool {
        let mut state = self.state.write();

        let phase_changed = state
            .last_phase
            .as_ref()
            .is_some_and(|phase| *phase != snapshot.current_phase);
        let drawing_block_changed = state
            .last_drawing_block
            .is_some_and(|block| block != snapshot.parameters.drawing_block);

        state.last_phase = Some(snapshot.current_phase.clone());
        state.last_drawing_block = Some(snapshot.parameters.drawing_block);
        state.ledger = LedgerSlot {
            snapshot: Some(snapshot),
            raw_source: Some(raw_source),
            last_fetched_at: Some(Utc::now()),
            observed_height,
            parent_address,
        };
        state.last_error = None;

        phase_changed || drawing_block_changed
    }

    /// Insert or replace one ticket by name.
    pub fn set_ticket(&self, ticket: TicketRecord) {
        self.state
            .write()
            .tickets
            .insert(ticket.name.clone(), ticket);
    }

    /// Replace the whole ticket map.
    pub fn set_tickets(&self, tickets: Vec<TicketRecord>) {
        let map = tickets
            .into_iter()
            .map(|ticket| (ticket.name.clone(), ticket))
            .collect();
        self.state.write().tickets = map;
    }

    /// Replace the ranked sequence as a batch.
    pub fn set_ranked_tickets(&self, ranked: Vec<TicketRecord>) {
        self.state.write().ranked_tickets = ranked;
    }

    /// Drop all derived ticket data. Called when the ledger's phase or
    /// drawing block moved; scoring and status depend on both, so partial
    /// invalidation is never correct.
    pub fn invalidate_tickets(&self) {
        let mut state = self.state.write();
        let dropped = state.tickets.len();
        state.tickets.clear();
        state.ranked_tickets.clear();
        if dropped > 0 {
            debug!(dropped, "invalidated cached tickets");
        }
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.write().loading = loading;
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.write().last_error = error;
    }

    /// Reset to the empty state.
    pub fn clear(&self) {
        *self.state.write() = CacheState::default();
    }

    /// Flip the loading flag on and clear the previous error; the returned
    /// guard flips it back off when dropped, whatever exit path the fetch
    /// takes.
    pub(crate) fn begin_loading(&self) -> LoadingGuard<'_> {
        self.set_loading(true);
        self.set_error(None);
        LoadingGuard { cache: self }
    }
}

pub(crate) struct LoadingGuard<'a> {
    cache: &'a LottoCache,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.cache.set_loading(false);
    }
}
