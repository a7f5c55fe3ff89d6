//! Scripted in-memory `ChainRpc` used across the crate's tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::{ChainRpc, RpcError};

/// Fixture-backed collaborator. Identity and content lookups resolve from
/// maps; verification calls pop a scripted verdict queue and default to
/// `Ok(true)` once the queue runs dry. Call counters let tests assert the
/// exact number of remote attempts.
#[derive(Default)]
pub(crate) struct MockRpc {
    identities: HashMap<String, Value>,
    contents: HashMap<String, Value>,
    currencies: HashMap<String, Value>,
    block_count: AtomicU64,
    verify_message_script: Mutex<VecDeque<Result<bool, RpcError>>>,
    verify_hash_script: Mutex<VecDeque<Result<bool, RpcError>>>,
    pub identity_calls: AtomicUsize,
    pub content_calls: AtomicUsize,
    pub verify_calls: AtomicUsize,
}

impl MockRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(mut self, name: &str, identity: Value) -> Self {
        self.identities.insert(name.to_owned(), identity);
        self
    }

    pub fn with_content(mut self, name: &str, content: Value) -> Self {
        self.contents.insert(name.to_owned(), content);
        self
    }

    pub fn with_currency(mut self, name: &str, currency: Value) -> Self {
        self.currencies.insert(name.to_owned(), currency);
        self
    }

    pub fn with_block_count(self, height: u64) -> Self {
        self.block_count.store(height, Ordering::SeqCst);
        self
    }

    pub fn set_block_count(&self, height: u64) {
        self.block_count.store(height, Ordering::SeqCst);
    }

    pub fn push_verify_message(&self, verdict: Result<bool, RpcError>) {
        self.verify_message_script.lock().push_back(verdict);
    }

    pub fn push_verify_hash(&self, verdict: Result<bool, RpcError>) {
        self.verify_hash_script.lock().push_back(verdict);
    }
}

#[async_trait]
impl ChainRpc for MockRpc {
    async fn get_identity(&self, name: &str, _chain: Option<&str>) -> Result<Value, RpcError> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        self.identities
            .get(name)
            .cloned()
            .ok_or_else(|| RpcError::IdentityNotFound(name.to_owned()))
    }

    async fn get_identity_content(
        &self,
        name: &str,
        _height_start: Option<u64>,
        _height_end: Option<u64>,
        _tx_proofs: bool,
        _vdxf_key: &str,
        _chain: Option<&str>,
    ) -> Result<Value, RpcError> {
        self.content_calls.fetch_add(1, Ordering::SeqCst);
        self.contents
            .get(name)
            .cloned()
            .ok_or_else(|| RpcError::IdentityNotFound(name.to_owned()))
    }

    async fn get_block_count(&self, _chain: Option<&str>) -> Result<u64, RpcError> {
        Ok(self.block_count.load(Ordering::SeqCst))
    }

    async fn get_currency(
        &self,
        currency_name: &str,
        _height: Option<u64>,
        _chain: Option<&str>,
    ) -> Result<Value, RpcError> {
        self.currencies
            .get(currency_name)
            .cloned()
            .ok_or_else(|| RpcError::CurrencyNotFound(currency_name.to_owned()))
    }

    async fn verify_message(
        &self,
        _identity_or_address: &str,
        _signature: &str,
        _message: &str,
        _check_latest: bool,
        _chain: Option<&str>,
    ) -> Result<bool, RpcError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.verify_message_script
            .lock()
            .pop_front()
            .unwrap_or(Ok(true))
    }

    async fn verify_hash(
        &self,
        _identity_or_address: &str,
        _signature: &str,
        _hex_hash: &str,
        _check_latest: bool,
        _chain: Option<&str>,
    ) -> Result<bool, RpcError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.verify_hash_script
            .lock()
            .pop_front()
            .unwrap_or(Ok(true))
    }
}
