//! Handlers behind the client's public operations.

/// Full-pass ticket enumeration with partial-result reporting.
pub mod enumerate;

/// Ledger identity fetch and cache invalidation.
pub mod fetch_ledger;

/// Deterministic ticket resolution with the bounded fallback ladder.
pub mod fetch_ticket;

/// Block-height polling and the auto-refresh task.
pub mod poll;

/// Utility identity and currency lookups.
pub mod utility;

/// Four-step ticket authenticity verification.
pub mod verify;
