//! Program-wide constants: well-known VDXF keys, network graveyard
//! addresses, and client defaults.

use std::time::Duration;

/// VDXF key selecting the ledger identity's published data entry.
pub const LEDGER_DATA_KEY: &str = "iFVPmjN213NmfaiBhAkxAJWWGtcDEoXJcU";

/// VDXF key selecting a ticket identity's finalized data entry.
pub const TICKET_FINALIZED_DATA_KEY: &str = "iMzWvy5j4ciiMSBsEEVzfy66awLQ85b4GN";

/// Address discarded tickets are sent to on the test network.
pub const GRAVEYARD_ADDRESS_TESTNET: &str = "RMzd5vMptsxxz1tWH2FeSdUgRSNgS4G52w";

/// Address discarded tickets are sent to on the production network.
pub const GRAVEYARD_ADDRESS_MAINNET: &str = "RAXCjm9Z4RJWEmsNgo83B8JevTcJRt6Tj5";

/// Identity name the lottery ledger is published under by default.
pub const DEFAULT_LEDGER_IDENTITY: &str = "ledger.lotto@";

/// Default period between block-height polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Number of shortened-identity retries after a failed primary ticket fetch.
pub const TICKET_NAME_FALLBACK_ATTEMPTS: usize = 3;
