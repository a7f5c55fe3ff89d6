//! Block-height polling and the auto-refresh task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::LottoCache;
use crate::error::ClientError;
use crate::rpc::ChainRpc;

use super::fetch_ledger::process_fetch_ledger;

/// Compare the current chain height against the height observed by the
/// last ledger fetch; refresh the ledger when it advanced.
///
/// Returns whether a refresh happened. An unchanged height is not an
/// error — there is simply nothing to do.
pub async fn process_check_for_updates(
    rpc: &dyn ChainRpc,
    cache: &LottoCache,
    ledger_identity: &str,
    chain: Option<&str>,
) -> Result<bool, ClientError> {
    let last_height = cache.observed_height();
    let current_height = rpc.get_block_count(chain).await?;

    if current_height <= last_height {
        debug!(current_height, "chain height unchanged; nothing to do");
        return Ok(false);
    }

    process_fetch_ledger(rpc, cache, ledger_identity, chain).await?;
    Ok(true)
}

/// Owned handle over the auto-refresh task.
///
/// The poller stops when [`PollerHandle::stop`] is called or when the
/// handle is dropped. Stopping never aborts an in-flight check: the
/// current iteration completes and its results are applied to the cache
/// before the task exits.
pub struct PollerHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Signal the poller to stop and wait for the task to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        let _ = self.task.await;
    }

    /// The task has already exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawn the periodic height check. The first check runs one full period
/// after the call, then repeats every period until stopped.
pub fn start_auto_refresh(
    rpc: Arc<dyn ChainRpc>,
    cache: Arc<LottoCache>,
    ledger_identity: String,
    chain: Option<String>,
    period: Duration,
) -> PollerHandle {
    let (shutdown, mut stop_signal) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // An interval yields immediately on its first tick; consume it so
        // the first real check lands one period from now.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = &mut stop_signal => break,
            }

            // The check itself runs outside the select so a stop signal
            // cannot cancel it mid-flight.
            if let Err(err) =
                process_check_for_updates(rpc.as_ref(), &cache, &ledger_identity, chain.as_deref())
                    .await
            {
                warn!(error = %err, "periodic ledger refresh failed");
            }
        }
    });

    PollerHandle { shutdown, task }
}
