//! Async helpers running the synchronous optimizer on tokio's blocking pool.

use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::{self, JoinError};
use tokio::time::timeout;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

use crate::error::RunError;
use crate::model::{OptimizationResult, Piece, Sheet};
use crate::optimizer::{CancelToken, CutConfig, CutEvent, optimize_with_progress};

/// Buffered events before the optimizer waits on a slow consumer.
const EVENT_BUFFER: usize = 32;

/// Runs the optimizer, giving up after `deadline`.
///
/// On expiry the run's cancel token is tripped so the worker stops at its
/// next checkpoint, and [`RunError::DeadlineExceeded`] is returned without
/// waiting for it. A panic inside the worker is resumed on the caller.
pub async fn optimize_with_deadline(
    sheet: Sheet,
    pieces: Vec<Piece>,
    config: CutConfig,
    deadline: Option<Duration>,
) -> Result<OptimizationResult, RunError> {
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();
    let handle = task::spawn_blocking(move || {
        optimize_with_progress(sheet, pieces, config, &worker_cancel, |_| {})
    });

    let joined = match deadline {
        Some(limit) => match timeout(limit, handle).await {
            Ok(joined) => joined,
            Err(_) => {
                cancel.cancel();
                warn!(limit_ms = limit.as_millis() as u64, "optimization deadline exceeded");
                return Err(RunError::DeadlineExceeded {
                    limit_ms: limit.as_millis(),
                });
            }
        },
        None => handle.await,
    };

    match joined {
        Ok(outcome) => outcome.map_err(RunError::from),
        Err(err) => Err(worker_failure(err)),
    }
}

/// Streams the progress events of a run.
///
/// The stream ends after a `Finished` or `Failed` event. Dropping it cancels
/// the run. Must be called from within a tokio runtime.
pub fn optimize_stream(
    sheet: Sheet,
    pieces: Vec<Piece>,
    config: CutConfig,
    cancel: CancelToken,
) -> impl Stream<Item = CutEvent> + Unpin {
    let (tx, rx) = mpsc::channel::<CutEvent>(EVENT_BUFFER);

    task::spawn_blocking(move || {
        let outcome = optimize_with_progress(sheet, pieces, config, &cancel, |evt| {
            if tx.blocking_send(evt.clone()).is_err() {
                // Receiver has gone away; stop at the next checkpoint
                cancel.cancel();
            }
        });
        if let Err(err) = outcome {
            debug!(code = err.code(), "streamed optimization ended without layout");
        }
    });

    ReceiverStream::new(rx)
}

fn worker_failure(err: JoinError) -> RunError {
    match err.try_into_panic() {
        Ok(payload) => std::panic::resume_unwind(payload),
        Err(err) => RunError::Worker(err.to_string()),
    }
}
