use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use tokio::sync::mpsc;
use tracing::debug;

use crate::args::{MAX_PARALLEL, PositiveUsize};
use crate::error::{AppError, AppResult, HttpError};
use crate::metrics::{ProbeBatch, ProbeResult};

use super::probe::{ProbeRequest, Prober};

/// Upper bound on up-front allocation for result buffers; larger batches grow on demand.
const PREALLOCATED_RESULTS: usize = 1024;

/// Issues `count` probes one after another.
pub async fn run_sequential(
    prober: &dyn Prober,
    request: &ProbeRequest,
    count: usize,
) -> ProbeBatch {
    let mut results = Vec::with_capacity(count.min(PREALLOCATED_RESULTS));
    for index in 1..=count {
        results.push(prober.probe(index, request).await);
    }
    ProbeBatch::from_results(results)
}

/// Issues `count` probes through at most `max_parallel` workers (never more
/// than [`MAX_PARALLEL`]).
///
/// Workers claim the next index from a shared cursor and push results into a
/// channel; the batch is reordered by index before it is returned.
///
/// # Errors
///
/// Returns an error when a worker task panics or the batch comes back short.
pub async fn run_concurrent(
    prober: Arc<dyn Prober>,
    request: Arc<ProbeRequest>,
    count: usize,
    max_parallel: PositiveUsize,
) -> AppResult<ProbeBatch> {
    if count == 0 {
        return Ok(ProbeBatch::default());
    }

    let workers = max_parallel.get().min(count).min(MAX_PARALLEL);
    let cursor = Arc::new(AtomicUsize::new(0));
    // One slot per worker; senders wait while the collector catches up.
    let (results_tx, mut results_rx) = mpsc::channel::<ProbeResult>(workers);
    let mut handles = Vec::with_capacity(workers);

    for worker_id in 0..workers {
        let prober = Arc::clone(&prober);
        let request = Arc::clone(&request);
        let cursor = Arc::clone(&cursor);
        let results_tx = results_tx.clone();

        handles.push(tokio::spawn(async move {
            let mut handled = 0usize;
            loop {
                let slot = cursor.fetch_add(1, Ordering::Relaxed);
                if slot >= count {
                    break;
                }
                let result = prober.probe(slot.saturating_add(1), &request).await;
                if results_tx.send(result).await.is_err() {
                    break;
                }
                handled = handled.saturating_add(1);
            }
            debug!("worker {} handled {} probes", worker_id, handled);
        }));
    }
    drop(results_tx);

    let mut results = Vec::with_capacity(count.min(PREALLOCATED_RESULTS));
    while let Some(result) = results_rx.recv().await {
        results.push(result);
    }
    for handle in handles {
        handle.await?;
    }

    if results.len() != count {
        return Err(AppError::http(HttpError::IncompleteBatch {
            expected: count,
            received: results.len(),
        }));
    }
    Ok(ProbeBatch::from_results(results))
}
