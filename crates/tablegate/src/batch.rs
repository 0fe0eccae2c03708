//! Chunked batch insert executor.
//!
//! Chunk calls are dispatched without awaiting the previous one, the way
//! the original helper fired its batches. The only cross-task coordination
//! is a failure flag checked before issuing or post-processing a chunk and
//! an atomic insert counter. That leaves a window where chunks already in
//! flight when another chunk fails still complete and bump the counter;
//! the tests probe that window instead of papering over it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tablegate_core::api::HandlerError;
use tablegate_core::item::AttrMap;
use tablegate_core::storage::TableStore;

/// Outcome of a full batch insert run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertReport {
    pub submitted: u64,
    pub inserted: u64,
}

impl InsertReport {
    pub fn is_complete(&self) -> bool {
        self.inserted == self.submitted
    }
}

/// Inserts `items` into `table` in chunks of `chunk_size`.
///
/// Reports at most one failure: the first chunk error wins and suppresses
/// issuing further chunks. On success the report accounts for every
/// submitted item via the store's capacity accounting.
pub async fn insert_all(
    store: Arc<dyn TableStore>,
    table: &str,
    items: Vec<AttrMap>,
    chunk_size: usize,
) -> Result<InsertReport, HandlerError> {
    let submitted = items.len() as u64;
    let failed = Arc::new(AtomicBool::new(false));
    let inserted = Arc::new(AtomicU64::new(0));
    let first_error: Arc<Mutex<Option<HandlerError>>> = Arc::new(Mutex::new(None));

    let chunks: Vec<Vec<AttrMap>> = items.chunks(chunk_size).map(<[AttrMap]>::to_vec).collect();
    let mut handles = Vec::with_capacity(chunks.len());

    for (index, chunk) in chunks.into_iter().enumerate() {
        if failed.load(Ordering::SeqCst) {
            break;
        }
        tracing::info!(batch = index, size = chunk.len(), "starting insert batch");

        let store = Arc::clone(&store);
        let table = table.to_string();
        let failed = Arc::clone(&failed);
        let inserted = Arc::clone(&inserted);
        let first_error = Arc::clone(&first_error);

        handles.push(tokio::spawn(async move {
            let outcome = store.batch_put(&table, &chunk).await;
            if failed.load(Ordering::SeqCst) {
                return;
            }

            let error = match outcome {
                Err(e) => Some(HandlerError::from(e)),
                Ok(outcome) if outcome.unprocessed_count > 0 => {
                    tracing::warn!(
                        unprocessed = outcome.unprocessed_count,
                        "unprocessed items returned; retrying isn't supported"
                    );
                    Some(HandlerError::UnprocessedItems)
                }
                Ok(outcome) => match outcome.consumed_units {
                    None => Some(HandlerError::AccountingMissing),
                    Some(units) => {
                        inserted.fetch_add(units as u64, Ordering::SeqCst);
                        None
                    }
                },
            };

            if let Some(error) = error {
                // First failure wins; later ones are dropped.
                if !failed.swap(true, Ordering::SeqCst) {
                    *first_error.lock().unwrap() = Some(error);
                }
            }
        }));
    }

    for handle in handles {
        // Insert tasks don't panic; a join error would mean the runtime is
        // shutting down underneath us.
        let _ = handle.await;
    }

    if let Some(error) = first_error.lock().unwrap().take() {
        return Err(error);
    }

    let report = InsertReport {
        submitted,
        inserted: inserted.load(Ordering::SeqCst),
    };
    if report.is_complete() {
        tracing::info!(count = report.inserted, "successful batch insert");
    }
    Ok(report)
}
