//! Background scan execution on a shared worker thread.
//!
//! A scan is seconds of image and recognition work, far too long to run
//! on a caller that also services user input. [`enqueue_scan`] hands
//! the whole job to a lazily started worker thread and returns a
//! [`ScanHandle`] the caller polls from its own loop. The worker is
//! shared across scans and scans run in submission order.
//!
//! The handle carries no run identity. Superseding an in-flight scan is
//! the session's concern: the caller tags each scan with its session
//! token and lets the session discard results from stale runs.

use std::sync::{OnceLock, mpsc};

use futures_channel::oneshot;
use gridlens_core::Board;

use crate::{ScanError, ScanPipeline};

struct ScanJob {
    pipeline: ScanPipeline,
    bytes: Vec<u8>,
    response_tx: oneshot::Sender<Result<Board, ScanError>>,
}

// Shared worker thread sender reused across scans.
static WORKER_SENDER: OnceLock<mpsc::Sender<ScanJob>> = OnceLock::new();

/// An error in the worker machinery itself, as opposed to a failed
/// scan.
#[derive(Debug, Clone, Copy, derive_more::Display, derive_more::Error)]
pub enum WorkError {
    /// The worker thread is gone and cannot take or answer jobs.
    #[display("scan worker disconnected")]
    WorkerDisconnected,
}

/// A handle for polling a background scan.
pub struct ScanHandle {
    receiver: oneshot::Receiver<Result<Board, ScanError>>,
}

impl std::fmt::Debug for ScanHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanHandle").finish_non_exhaustive()
    }
}

impl ScanHandle {
    /// Attempts to poll for the finished scan.
    ///
    /// Returns `Ok(None)` while the scan is still running.
    ///
    /// # Errors
    ///
    /// Returns [`WorkError::WorkerDisconnected`] when the worker died
    /// before answering.
    pub fn poll(&mut self) -> Result<Option<Result<Board, ScanError>>, WorkError> {
        self.receiver
            .try_recv()
            .map_err(|oneshot::Canceled| WorkError::WorkerDisconnected)
    }
}

fn worker_sender() -> &'static mpsc::Sender<ScanJob> {
    WORKER_SENDER.get_or_init(|| {
        let (tx, rx) = mpsc::channel::<ScanJob>();
        std::thread::spawn(move || {
            while let Ok(job) = rx.recv() {
                let result = job.pipeline.scan_bytes(&job.bytes);
                let _ = job.response_tx.send(result);
            }
        });
        tx
    })
}

/// Starts the shared worker thread without submitting a scan.
pub fn warm_up() {
    let _ = worker_sender();
}

/// Submits a scan to the shared worker thread.
///
/// # Errors
///
/// Returns [`WorkError::WorkerDisconnected`] when the worker thread has
/// exited.
pub fn enqueue_scan(pipeline: ScanPipeline, bytes: Vec<u8>) -> Result<ScanHandle, WorkError> {
    let (response_tx, response_rx) = oneshot::channel();
    worker_sender()
        .send(ScanJob {
            pipeline,
            bytes,
            response_tx,
        })
        .map_err(|_| WorkError::WorkerDisconnected)?;
    Ok(ScanHandle {
        receiver: response_rx,
    })
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::testing::FailingRecognizer;

    fn poll_to_completion(mut handle: ScanHandle) -> Result<Board, ScanError> {
        for _ in 0..500 {
            if let Some(result) = handle.poll().expect("worker stays alive") {
                return result;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("scan did not finish in time");
    }

    #[test]
    fn test_enqueued_scan_reports_through_the_handle() {
        let pipeline = ScanPipeline::new(Arc::new(FailingRecognizer));
        let handle = enqueue_scan(pipeline, b"not an image".to_vec()).unwrap();
        let result = poll_to_completion(handle);
        assert!(matches!(result, Err(ScanError::Decode(_))));
    }

    #[test]
    fn test_scans_queue_behind_each_other() {
        let pipeline = ScanPipeline::new(Arc::new(FailingRecognizer));
        let first = enqueue_scan(pipeline.clone(), b"junk one".to_vec()).unwrap();
        let second = enqueue_scan(pipeline, b"junk two".to_vec()).unwrap();
        assert!(matches!(poll_to_completion(first), Err(ScanError::Decode(_))));
        assert!(matches!(poll_to_completion(second), Err(ScanError::Decode(_))));
    }
}
