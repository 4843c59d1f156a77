//! Periodic frame sampling with a drop-if-busy policy and a versioned
//! last-result slot.
//!
//! Design
//! - A ticker thread fires on a fixed interval and hands the captured frame
//!   to a single worker over a rendezvous channel. If the worker is still
//!   mid-invocation the hand-off fails and the tick is dropped — never
//!   queued — so memory stays bounded on slow hardware.
//! - At most one invocation is ever in flight; an in-flight invocation runs
//!   to completion and is never cancelled mid-algorithm.
//! - Frames carry a monotonically increasing sequence number. The worker
//!   publishes into a [`ResultSlot`] that performs the read-compare-write
//!   under one lock, so a stale invocation can never tear or overwrite a
//!   newer result, and readers always observe a fully written value.
use crate::detector::DocumentDetector;
use crate::types::Scan;
use image::RgbImage;
use log::debug;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{sync_channel, TrySendError};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SamplerParams {
    /// Interval between frame captures.
    pub interval: Duration,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
        }
    }
}

/// Single-writer, versioned slot holding the latest completed scan.
///
/// Readers (e.g. an overlay UI) get a cheap `Arc` clone of the newest
/// version; publishes with an out-of-date sequence number are ignored.
#[derive(Default)]
pub struct ResultSlot {
    inner: Mutex<Option<(u64, Arc<Scan>)>>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `scan` as version `seq`. Returns `false` (and leaves the slot
    /// untouched) when a result with an equal or newer sequence is already
    /// present.
    pub fn publish(&self, seq: u64, scan: Arc<Scan>) -> bool {
        let mut slot = self.inner.lock().expect("result slot poisoned");
        match &*slot {
            Some((current, _)) if *current >= seq => false,
            _ => {
                *slot = Some((seq, scan));
                true
            }
        }
    }

    /// The most recent completed result, if any.
    pub fn latest(&self) -> Option<(u64, Arc<Scan>)> {
        self.inner.lock().expect("result slot poisoned").clone()
    }
}

/// Runs a [`DocumentDetector`] on frames pulled from a source at a fixed
/// cadence.
pub struct FrameSampler {
    slot: Arc<ResultSlot>,
    dropped: Arc<AtomicU64>,
    stop: Arc<AtomicBool>,
    ticker: Option<JoinHandle<()>>,
    worker: Option<JoinHandle<()>>,
}

impl FrameSampler {
    /// Start sampling. `frame_source` is polled once per interval; returning
    /// `None` skips the tick (no frame available).
    pub fn start<F>(detector: DocumentDetector, params: SamplerParams, mut frame_source: F) -> Self
    where
        F: FnMut() -> Option<RgbImage> + Send + 'static,
    {
        let slot = Arc::new(ResultSlot::new());
        let dropped = Arc::new(AtomicU64::new(0));
        let stop = Arc::new(AtomicBool::new(false));

        // Rendezvous channel: a send only succeeds while the worker is
        // blocked waiting, which is exactly "previous invocation finished".
        let (tx, rx) = sync_channel::<(u64, RgbImage)>(0);

        let worker_slot = Arc::clone(&slot);
        let worker = std::thread::spawn(move || {
            while let Ok((seq, frame)) = rx.recv() {
                match detector.process(&frame) {
                    Ok(Some(scan)) => {
                        worker_slot.publish(seq, Arc::new(scan));
                    }
                    Ok(None) => debug!("FrameSampler: frame #{seq} no document"),
                    Err(err) => debug!("FrameSampler: frame #{seq} failed: {err}"),
                }
            }
        });

        let ticker_stop = Arc::clone(&stop);
        let ticker_dropped = Arc::clone(&dropped);
        let ticker = std::thread::spawn(move || {
            let mut seq = 0u64;
            while !ticker_stop.load(Ordering::Relaxed) {
                std::thread::sleep(params.interval);
                if ticker_stop.load(Ordering::Relaxed) {
                    break;
                }
                let Some(frame) = frame_source() else { continue };
                seq += 1;
                match tx.try_send((seq, frame)) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        ticker_dropped.fetch_add(1, Ordering::Relaxed);
                        debug!("FrameSampler: frame #{seq} dropped, worker busy");
                    }
                    Err(TrySendError::Disconnected(_)) => break,
                }
            }
            // Dropping `tx` here disconnects the worker's receive loop.
        });

        Self {
            slot,
            dropped,
            stop,
            ticker: Some(ticker),
            worker: Some(worker),
        }
    }

    /// Latest completed result (sequence number and scan), if any.
    pub fn latest(&self) -> Option<(u64, Arc<Scan>)> {
        self.slot.latest()
    }

    /// Shared handle to the result slot, e.g. for a UI overlay.
    pub fn slot(&self) -> Arc<ResultSlot> {
        Arc::clone(&self.slot)
    }

    /// Number of ticks dropped because the previous invocation was still
    /// running.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Stop sampling. The in-flight invocation, if any, runs to completion
    /// before the worker exits.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(ticker) = self.ticker.take() {
            let _ = ticker.join();
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for FrameSampler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quad::Quad;

    fn scan(tag: f32) -> Arc<Scan> {
        Arc::new(Scan {
            corners: Quad([[tag, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]).ordered(),
            rectified: RgbImage::new(1, 1),
            latency_ms: 0.0,
        })
    }

    #[test]
    fn stale_publish_is_ignored() {
        let slot = ResultSlot::new();
        assert!(slot.publish(2, scan(2.0)));
        assert!(!slot.publish(1, scan(1.0)));
        assert!(!slot.publish(2, scan(9.0)));
        let (seq, _) = slot.latest().expect("published");
        assert_eq!(seq, 2);
        assert!(slot.publish(3, scan(3.0)));
        let (seq, _) = slot.latest().expect("published");
        assert_eq!(seq, 3);
    }

    #[test]
    fn empty_slot_reads_none() {
        assert!(ResultSlot::new().latest().is_none());
    }
}
