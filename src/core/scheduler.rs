//! Background refresh of repository snapshots.
//!
//! One worker thread serves a single-slot request queue. At most one refresh is in
//! flight and at most one is pending; a request made while one is pending replaces
//! its trigger. The periodic timer only fills an empty slot.

use crate::core::{snapshot::SnapshotService, state::Snapshot};
use crossbeam_channel::{bounded, select, tick, Receiver, Sender, TrySendError};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshTrigger {
    Timer,
    DocumentSaved,
    VcsStateChanged,
    Manual,
}

impl std::fmt::Display for RefreshTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RefreshTrigger::Timer => "timer",
            RefreshTrigger::DocumentSaved => "document saved",
            RefreshTrigger::VcsStateChanged => "vcs state changed",
            RefreshTrigger::Manual => "manual",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedSnapshot {
    /// Strictly increasing, starting at 1
    pub generation: u64,
    pub trigger: RefreshTrigger,
    pub snapshot: Snapshot,
}

/// Receives every completed snapshot, on the worker thread
pub trait SnapshotSink: Send + 'static {
    fn publish(&mut self, published: PublishedSnapshot);
}

impl SnapshotSink for Sender<PublishedSnapshot> {
    fn publish(&mut self, published: PublishedSnapshot) {
        if self.send(published).is_err() {
            log::debug!("Snapshot receiver dropped, discarding refresh");
        }
    }
}

#[derive(Default)]
struct Shared {
    pending: Mutex<Option<RefreshTrigger>>,
    stopping: AtomicBool,
}

impl Shared {
    fn take(&self) -> Option<RefreshTrigger> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn offer(&self, trigger: RefreshTrigger, replace: bool) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending.is_some() && !replace {
            return false;
        }
        *pending = Some(trigger);
        true
    }
}

pub struct RefreshScheduler {
    shared: Arc<Shared>,
    wake: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    /// Start the worker; the timer first fires one `period` after start
    pub fn start(
        service: SnapshotService,
        sink: impl SnapshotSink,
        period: Duration,
    ) -> std::io::Result<Self> {
        let shared = Arc::new(Shared::default());
        let (wake_tx, wake_rx) = bounded(1);

        let worker_shared = shared.clone();
        let worker = std::thread::Builder::new()
            .name("gitflow-refresh".to_string())
            .spawn(move || run_worker(service, sink, worker_shared, wake_rx, period))?;

        log::debug!("Refresh scheduler started (interval {period:?})");
        Ok(Self {
            shared,
            wake: Some(wake_tx),
            worker: Some(worker),
        })
    }

    /// Ask for a refresh; replaces the trigger of any pending request
    pub fn request(&self, trigger: RefreshTrigger) {
        self.shared.offer(trigger, true);
        if let Some(wake) = &self.wake {
            match wake.try_send(()) {
                Ok(()) | Err(TrySendError::Full(())) => {}
                Err(TrySendError::Disconnected(())) => {
                    log::debug!("Refresh worker gone, dropping {trigger} request")
                }
            }
        }
    }

    /// Stop after the in-flight refresh; pending requests are discarded
    pub fn shutdown(&mut self) {
        self.shared.stopping.store(true, Ordering::SeqCst);
        self.wake.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("Refresh worker panicked");
            }
            log::debug!("Refresh scheduler stopped");
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(
    service: SnapshotService,
    mut sink: impl SnapshotSink,
    shared: Arc<Shared>,
    wake: Receiver<()>,
    period: Duration,
) {
    let ticker = tick(period);
    let mut generation = 0u64;

    loop {
        select! {
            recv(wake) -> msg => if msg.is_err() { break },
            recv(ticker) -> _ => {
                if !shared.offer(RefreshTrigger::Timer, false) {
                    log::debug!("Timer tick ignored, a refresh is already pending");
                }
            },
        }

        while !shared.stopping.load(Ordering::SeqCst) {
            let Some(trigger) = shared.take() else {
                break;
            };
            generation += 1;
            log::debug!("Refresh #{generation} ({trigger})");
            let snapshot = service.snapshot();
            sink.publish(PublishedSnapshot {
                generation,
                trigger,
                snapshot,
            });
        }

        if shared.stopping.load(Ordering::SeqCst) {
            break;
        }
    }
}
