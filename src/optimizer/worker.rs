//! Runs an [`Optimizer`] on a background thread and streams attempt events
//! back over a channel.

use super::runner::{AttemptProgress, Optimizer, ProgressCallback, RunSummary};
use super::FinishedLayout;
use crate::error::{CfResult, CrossForgeError};
use crate::rng::RandomSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use tracing::warn;

#[derive(Debug, Clone)]
pub enum AttemptEvent {
    /// Sent after every attempt.
    Progress {
        attempt: usize,
        attempts: usize,
        unique: usize,
        best_score: Option<f32>,
    },
    /// A new unique layout.
    Accepted(Box<FinishedLayout>),
    Finished(Box<RunSummary>),
    Failed(String),
}

/// Cooperative stop flag, checked between beam steps and between attempts.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct WorkerHandle {
    pub events: Receiver<AttemptEvent>,
    pub cancel: CancelHandle,
    join: JoinHandle<CfResult<RunSummary>>,
}

impl WorkerHandle {
    /// Waits for the worker. The summary is also the payload of the final
    /// [`AttemptEvent::Finished`].
    pub fn join(self) -> CfResult<RunSummary> {
        self.join
            .join()
            .map_err(|_| CrossForgeError::WorkerPanicked)?
    }
}

struct ChannelProgress {
    tx: Mutex<Sender<AttemptEvent>>,
    cancel: CancelHandle,
}

impl ChannelProgress {
    fn send(&self, event: AttemptEvent) -> bool {
        match self.tx.lock() {
            // A dropped receiver means nobody is listening any more
            Ok(tx) => tx.send(event).is_ok(),
            Err(_) => false,
        }
    }
}

impl ProgressCallback for ChannelProgress {
    fn on_progress(&self, p: &AttemptProgress<'_>) -> bool {
        if let Some(layout) = p.accepted {
            if !self.send(AttemptEvent::Accepted(Box::new(layout.clone()))) {
                return false;
            }
        }
        let sent = self.send(AttemptEvent::Progress {
            attempt: p.attempt,
            attempts: p.attempts,
            unique: p.unique,
            best_score: p.best.map(|b| b.metrics.score),
        });
        sent && !self.cancel.is_cancelled()
    }

    fn on_beam_step(&self, _attempt: usize, _step: usize, _leading_placed: usize) -> bool {
        !self.cancel.is_cancelled()
    }
}

/// Starts `optimizer` on its own thread, drawing every random choice from `rng`.
pub fn spawn<R>(optimizer: Optimizer, words: Vec<String>, mut rng: R) -> WorkerHandle
where
    R: RandomSource + 'static,
{
    let (tx, events) = mpsc::channel();
    let cancel = CancelHandle::default();
    let progress = ChannelProgress {
        tx: Mutex::new(tx),
        cancel: cancel.clone(),
    };

    let join = thread::spawn(move || {
        let result = optimizer.run(&words, &mut rng, &progress);
        let event = match &result {
            Ok(summary) => AttemptEvent::Finished(Box::new(summary.clone())),
            Err(e) => {
                warn!("Search worker failed: {}", e);
                AttemptEvent::Failed(e.to_string())
            }
        };
        progress.send(event);
        result
    });

    WorkerHandle {
        events,
        cancel,
        join,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::optimizer::{OptimizationOptions, Silent};
    use crate::rng;
    use crate::scorer::Scorer;

    fn optimizer(attempts: usize) -> Optimizer {
        let mut cfg = Config::default();
        cfg.search.attempts = attempts;
        Optimizer::new(Arc::new(Scorer::default()), OptimizationOptions::from(&cfg))
    }

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn streams_progress_then_finishes() {
        let handle = spawn(optimizer(5), words(&["CAT", "TAR", "ART"]), rng::seeded(Some(3)));
        let events: Vec<AttemptEvent> = handle.events.iter().collect();

        let progress = events
            .iter()
            .filter(|e| matches!(e, AttemptEvent::Progress { .. }))
            .count();
        assert_eq!(progress, 5);
        assert!(matches!(events.last(), Some(AttemptEvent::Finished(_))));

        let accepted = events
            .iter()
            .filter(|e| matches!(e, AttemptEvent::Accepted(_)))
            .count();
        let summary = handle.join().unwrap();
        assert_eq!(accepted, summary.candidates.len());
    }

    #[test]
    fn cancel_stops_the_worker() {
        let handle = spawn(optimizer(10_000), words(&["STONE", "NOTES", "TONE"]), rng::seeded(Some(1)));
        // Wait for the first attempt, then stop
        for event in handle.events.iter() {
            if matches!(event, AttemptEvent::Progress { .. }) {
                handle.cancel.cancel();
                break;
            }
        }
        let summary = handle.join().unwrap();
        assert!(summary.cancelled);
        assert!(summary.attempts_run < 10_000);
    }

    #[test]
    fn same_seed_matches_direct_run() {
        let ws = words(&["CAT", "TAR", "ART", "RAT"]);
        let streamed = spawn(optimizer(8), ws.clone(), rng::seeded(Some(77))).join().unwrap();
        let direct = optimizer(8)
            .run(&ws, &mut rng::seeded(Some(77)), &Silent)
            .unwrap();
        assert_eq!(streamed, direct);
    }

    /// Linear congruential source, independent of fastrand.
    struct Lcg(u64);

    impl RandomSource for Lcg {
        fn below(&mut self, n: usize) -> usize {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((self.0 >> 33) as usize) % n
        }

        fn coin(&mut self) -> bool {
            self.below(2) == 1
        }

        fn fork(&mut self) -> Self {
            Lcg(self.below(usize::MAX) as u64 ^ 0x9E37_79B9_7F4A_7C15)
        }
    }

    #[test]
    fn custom_source_drives_the_worker() {
        let ws = words(&["CAT", "TAR", "ART", "RAT"]);
        let streamed = spawn(optimizer(6), ws.clone(), Lcg(11)).join().unwrap();
        let direct = optimizer(6).run(&ws, &mut Lcg(11), &Silent).unwrap();
        assert_eq!(streamed, direct);
        assert_eq!(streamed.attempts_run, 6);
    }
}
