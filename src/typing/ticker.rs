//! Ticker Actor: dedicated thread emitting the typing cadence.
//!
//! One ticker exists per animation run. It only produces timing events;
//! all state changes happen on the thread that receives them.

use super::RunId;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A tick event sent at regular intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// The run this tick belongs to.
    pub run: RunId,
    /// Tick number within the run (monotonically increasing).
    pub frame: u64,
    /// Time elapsed since the ticker was started.
    pub elapsed: Duration,
}

/// Ticker actor that generates regular timing events for one run.
pub struct TickerActor {
    /// Handle to the ticker thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Receiver for tick events.
    tick_rx: Receiver<Tick>,
}

impl TickerActor {
    /// Spawn a ticker for `run` firing every `interval`.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the ticker thread.
    pub fn spawn(run: RunId, interval: Duration) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        // Small buffer: a slow receiver skips ticks instead of queueing them.
        let (tick_tx, tick_rx) = bounded(2);

        let handle = thread::Builder::new()
            .name(format!("codereel-ticker-{}", run.0))
            .spawn(move || {
                Self::run_loop(&tick_tx, &shutdown_clone, run, interval);
            })
            .expect("Failed to spawn ticker thread");

        Self {
            handle: Some(handle),
            shutdown,
            tick_rx,
        }
    }

    /// Get a reference to the tick receiver.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// Signal the ticker to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Stop the ticker and wait for its thread to exit.
    ///
    /// Once this returns no further tick can be produced, and any tick still
    /// buffered is dropped together with the receiver.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("ticker thread panicked");
            }
        }
    }

    /// Main ticker loop.
    fn run_loop(tick_tx: &Sender<Tick>, shutdown: &AtomicBool, run: RunId, interval: Duration) {
        let start = Instant::now();
        let mut frame = 0u64;
        let mut next_tick = start + interval;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                let tick = Tick {
                    run,
                    frame,
                    elapsed: now - start,
                };

                match tick_tx.try_send(tick) {
                    Ok(()) | Err(crossbeam_channel::TrySendError::Full(_)) => {}
                    // Receiver dropped: the run is gone.
                    Err(crossbeam_channel::TrySendError::Disconnected(_)) => break,
                }

                frame += 1;
                next_tick += interval;

                // Behind schedule: resynchronize instead of bursting.
                if next_tick < now {
                    next_tick = now + interval;
                }
            } else {
                let sleep_duration = next_tick - now;
                thread::sleep(sleep_duration.min(Duration::from_millis(1)));
            }
        }
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for TickerActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickerActor")
            .field("running", &!self.shutdown.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_basic() {
        let ticker = TickerActor::spawn(RunId(7), Duration::from_millis(5));

        let tick = ticker
            .receiver()
            .recv_timeout(Duration::from_millis(500))
            .unwrap();
        assert_eq!(tick.run, RunId(7));
        assert_eq!(tick.frame, 0);

        let tick2 = ticker.receiver().recv_timeout(Duration::from_millis(500));
        assert!(tick2.is_ok());

        ticker.join();
    }

    #[test]
    fn test_ticker_join_stops_ticks() {
        let ticker = TickerActor::spawn(RunId(1), Duration::from_millis(1));
        let rx = ticker.receiver().clone();
        ticker.join();

        // Drain whatever was buffered before the join; nothing new may arrive.
        while rx.try_recv().is_ok() {}
        thread::sleep(Duration::from_millis(20));
        assert!(rx.try_recv().is_err());
    }
}
