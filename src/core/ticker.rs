//! Periodic clock refresh for live views.
//!
//! A [`Ticker`] owns a background thread that emits [`ClockEvent::Tick`]
//! on a fixed schedule. Dropping the ticker stops and joins the thread, so
//! a view that owns one cannot leave a dangling periodic callback behind.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{Sender, tick, unbounded};
use crossbeam::select;

use crate::error::JwtLensError;

/// Events delivered to a live view's event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// Re-sample the clock and redraw.
    Tick,
    /// Leave the loop (e.g. Ctrl-C).
    Stop,
}

/// A running periodic tick source.
#[derive(Debug)]
pub struct Ticker {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start sending a tick to `events` every `interval`.
    ///
    /// The thread also exits on its own once `events` has no receiver.
    pub fn start(interval: Duration, events: Sender<ClockEvent>) -> Result<Self, JwtLensError> {
        let (stop_tx, stop_rx) = unbounded::<()>();
        let ticker = tick(interval);

        let handle = thread::Builder::new()
            .name("clock-ticker".to_string())
            .spawn(move || {
                loop {
                    select! {
                        recv(stop_rx) -> _ => break,
                        recv(ticker) -> _ => {
                            if events.send(ClockEvent::Tick).is_err() {
                                break;
                            }
                        }
                    }
                }
                tracing::trace!("clock ticker stopped");
            })
            .map_err(|e| JwtLensError::Io {
                context: "failed to start clock ticker".to_string(),
                reason: e.to_string(),
            })?;

        tracing::trace!(?interval, "clock ticker started");
        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop the ticker and wait for its thread to exit.
    pub fn stop(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("clock ticker thread panicked");
            }
        }
    }

    /// Whether the background thread is still running.
    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}
