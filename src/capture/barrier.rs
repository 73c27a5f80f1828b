// src/capture/barrier.rs

//! Multi-party completion barrier with a bounded wait.
//!
//! Each party registers once and receives a [`CompletionSignal`]. A signal
//! arrives at the barrier exactly once: either explicitly through
//! [`CompletionSignal::complete`], which also hands a value back to the
//! waiter, or implicitly when the signal is dropped (e.g. the owning task
//! returned early or unwound).
//!
//! Arrivals travel over an mpsc channel, so whatever a party wrote before
//! arriving is visible to the waiter once the arrival has been received. No
//! lock is involved.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

struct Arrival<T> {
    slot: usize,
    value: Option<T>,
}

/// Waiting side of the barrier.
pub struct CompletionBarrier<T> {
    tx: mpsc::UnboundedSender<Arrival<T>>,
    rx: mpsc::UnboundedReceiver<Arrival<T>>,
    slots: Vec<Option<T>>,
    arrived: usize,
}

/// Arrival token held by one party.
pub struct CompletionSignal<T> {
    slot: usize,
    tx: Option<mpsc::UnboundedSender<Arrival<T>>>,
}

impl<T> CompletionBarrier<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            slots: Vec::new(),
            arrived: 0,
        }
    }

    /// Add one party to the barrier.
    ///
    /// The returned signal's slot index is used with [`take`](Self::take) to
    /// retrieve the value that party handed back.
    pub fn register(&mut self) -> CompletionSignal<T> {
        let slot = self.slots.len();
        self.slots.push(None);
        CompletionSignal {
            slot,
            tx: Some(self.tx.clone()),
        }
    }

    pub fn parties(&self) -> usize {
        self.slots.len()
    }

    /// Parties that have not arrived yet.
    pub fn remaining(&self) -> usize {
        self.parties() - self.arrived
    }

    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    /// Wait until every registered party has arrived.
    ///
    /// Cancel safe: arrivals received before the future is dropped are kept.
    pub async fn wait(&mut self) {
        while !self.is_complete() {
            match self.rx.recv().await {
                Some(arrival) => self.record(arrival),
                // The barrier holds a sender itself, so this is unreachable
                // while `self` is alive; bail out rather than spin.
                None => break,
            }
        }
    }

    /// Wait for every party, but no longer than `grace`.
    ///
    /// Returns `true` when all parties arrived in time. Elapsing the grace is
    /// not an error; the caller decides how to treat missing parties.
    pub async fn wait_timeout(&mut self, grace: Duration) -> bool {
        if timeout(grace, self.wait()).await.is_err() {
            // A party may have arrived right at the deadline.
            while let Ok(arrival) = self.rx.try_recv() {
                self.record(arrival);
            }
        }
        self.is_complete()
    }

    /// Take the value handed back by the party owning `slot`, if it arrived
    /// with one.
    pub fn take(&mut self, slot: usize) -> Option<T> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    fn record(&mut self, arrival: Arrival<T>) {
        self.arrived += 1;
        if let Some(entry) = self.slots.get_mut(arrival.slot) {
            *entry = arrival.value;
        }
    }
}

impl<T> Default for CompletionBarrier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CompletionSignal<T> {
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Arrive at the barrier, handing `value` back to the waiter.
    pub fn complete(mut self, value: T) {
        self.arrive(Some(value));
    }

    fn arrive(&mut self, value: Option<T>) {
        if let Some(tx) = self.tx.take() {
            // The waiter may already have given up and dropped the barrier.
            let _ = tx.send(Arrival {
                slot: self.slot,
                value,
            });
        }
    }
}

impl<T> Drop for CompletionSignal<T> {
    fn drop(&mut self) {
        self.arrive(None);
    }
}
