//! Serialises evaluations for one map so the newest click always wins.
//!
//! Every click gets a ticket. Starting a new evaluation aborts the one in
//! flight, and a finished evaluation is only published while its ticket is
//! still the latest, so a slow response can never overwrite a newer popup
//! or overlay.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use inondable_core::{Coordinate, EligibilityResult};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::EligibilityAggregator;

/// A result the adapter should render.
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub ticket: u64,
    pub coordinate: Coordinate,
    pub result: EligibilityResult,
}

pub struct EvaluationSession {
    aggregator: Arc<EligibilityAggregator>,
    latest: Arc<AtomicU64>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
    tx: watch::Sender<Option<Published>>,
}

impl EvaluationSession {
    pub fn new(aggregator: Arc<EligibilityAggregator>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            aggregator,
            latest: Arc::new(AtomicU64::new(0)),
            in_flight: Mutex::new(None),
            tx,
        }
    }

    /// Receiver for published results; holds `None` until the first one.
    pub fn subscribe(&self) -> watch::Receiver<Option<Published>> {
        self.tx.subscribe()
    }

    /// Start evaluating a click, superseding any pending one.
    ///
    /// Returns the click's ticket. Must be called from within a tokio runtime.
    pub fn click(&self, coordinate: Coordinate, secondary_zone_context: bool) -> u64 {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let aggregator = Arc::clone(&self.aggregator);
        let latest = Arc::clone(&self.latest);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let result = aggregator
                .evaluate(coordinate, secondary_zone_context)
                .await;
            let published = Published {
                ticket,
                coordinate,
                result,
            };
            let sent = tx.send_if_modified(|current| {
                let newer_shown = current.as_ref().is_some_and(|p| p.ticket > ticket);
                if newer_shown || latest.load(Ordering::SeqCst) != ticket {
                    return false;
                }
                *current = Some(published);
                true
            });
            if !sent {
                debug!(ticket, "discarding superseded evaluation");
            }
        });

        if let Some(previous) = in_flight.replace(handle) {
            previous.abort();
        }
        ticket
    }

    /// Ticket of the most recent click, 0 before any.
    pub fn latest_ticket(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

impl Drop for EvaluationSession {
    fn drop(&mut self) {
        let in_flight = self.in_flight.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = in_flight.take() {
            handle.abort();
        }
    }
}
