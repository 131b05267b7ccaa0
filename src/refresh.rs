//! Refresh sequencing
//!
//! Fetches are never cancelled, so responses can resolve out of order.
//! Every fetch is tagged with a sequence number and a response is applied
//! only if it carries the latest number issued; older ones are discarded.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Monotonic request counter
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next sequence number
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

/// The single "currently displayed" value plus the sequence guarding it
#[derive(Debug, Clone)]
pub struct DisplaySlot<T> {
    sequence: RequestSequence,
    current: Option<T>,
    applied: Option<u64>,
}

impl<T> Default for DisplaySlot<T> {
    fn default() -> Self {
        Self {
            sequence: RequestSequence::new(),
            current: None,
            applied: None,
        }
    }
}

impl<T> DisplaySlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a sequence number for a new fetch
    pub fn issue(&mut self) -> u64 {
        self.sequence.issue()
    }

    /// Whether a response tagged `seq` would still be applied
    pub fn is_current(&self, seq: u64) -> bool {
        self.sequence.is_latest(seq)
    }

    /// Replace the displayed value if `seq` is the latest issued.
    /// Returns false (and drops `value`) for stale responses.
    pub fn apply(&mut self, seq: u64, value: T) -> bool {
        if !self.is_current(seq) {
            warn!(
                "REFRESH: discarding stale response seq={} (latest={})",
                seq,
                self.sequence.latest()
            );
            return false;
        }
        debug!("REFRESH: applying response seq={}", seq);
        self.current = Some(value);
        self.applied = Some(seq);
        true
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Sequence number of the displayed value
    pub fn applied_seq(&self) -> Option<u64> {
        self.applied
    }

    /// Drop the displayed value (e.g. when the sport or date changes)
    pub fn clear(&mut self) {
        self.current = None;
        self.applied = None;
    }
}

/// Call `on_tick` every `period`, starting one period from now.
///
/// The ticker never waits on the work it triggers; it stops when `on_tick`
/// returns false.
pub fn spawn_ticker<F>(period: Duration, mut on_tick: F) -> JoinHandle<()>
where
    F: FnMut() -> bool + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval.tick().await; // First tick completes immediately

        loop {
            interval.tick().await;
            if !on_tick() {
                debug!("REFRESH: ticker stopped");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_sequence_is_monotonic() {
        let mut seq = RequestSequence::new();
        assert_eq!(seq.latest(), 0);
        assert_eq!(seq.issue(), 1);
        assert_eq!(seq.issue(), 2);
        assert!(seq.is_latest(2));
        assert!(!seq.is_latest(1));
    }

    #[test]
    fn test_latest_response_wins() {
        let mut slot = DisplaySlot::new();
        let first = slot.issue();
        let second = slot.issue();

        // Newer response resolves first, then the stale one arrives
        assert!(slot.apply(second, "second"));
        assert!(!slot.apply(first, "first"));
        assert_eq!(slot.current(), Some(&"second"));
        assert_eq!(slot.applied_seq(), Some(second));
    }

    #[test]
    fn test_in_order_responses() {
        let mut slot = DisplaySlot::new();
        let first = slot.issue();
        assert!(slot.apply(first, 1));
        let second = slot.issue();
        assert!(slot.is_current(second));
        assert!(!slot.is_current(first));
        assert!(slot.apply(second, 2));
        assert_eq!(slot.current(), Some(&2));
    }

    #[test]
    fn test_clear_keeps_sequence() {
        let mut slot = DisplaySlot::new();
        let seq = slot.issue();
        slot.apply(seq, "x");
        slot.clear();
        assert_eq!(slot.current(), None);
        assert!(slot.is_current(seq));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_fires_each_period_until_stopped() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let handle = spawn_ticker(Duration::from_secs(60), move || {
            counter.fetch_add(1, Ordering::SeqCst) + 1 < 3
        });

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(200)).await;
        handle.await.unwrap();
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }
}
