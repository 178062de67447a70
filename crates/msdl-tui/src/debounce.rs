//! Keystroke debouncing for incremental search.
//!
//! Semantics: at most one pending scheduled search. Scheduling a new one
//! replaces any pending one (last-write-wins), implemented as a generation
//! counter — the browser version's timer-handle reassignment made explicit.
//! The poll-based event loop asks the debouncer every tick whether the quiet
//! interval has elapsed; there is no timer thread.
//!
//! Time is injected by the caller, which keeps the scheme fully
//! deterministic under test.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    interval: Duration,
    /// Monotonically increasing id; each schedule supersedes the last.
    generation: u64,
    pending: Option<Pending>,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    generation: u64,
    deadline: Instant,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            generation: 0,
            pending: None,
        }
    }

    /// Schedule a task to fire one quiet interval after `now`, cancelling
    /// any pending one. Returns the new task's generation.
    pub fn schedule(&mut self, now: Instant) -> u64 {
        self.generation += 1;
        self.pending = Some(Pending {
            generation: self.generation,
            deadline: now + self.interval,
        });
        self.generation
    }

    /// Drop the pending task, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Fire the pending task if its deadline has passed. Returns the fired
    /// generation at most once per schedule.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        match self.pending {
            Some(p) if now >= p.deadline => {
                self.pending = None;
                Some(p.generation)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(300);

    #[test]
    fn does_not_fire_before_deadline() {
        let mut d = Debouncer::new(INTERVAL);
        let t0 = Instant::now();
        d.schedule(t0);
        assert!(d.is_pending());
        assert_eq!(d.poll(t0), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(299)), None);
        assert!(d.is_pending());
    }

    #[test]
    fn fires_exactly_once_after_deadline() {
        let mut d = Debouncer::new(INTERVAL);
        let t0 = Instant::now();
        let gen = d.schedule(t0);
        assert_eq!(d.poll(t0 + INTERVAL), Some(gen));
        // Fired tasks do not fire again.
        assert_eq!(d.poll(t0 + INTERVAL * 2), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn rescheduling_supersedes_the_pending_task() {
        let mut d = Debouncer::new(INTERVAL);
        let t0 = Instant::now();
        let first = d.schedule(t0);
        // A keystroke 100 ms later pushes the deadline out.
        let second = d.schedule(t0 + Duration::from_millis(100));
        assert!(second > first);

        // The original deadline passes without firing,
        assert_eq!(d.poll(t0 + INTERVAL), None);
        // and only the superseding generation ever fires.
        assert_eq!(
            d.poll(t0 + Duration::from_millis(100) + INTERVAL),
            Some(second)
        );
    }

    #[test]
    fn cancel_drops_the_pending_task() {
        let mut d = Debouncer::new(INTERVAL);
        let t0 = Instant::now();
        d.schedule(t0);
        d.cancel();
        assert!(!d.is_pending());
        assert_eq!(d.poll(t0 + INTERVAL), None);
    }

    #[test]
    fn generations_are_strictly_increasing() {
        let mut d = Debouncer::new(INTERVAL);
        let t0 = Instant::now();
        let gens: Vec<u64> = (0..5).map(|_| d.schedule(t0)).collect();
        assert_eq!(gens, vec![1, 2, 3, 4, 5]);
    }
}
