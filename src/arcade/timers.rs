//! Fire-and-forget timers on the scene clock.
//!
//! Timers cannot be cancelled individually; dropping the queue (a round
//! restart) is the only way to discard pending ones.

/// Slack for float drift when a timer lands exactly on a step boundary.
const DUE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
struct Timer<E> {
    due: f64,
    seq: u64,
    event: E,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    /// Scene clock in seconds
    now: f64,
    next_seq: u64,
    pending: Vec<Timer<E>>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Schedule `event` to fire `delay_ms` milliseconds from now.
    pub fn schedule(&mut self, delay_ms: u64, event: E) {
        self.pending.push(Timer {
            due: self.now + delay_ms as f64 / 1000.0,
            seq: self.next_seq,
            event,
        });
        self.next_seq += 1;
    }

    /// Advance the clock by `dt` seconds and return every event that came
    /// due, ordered by due time then scheduling order.
    pub fn advance(&mut self, dt: f64) -> Vec<E> {
        self.now += dt;
        let now = self.now + DUE_EPSILON;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.due <= now);
        self.pending = pending;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|t| t.event).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut timers = TimerQueue::new();
        timers.schedule(100, "cancel");
        assert!(timers.advance(0.05).is_empty());
        assert_eq!(timers.advance(0.05), vec!["cancel"]);
        assert!(timers.advance(1.0).is_empty());
    }

    #[test]
    fn test_fires_on_exact_frame_boundary() {
        let mut timers = TimerQueue::new();
        timers.schedule(100, ());
        let mut fired = 0;
        for _ in 0..6 {
            fired += timers.advance(1.0 / 60.0).len();
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_order_by_due_then_schedule() {
        let mut timers = TimerQueue::new();
        timers.schedule(50, "b");
        timers.schedule(20, "a");
        timers.schedule(50, "c");
        assert_eq!(timers.advance(0.1), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_overlapping_timers_each_fire() {
        let mut timers = TimerQueue::new();
        timers.schedule(100, 1);
        timers.advance(0.05);
        timers.schedule(100, 2);
        assert_eq!(timers.advance(0.05), vec![1]);
        assert_eq!(timers.advance(0.05), vec![2]);
    }

    #[test]
    fn test_delay_counts_from_current_clock() {
        let mut timers = TimerQueue::new();
        timers.advance(0.25);
        timers.advance(0.25);
        timers.schedule(100, "late");
        assert!(timers.advance(0.05).is_empty());
        assert_eq!(timers.advance(0.05), vec!["late"]);
    }
}
