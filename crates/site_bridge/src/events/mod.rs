//! Dispatch queue for the host loop
//!
//! Key principles:
//! - Immediate events go out on the next dispatch, in send order
//! - Deferred events wait for their delivery tick, then go out in post order
//! - The queue never calls handlers itself; the host drains it and routes
//!
//! Ticks are plain counters advanced by the host once per pump, so scripted
//! sessions and tests are deterministic.

use std::collections::VecDeque;

/// Event queue with immediate and tick-deferred delivery
#[derive(Debug)]
pub struct EventQueue<E> {
    immediate_queue: VecDeque<E>,
    deferred_queue: Vec<(u64, E)>,
    current_tick: u64,
}

impl<E> EventQueue<E> {
    /// Create a new empty queue at tick 0
    pub fn new() -> Self {
        Self {
            immediate_queue: VecDeque::new(),
            deferred_queue: Vec::new(),
            current_tick: 0,
        }
    }

    /// Current tick
    pub fn tick(&self) -> u64 {
        self.current_tick
    }

    /// Move the clock forward
    ///
    /// Ticks never go backwards; an older value is ignored.
    pub fn advance(&mut self, tick: u64) {
        self.current_tick = self.current_tick.max(tick);
    }

    /// Queue an event for the next dispatch
    pub fn send(&mut self, event: E) {
        self.immediate_queue.push_back(event);
    }

    /// Queue an event for delivery once the clock reaches `delivery_tick`
    pub fn post(&mut self, delivery_tick: u64, event: E) {
        self.deferred_queue.push((delivery_tick, event));
    }

    /// Take every event that is due now
    ///
    /// Immediate events come first, then due deferred events in the order
    /// they were posted.
    pub fn drain_due(&mut self) -> Vec<E> {
        let mut due: Vec<E> = self.immediate_queue.drain(..).collect();

        let tick = self.current_tick;
        let mut pending = Vec::with_capacity(self.deferred_queue.len());
        for (delivery_tick, event) in self.deferred_queue.drain(..) {
            if delivery_tick <= tick {
                due.push(event);
            } else {
                pending.push((delivery_tick, event));
            }
        }
        self.deferred_queue = pending;

        due
    }

    /// Number of events waiting, immediate and deferred
    pub fn len(&self) -> usize {
        self.immediate_queue.len() + self.deferred_queue.len()
    }

    /// Whether nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether deferred events remain for a later tick
    pub fn has_deferred(&self) -> bool {
        !self.deferred_queue.is_empty()
    }

    /// Clear all queued events (useful for shutdown)
    pub fn clear(&mut self) {
        self.immediate_queue.clear();
        self.deferred_queue.clear();
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Extend<E> for EventQueue<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.immediate_queue.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_dispatch() {
        let mut queue = EventQueue::new();
        queue.send("a");
        queue.send("b");

        assert_eq!(queue.drain_due(), vec!["a", "b"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_deferred_dispatch() {
        let mut queue = EventQueue::new();
        queue.post(2, "later");

        queue.advance(1);
        assert!(queue.drain_due().is_empty());
        assert_eq!(queue.len(), 1);

        queue.advance(2);
        assert_eq!(queue.drain_due(), vec!["later"]);
        assert!(!queue.has_deferred());
    }

    #[test]
    fn test_immediate_before_deferred_and_post_order_kept() {
        let mut queue = EventQueue::new();
        queue.post(1, "d1");
        queue.post(1, "d2");
        queue.send("i1");
        queue.advance(1);

        assert_eq!(queue.drain_due(), vec!["i1", "d1", "d2"]);
    }

    #[test]
    fn test_tick_is_monotonic() {
        let mut queue: EventQueue<()> = EventQueue::new();
        queue.advance(5);
        queue.advance(3);
        assert_eq!(queue.tick(), 5);
    }

    #[test]
    fn test_clear() {
        let mut queue = EventQueue::new();
        queue.send(1);
        queue.post(10, 2);
        queue.clear();
        assert!(queue.is_empty());
    }
}
