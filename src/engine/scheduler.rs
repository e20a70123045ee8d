// Deferred one-shot events scheduled against the frame clock

/// Identifier returned by [`DeferredQueue::schedule`], used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// A single pending event
#[derive(Debug, Clone)]
struct Deferred<E> {
    id: TimerId,
    due: f32,
    event: E,
}

/// Queue of events that fire once at a given clock time
///
/// Events are plain values handed back to the owner when due, so nothing in
/// the queue can outlive the actor that owns it: dropping the owner drops
/// every pending event with it. Handlers for drained events must tolerate
/// running after the state that scheduled them has already changed.
#[derive(Debug)]
pub struct DeferredQueue<E> {
    pending: Vec<Deferred<E>>,
    next_id: u64,
}

impl<E> DeferredQueue<E> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `event` to fire `delay` seconds after `now`
    pub fn schedule(&mut self, now: f32, delay: f32, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Deferred {
            id,
            due: now + delay.max(0.0),
            event,
        });
        id
    }

    /// Cancel a pending event
    /// Returns true if the event was still pending
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if let Some(pos) = self.pending.iter().position(|entry| entry.id == id) {
            self.pending.remove(pos);
            true
        } else {
            false
        }
    }

    /// Drop every pending event
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Check if an event is still pending
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|entry| entry.id == id)
    }

    /// Remove and return every event due at or before `now`
    ///
    /// Events come out in due order; ties keep scheduling order.
    pub fn drain_due(&mut self, now: f32) -> Vec<E> {
        if !self.pending.iter().any(|entry| entry.due <= now) {
            return Vec::new();
        }

        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|entry| entry.due <= now);
        self.pending = pending;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.id.0.cmp(&b.id.0)));
        due.into_iter().map(|entry| entry.event).collect()
    }

    /// Get the number of pending events
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E> Default for DeferredQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Ping,
        Pong,
    }

    #[test]
    fn test_queue_creation() {
        let queue: DeferredQueue<Event> = DeferredQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_event_not_due_early() {
        let mut queue = DeferredQueue::new();
        queue.schedule(1.0, 0.5, Event::Ping);

        assert!(queue.drain_due(1.25).is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_event_due_on_exact_time() {
        let mut queue = DeferredQueue::new();
        queue.schedule(1.0, 0.5, Event::Ping);

        assert_eq!(queue.drain_due(1.5), vec![Event::Ping]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_fires_once() {
        let mut queue = DeferredQueue::new();
        queue.schedule(0.0, 0.25, Event::Ping);

        assert_eq!(queue.drain_due(1.0).len(), 1);
        assert!(queue.drain_due(2.0).is_empty());
    }

    #[test]
    fn test_due_order() {
        let mut queue = DeferredQueue::new();
        queue.schedule(0.0, 0.75, Event::Pong);
        queue.schedule(0.0, 0.25, Event::Ping);

        assert_eq!(queue.drain_due(1.0), vec![Event::Ping, Event::Pong]);
    }

    #[test]
    fn test_cancel() {
        let mut queue = DeferredQueue::new();
        let id = queue.schedule(0.0, 0.5, Event::Ping);
        assert!(queue.is_pending(id));

        assert!(queue.cancel(id));
        assert!(!queue.is_pending(id));
        assert!(!queue.cancel(id), "Cancelling twice should report nothing pending");
        assert!(queue.drain_due(1.0).is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = DeferredQueue::new();
        queue.schedule(0.0, 0.5, Event::Ping);
        queue.schedule(0.0, 0.5, Event::Pong);
        queue.cancel_all();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_negative_delay_fires_next_drain() {
        let mut queue = DeferredQueue::new();
        queue.schedule(2.0, -1.0, Event::Ping);
        assert_eq!(queue.drain_due(2.0), vec![Event::Ping]);
    }
}
