use std::collections::BTreeMap;
use std::time::Duration;

/// Timer and redraw services the host provides to a dial.
///
/// The dial never spawns threads or owns timers. It asks for one delayed
/// callback at a time and expects the host to call back into
/// [`Dial::tick`](super::Dial::tick) when the delay elapses.
pub trait Scheduler {
    type Handle;

    fn schedule_after(&mut self, delay: Duration) -> Self::Handle;

    /// Cancels a callback that has not fired yet.
    fn cancel(&mut self, handle: Self::Handle);

    fn request_redraw(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Deterministic scheduler driven by hand, for tests and headless hosts.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<TimerId, Duration>,
    redraws: usize,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn redraws(&self) -> usize {
        self.redraws
    }

    /// Delay until the earliest pending callback, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.values().min().map(|due| due.saturating_sub(self.now))
    }

    /// Removes the earliest callback due at or before `deadline` and moves the
    /// clock to its fire time. The caller then invokes the dial's tick.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerId> {
        let (&id, &due) = self
            .pending
            .iter()
            .filter(|&(_, &due)| due <= deadline)
            .min_by_key(|&(&id, &due)| (due, id))?;
        self.pending.remove(&id);
        self.now = self.now.max(due);
        Some(id)
    }

    /// Moves the clock forward without firing anything.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Scheduler for VirtualClock {
    type Handle = TimerId;

    fn schedule_after(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, self.now + delay);
        id
    }

    fn cancel(&mut self, handle: TimerId) {
        self.pending.remove(&handle);
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_due_fires_in_deadline_order() {
        let mut clock = VirtualClock::new();
        let late = clock.schedule_after(Duration::from_millis(100));
        let early = clock.schedule_after(Duration::from_millis(10));

        assert_eq!(clock.pop_due(Duration::from_millis(5)), None);
        assert_eq!(clock.pop_due(Duration::from_millis(200)), Some(early));
        assert_eq!(clock.now(), Duration::from_millis(10));
        assert_eq!(clock.pop_due(Duration::from_millis(200)), Some(late));
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut clock = VirtualClock::new();
        let id = clock.schedule_after(Duration::ZERO);
        clock.cancel(id);
        clock.cancel(id);

        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.pop_due(Duration::MAX), None);
    }
}
