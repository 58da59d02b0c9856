use std::collections::BTreeMap;
use std::time::Instant;

/// Handle to one scheduled timer, used to cancel it.
///
/// Ordered by deadline, then by scheduling order, so timers sharing a
/// deadline fire first-in first-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerKey {
    deadline: Instant,
    seq: u64,
}

impl TimerKey {
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// Deadline-ordered queue of cancellable one-shot timers.
///
/// Nothing fires on its own: the owner polls [`TimerQueue::pop_due`] from
/// its frame loop.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: BTreeMap<TimerKey, T>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, deadline: Instant, payload: T) -> TimerKey {
        let key = TimerKey {
            deadline,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.entries.insert(key, payload);
        key
    }

    /// Cancel a timer. Returns its payload if it had not fired yet.
    pub fn cancel(&mut self, key: TimerKey) -> Option<T> {
        self.entries.remove(&key)
    }

    /// Pop the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<T> {
        let (key, _) = self.entries.first_key_value()?;
        if key.deadline > now {
            return None;
        }
        self.entries.pop_first().map(|(_, payload)| payload)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.keys().next().map(TimerKey::deadline)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
