//! Deferred, wall-clock-timed session events
//!
//! Pursuer activation and vulnerability reversion happen a fixed number of
//! milliseconds after they are requested, independent of frame rate. Each
//! entry carries the session generation it was queued in; `stop()` bumps the
//! generation so anything left over from a previous game is dropped instead
//! of touching a pursuer from a new one.

use serde::{Deserialize, Serialize};

/// What to do when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimedEvent {
    /// Let a pursuer start moving
    Activate { pursuer: u32 },
    /// End a pursuer's vulnerable window (only if `window` is still current)
    Recover { pursuer: u32, window: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Entry {
    due_ms: f64,
    generation: u32,
    seq: u64,
    event: TimedEvent,
}

/// Timer queue keyed by session generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire `delay_ms` after `now_ms`
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, generation: u32, event: TimedEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            due_ms: now_ms + delay_ms,
            generation,
            seq,
            event,
        });
    }

    /// Remove and return every event due at `now_ms` for `generation`, in
    /// firing order. Due events from other generations are discarded.
    pub fn drain_due(&mut self, now_ms: f64, generation: u32) -> Vec<TimedEvent> {
        let mut due = Vec::new();
        self.entries.retain(|entry| {
            if entry.due_ms > now_ms {
                return true;
            }
            if entry.generation == generation {
                due.push(*entry);
            } else {
                log::trace!("Dropping stale timer {:?}", entry.event);
            }
            false
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|entry| entry.event).collect()
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
