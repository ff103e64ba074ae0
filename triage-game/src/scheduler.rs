//! Discrete timer queue for background decay and transition steps.
//!
//! Tasks carry the session generation they were scheduled under. The session
//! compares that id at fire time, so work queued before a reset can never
//! touch the new playthrough.
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

/// Generation id of one playthrough. A reset mints a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    SlaDecay,
    TransitionStep { transition: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub due_ms: u64,
    pub seq: u64,
    pub session: SessionId,
    pub kind: TaskKind,
}

// Ordering: (due_ms, seq) so tasks due together fire in scheduling order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Queued(ScheduledTask);

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .due_ms
            .cmp(&other.0.due_ms)
            .then_with(|| self.0.seq.cmp(&other.0.seq))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Queued>>,
    now_ms: u64,
    next_seq: u64,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queue `kind` to fire `delay_ms` after the current clock.
    pub fn schedule(&mut self, delay_ms: u64, session: SessionId, kind: TaskKind) -> ScheduledTask {
        let task = ScheduledTask {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq: self.next_seq,
            session,
            kind,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(Queued(task)));
        task
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<ScheduledTask> {
        let due = self.queue.peek()?.0.0.due_ms;
        if due > until_ms {
            return None;
        }
        let Reverse(Queued(task)) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(task.due_ms);
        Some(task)
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|task| task.0.0.due_ms)
    }

    #[must_use]
    pub fn has(&self, kind: TaskKind) -> bool {
        self.queue.iter().any(|task| task.0.0.kind == kind)
    }

    /// Drop every queued task of `kind`.
    pub fn cancel(&mut self, kind: TaskKind) {
        self.queue.retain(|task| task.0.0.kind != kind);
    }

    /// Drop every queued transition step, whatever transition it belongs to.
    pub fn cancel_transitions(&mut self) {
        self.queue
            .retain(|task| !matches!(task.0.0.kind, TaskKind::TransitionStep { .. }));
    }

    pub fn cancel_all(&mut self) {
        self.queue.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: SessionId = SessionId(7);

    #[test]
    fn pops_in_due_then_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(200, S, TaskKind::SlaDecay);
        scheduler.schedule(100, S, TaskKind::TransitionStep { transition: 1 });
        scheduler.schedule(100, S, TaskKind::TransitionStep { transition: 2 });

        let first = scheduler.pop_due(1_000).unwrap();
        assert_eq!(first.kind, TaskKind::TransitionStep { transition: 1 });
        assert_eq!(scheduler.now_ms(), 100);
        let second = scheduler.pop_due(1_000).unwrap();
        assert_eq!(second.kind, TaskKind::TransitionStep { transition: 2 });
        let third = scheduler.pop_due(1_000).unwrap();
        assert_eq!(third.kind, TaskKind::SlaDecay);
        assert_eq!(scheduler.now_ms(), 200);
        assert!(scheduler.pop_due(1_000).is_none());
    }

    #[test]
    fn cancel_transitions_keeps_decay() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(100, S, TaskKind::TransitionStep { transition: 1 });
        scheduler.schedule(200, S, TaskKind::SlaDecay);
        scheduler.schedule(300, S, TaskKind::TransitionStep { transition: 2 });
        scheduler.cancel_transitions();
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.has(TaskKind::SlaDecay));
    }

    #[test]
    fn future_tasks_stay_queued() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(5_000, S, TaskKind::SlaDecay);
        assert!(scheduler.pop_due(4_999).is_none());
        assert_eq!(scheduler.next_due(), Some(5_000));
        assert!(scheduler.pop_due(5_000).is_some());
    }

    #[test]
    fn delays_are_relative_to_the_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(1_000);
        let task = scheduler.schedule(250, S, TaskKind::SlaDecay);
        assert_eq!(task.due_ms, 1_250);
        scheduler.advance_to(10);
        assert_eq!(scheduler.now_ms(), 1_000);
    }

    #[test]
    fn cancel_by_kind_and_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(10, S, TaskKind::SlaDecay);
        scheduler.schedule(20, S, TaskKind::TransitionStep { transition: 3 });
        scheduler.cancel(TaskKind::SlaDecay);
        assert!(!scheduler.has(TaskKind::SlaDecay));
        assert_eq!(scheduler.len(), 1);
        scheduler.cancel_all();
        assert!(scheduler.is_empty());
    }
}
