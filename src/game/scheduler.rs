//! Cancellable one-shot tasks on a virtual millisecond clock.
//!
//! The scheduler never sleeps. Whoever owns it moves time forward with
//! [`Scheduler::pop_due`], which hands back due tasks in deadline order (ties
//! fire in scheduling order). A [`TaskHandle`] can be cancelled at any point
//! before its task fires; cancelling an already fired or cancelled task is a
//! no-op.

use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    due_ms: u64,
    id: u64,
}

impl TaskHandle {
    #[cfg(test)]
    pub fn due_ms(self) -> u64 {
        self.due_ms
    }
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    pending: BTreeMap<(u64, u64), T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Scheduler {
            now_ms: 0,
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule_after(&mut self, delay_ms: u64, task: T) -> TaskHandle {
        self.schedule_at(self.now_ms.saturating_add(delay_ms), task)
    }

    pub fn schedule_at(&mut self, due_ms: u64, task: T) -> TaskHandle {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        let due_ms = due_ms.max(self.now_ms);
        self.pending.insert((due_ms, id), task);
        TaskHandle { due_ms, id }
    }

    /// Returns the task if it was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        self.pending.remove(&(handle.due_ms, handle.id))
    }

    /// Drops every pending task, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Pops the earliest task due at or before `until_ms` and moves the clock
    /// to its deadline. Once nothing else is due the clock settles on
    /// `until_ms`. The clock never moves backwards.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        match self.pending.first_key_value() {
            Some((&(due, _), _)) if due <= until_ms => {
                let (_, task) = self.pending.pop_first()?;
                self.now_ms = self.now_ms.max(due);
                Some(task)
            }
            _ => {
                self.now_ms = self.now_ms.max(until_ms);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_order() {
        let mut sched = Scheduler::new();
        sched.schedule_after(300, "c");
        sched.schedule_after(100, "a");
        sched.schedule_after(200, "b");

        let mut fired = Vec::new();
        while let Some(task) = sched.pop_due(1_000) {
            fired.push((sched.now_ms(), task));
        }
        assert_eq!(fired, vec![(100, "a"), (200, "b"), (300, "c")]);
        assert_eq!(sched.now_ms(), 1_000);
    }

    #[test]
    fn ties_keep_scheduling_order() {
        let mut sched = Scheduler::new();
        sched.schedule_after(50, 1);
        sched.schedule_after(50, 2);
        sched.schedule_after(50, 3);
        assert_eq!(sched.pop_due(50), Some(1));
        assert_eq!(sched.pop_due(50), Some(2));
        assert_eq!(sched.pop_due(50), Some(3));
        assert_eq!(sched.pop_due(50), None);
    }

    #[test]
    fn nothing_fires_before_its_deadline() {
        let mut sched = Scheduler::new();
        sched.schedule_after(500, ());
        assert_eq!(sched.pop_due(499), None);
        assert_eq!(sched.now_ms(), 499);
        assert_eq!(sched.next_due_ms(), Some(500));
        assert_eq!(sched.pop_due(500), Some(()));
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut sched = Scheduler::new();
        let keep = sched.schedule_after(10, "keep");
        let drop = sched.schedule_after(5, "drop");
        assert_eq!(sched.cancel(drop), Some("drop"));
        assert_eq!(sched.cancel(drop), None);
        assert_eq!(sched.next_due_ms(), Some(keep.due_ms()));
        assert_eq!(sched.pop_due(100), Some("keep"));
        assert_eq!(sched.cancel(keep), None);
    }

    #[test]
    fn cancel_all_empties_the_queue() {
        let mut sched = Scheduler::new();
        for delay in [1, 2, 3] {
            sched.schedule_after(delay, delay);
        }
        assert_eq!(sched.cancel_all(), 3);
        assert!(sched.is_empty());
        assert_eq!(sched.next_due_ms(), None);
    }

    #[test]
    fn clock_is_monotonic() {
        let mut sched: Scheduler<()> = Scheduler::new();
        sched.pop_due(400);
        sched.pop_due(100);
        assert_eq!(sched.now_ms(), 400);
        let handle = sched.schedule_at(50, ());
        assert_eq!(handle.due_ms(), 400);
    }
}
