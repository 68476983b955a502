//! One-shot deferred tasks
//!
//! The host clock is injected (milliseconds). Tasks fire when `take_due` is
//! polled at or after their due time; a cancelled task never fires.

/// Cancellation handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    handle: TaskHandle,
    due_at: f64,
    task: T,
}

/// Pending one-shot tasks ordered by due time
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Schedule `task` to fire at `due_at` (ms)
    pub fn schedule(&mut self, due_at: f64, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        // Keep entries sorted by due time; equal times fire in schedule order
        let index = self.entries.partition_point(|e| e.due_at <= due_at);
        self.entries.insert(
            index,
            Entry {
                handle,
                due_at,
                task,
            },
        );
        handle
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Cancel everything, returning how many tasks were dropped
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    /// Remove and return every task due at `now`, earliest first
    pub fn take_due(&mut self, now: f64) -> Vec<T> {
        let due = self.entries.partition_point(|e| e.due_at <= now);
        self.entries.drain(..due).map(|e| e.task).collect()
    }

    /// Due time of the earliest pending task
    pub fn next_due(&self) -> Option<f64> {
        self.entries.first().map(|e| e.due_at)
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
