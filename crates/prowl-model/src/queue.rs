//! Work queue — FIFO with one exception: retried items jump to the front,
//! so a failing page is re-analyzed before unrelated discovered work.
//! Priority on items is advisory metadata only and never reorders the queue.

use std::collections::VecDeque;

use crate::types::WorkItem;

/// Ordered collection of pending work items, owned by a single scheduler.
#[derive(Debug, Default)]
pub struct WorkQueue {
    items: VecDeque<WorkItem>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append at the back (normal enqueue).
    pub fn push(&mut self, item: WorkItem) {
        self.items.push_back(item);
    }

    /// Insert at the front. Used only for retries.
    pub fn push_front(&mut self, item: WorkItem) {
        self.items.push_front(item);
    }

    pub fn pop_front(&mut self) -> Option<WorkItem> {
        self.items.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
