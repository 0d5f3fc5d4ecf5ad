//! Scheduler - Deferred execution on the next event-loop turn
//!
//! A FIFO of closures run by the event loop after the current event has
//! been dispatched. Key handlers use it to move their side effects out of
//! the dispatch that delivered the key, so every auto-repeat of a held key
//! is observed and applied on its own.
//!
//! Single-threaded: the queue is thread-local and never shared.
//!
//! # Example
//!
//! ```ignore
//! use spark_quick_search::state::scheduler;
//!
//! scheduler::defer(|| println!("runs after the current handler returns"));
//! assert_eq!(scheduler::pending(), 1);
//!
//! scheduler::flush(); // called by the event loop once per tick
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

thread_local! {
    static QUEUE: RefCell<VecDeque<Task>> = RefCell::new(VecDeque::new());
}

/// Queue a task for the next flush.
pub fn defer<F>(task: F)
where
    F: FnOnce() + 'static,
{
    QUEUE.with(|q| q.borrow_mut().push_back(Box::new(task)));
}

/// Run every task that was queued before this call, in order.
///
/// Tasks queued while flushing wait for the next flush. Returns the
/// number of tasks run.
pub fn flush() -> usize {
    let due = pending();
    let mut ran = 0;

    while ran < due {
        // Release the borrow before running so tasks can defer more work.
        let Some(task) = QUEUE.with(|q| q.borrow_mut().pop_front()) else {
            break;
        };
        task();
        ran += 1;
    }

    if ran > 0 {
        tracing::trace!(ran, remaining = pending(), "flushed deferred tasks");
    }
    ran
}

/// Number of tasks waiting for the next flush.
pub fn pending() -> usize {
    QUEUE.with(|q| q.borrow().len())
}

/// Drop all queued tasks without running them (for testing)
pub fn reset_scheduler() {
    QUEUE.with(|q| q.borrow_mut().clear());
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_tasks_wait_for_flush() {
        reset_scheduler();

        let ran = Rc::new(Cell::new(false));
        let ran_clone = ran.clone();
        defer(move || ran_clone.set(true));

        assert!(!ran.get());
        assert_eq!(pending(), 1);

        assert_eq!(flush(), 1);
        assert!(ran.get());
        assert_eq!(pending(), 0);
    }

    #[test]
    fn test_fifo_order() {
        reset_scheduler();

        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..5 {
            let log = log.clone();
            defer(move || log.borrow_mut().push(i));
        }

        flush();
        assert_eq!(*log.borrow(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_each_task_runs_once() {
        reset_scheduler();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        defer(move || count_clone.set(count_clone.get() + 1));

        flush();
        flush();
        flush();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_nested_defer_runs_next_turn() {
        reset_scheduler();

        let log = Rc::new(RefCell::new(Vec::new()));
        let outer_log = log.clone();
        defer(move || {
            outer_log.borrow_mut().push("outer");
            let inner_log = outer_log.clone();
            defer(move || inner_log.borrow_mut().push("inner"));
        });

        assert_eq!(flush(), 1);
        assert_eq!(*log.borrow(), vec!["outer"]);
        assert_eq!(pending(), 1);

        assert_eq!(flush(), 1);
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_reset_drops_tasks() {
        reset_scheduler();

        let ran = Rc::new(Cell::new(false));
        let ran_clone = ran.clone();
        defer(move || ran_clone.set(true));

        reset_scheduler();
        assert_eq!(flush(), 0);
        assert!(!ran.get());
    }
}
