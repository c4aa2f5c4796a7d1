//! Background flush worker for asynchronous write mode.
//!
//! All asynchronous writes funnel through one thread, so a flush requested
//! later can never be overtaken by a stale earlier one.

use std::sync::mpsc;
use std::thread;

/// Background thread that performs flushes requested through a channel.
/// Joins the thread on drop so nothing leaks.
pub struct AsyncFlushWorker {
    join_handle: Option<thread::JoinHandle<()>>,
}

impl AsyncFlushWorker {
    /// Spawn a worker. The caller keeps the sender side of `rx` and drops it
    /// when the store is done. The worker then drains whatever is still
    /// queued and exits, so pending writes complete before teardown.
    pub fn start<F>(flush_fn: F, rx: mpsc::Receiver<()>) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let join_handle = thread::spawn(move || {
            while rx.recv().is_ok() {
                // Coalesce a burst of requests: every flush writes the
                // current full snapshot, so one write covers all of them.
                while rx.try_recv().is_ok() {}
                flush_fn();
            }
        });

        Self {
            join_handle: Some(join_handle),
        }
    }
}

impl Drop for AsyncFlushWorker {
    fn drop(&mut self) {
        // The owning store disconnects the sender before dropping us.
        if let Some(h) = self.join_handle.take() {
            let _ = h.join();
        }
    }
}
