//! Callback delivery for calls issued through a module's async API.
//!
//! A call is a blocking unit of work submitted to the background executor.
//! Its single result is handed to the callback executor, which invokes
//! exactly one of [`Callback::on_success`] or [`Callback::on_failure`].

use crate::error::{CmaError, Result};
use crate::executor::Executor;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

/// Receiver of one async call's outcome
pub trait Callback<T>: Send + 'static {
    fn on_success(self, value: T);

    fn on_failure(self, error: CmaError);
}

impl<T, F> Callback<T> for F
where
    F: FnOnce(Result<T>) + Send + 'static,
{
    fn on_success(self, value: T) {
        self(Ok(value))
    }

    fn on_failure(self, error: CmaError) {
        self(Err(error))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallStatus {
    Pending,
    Delivering,
    Resolved,
    Cancelled,
}

/// Handle to one in-flight async call
#[derive(Clone)]
pub struct CallHandle {
    state: Arc<(Mutex<CallStatus>, Condvar)>,
}

impl CallHandle {
    fn new() -> Self {
        CallHandle {
            state: Arc::new((Mutex::new(CallStatus::Pending), Condvar::new())),
        }
    }

    fn status(&self) -> CallStatus {
        let (lock, _) = &*self.state;
        lock.lock().map(|s| *s).unwrap_or(CallStatus::Resolved)
    }

    fn transition(&self, from: CallStatus, to: CallStatus) -> bool {
        let (lock, cvar) = &*self.state;
        match lock.lock() {
            Ok(mut status) if *status == from => {
                *status = to;
                cvar.notify_all();
                true
            }
            _ => false,
        }
    }

    /// Stop the result from reaching the callback.
    ///
    /// Returns `false` when delivery already started. The network call
    /// itself is not interrupted.
    pub fn cancel(&self) -> bool {
        self.transition(CallStatus::Pending, CallStatus::Cancelled)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status() == CallStatus::Cancelled
    }

    /// Whether the callback has returned
    pub fn is_resolved(&self) -> bool {
        self.status() == CallStatus::Resolved
    }

    /// Block until the callback has returned or the call was cancelled.
    /// Returns `false` on timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let (lock, cvar) = &*self.state;
        let mut status = match lock.lock() {
            Ok(status) => status,
            Err(_) => return false,
        };

        while matches!(*status, CallStatus::Pending | CallStatus::Delivering) {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            status = match cvar.wait_timeout(status, deadline - now) {
                Ok((status, _)) => status,
                Err(_) => return false,
            };
        }
        true
    }
}

impl std::fmt::Debug for CallHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallHandle").field("status", &self.status()).finish()
    }
}

/// Marks a handle resolved once the callback returns, even by unwinding
struct Delivered<'a>(&'a CallHandle);

impl Drop for Delivered<'_> {
    fn drop(&mut self) {
        self.0.transition(CallStatus::Delivering, CallStatus::Resolved);
    }
}

/// The background and callback execution contexts of a client
#[derive(Clone)]
pub struct AsyncBridge {
    background: Arc<dyn Executor>,
    callback: Arc<dyn Executor>,
}

impl AsyncBridge {
    pub fn new(background: Arc<dyn Executor>, callback: Arc<dyn Executor>) -> Self {
        AsyncBridge {
            background,
            callback,
        }
    }

    /// Run `work` on the background context and deliver its result to
    /// `callback` on the callback context.
    ///
    /// Never fails from the caller's point of view: errors returned by
    /// `work`, including validation errors, and panics inside it all reach
    /// [`Callback::on_failure`].
    pub fn defer<T, W, C>(&self, work: W, callback: C) -> CallHandle
    where
        T: Send + 'static,
        W: FnOnce() -> Result<T> + Send + 'static,
        C: Callback<T>,
    {
        let handle = CallHandle::new();
        let delivery = handle.clone();
        let callback_executor = self.callback.clone();

        self.background.execute(Box::new(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(work))
                .unwrap_or_else(|_| Err(CmaError::Other("background call panicked".to_string())));

            callback_executor.execute(Box::new(move || {
                if !delivery.transition(CallStatus::Pending, CallStatus::Delivering) {
                    debug!("call was cancelled, dropping its result");
                    return;
                }
                let _delivered = Delivered(&delivery);

                match result {
                    Ok(value) => callback.on_success(value),
                    Err(error) => callback.on_failure(error),
                }
            }));
        }));

        handle
    }
}

impl std::fmt::Debug for AsyncBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncBridge").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::executor::{CallbackQueue, SynchronousExecutor, ThreadPool};
    use std::sync::mpsc;
    use std::thread;

    struct Recorder {
        tx: mpsc::Sender<std::result::Result<u32, ErrorKind>>,
    }

    impl Callback<u32> for Recorder {
        fn on_success(self, value: u32) {
            self.tx.send(Ok(value)).unwrap();
        }

        fn on_failure(self, error: CmaError) {
            self.tx.send(Err(error.kind())).unwrap();
        }
    }

    #[test]
    fn test_work_and_delivery_run_on_separate_contexts() {
        let background = Arc::new(ThreadPool::new("bg", 1).unwrap());
        let queue = CallbackQueue::new();
        let bridge = AsyncBridge::new(background, Arc::new(queue.clone()));
        let caller = thread::current().id();
        let (tx, rx) = mpsc::channel();

        let work_tx = tx.clone();
        let handle = bridge.defer(
            move || {
                work_tx.send(("work", thread::current().id())).unwrap();
                Ok(7u32)
            },
            move |result: Result<u32>| {
                assert_eq!(result.unwrap(), 7);
                tx.send(("callback", thread::current().id())).unwrap();
            },
        );

        let (label, worker) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(label, "work");
        assert_ne!(worker, caller);

        assert!(queue.run_next(Duration::from_secs(5)));
        let (label, deliverer) = rx.recv().unwrap();
        assert_eq!(label, "callback");
        assert_eq!(deliverer, caller);
        assert!(handle.is_resolved());
    }

    #[test]
    fn test_failure_reaches_callback() {
        let bridge = AsyncBridge::new(Arc::new(SynchronousExecutor), Arc::new(SynchronousExecutor));
        let (tx, rx) = mpsc::channel();

        bridge.defer(|| Err(CmaError::validation("spaceId")), Recorder { tx });
        assert_eq!(rx.recv().unwrap(), Err(ErrorKind::Validation));
    }

    #[test]
    fn test_panic_becomes_failure() {
        let bridge = AsyncBridge::new(Arc::new(SynchronousExecutor), Arc::new(SynchronousExecutor));
        let (tx, rx) = mpsc::channel();

        let handle = bridge.defer(|| -> Result<u32> { panic!("broken") }, Recorder { tx });
        assert_eq!(rx.recv().unwrap(), Err(ErrorKind::Other));
        assert!(handle.wait_timeout(Duration::from_secs(1)));
    }

    #[test]
    fn test_cancel_suppresses_delivery() {
        let queue = CallbackQueue::new();
        let bridge = AsyncBridge::new(Arc::new(SynchronousExecutor), Arc::new(queue.clone()));
        let (tx, rx) = mpsc::channel();

        let handle = bridge.defer(|| Ok(1u32), Recorder { tx });
        assert!(handle.cancel());
        assert_eq!(queue.run_pending(), 1);

        assert!(rx.try_recv().is_err());
        assert!(handle.is_cancelled());
        assert!(!handle.cancel());
    }

    #[test]
    fn test_cancel_after_delivery_is_rejected() {
        let bridge = AsyncBridge::new(Arc::new(SynchronousExecutor), Arc::new(SynchronousExecutor));
        let (tx, rx) = mpsc::channel();

        let handle = bridge.defer(|| Ok(3u32), Recorder { tx });
        assert_eq!(rx.recv().unwrap(), Ok(3));
        assert!(!handle.cancel());
        assert!(handle.is_resolved());
    }
}
