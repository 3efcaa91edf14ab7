//! Execution contexts for background work and callback delivery.

use std::collections::VecDeque;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::warn;

/// A unit of work handed to an executor
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Somewhere jobs can run
pub trait Executor: Send + Sync {
    fn execute(&self, job: Job);
}

/// Runs every job inline on the thread that submits it
#[derive(Debug, Default, Clone, Copy)]
pub struct SynchronousExecutor;

impl Executor for SynchronousExecutor {
    fn execute(&self, job: Job) {
        job();
    }
}

/// Fixed set of named worker threads fed from one queue.
///
/// Dropping the pool lets queued jobs finish, then joins the workers.
pub struct ThreadPool {
    name: String,
    sender: Mutex<Option<Sender<Job>>>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Spawn `size` workers named `<name>-<n>`
    pub fn new(name: impl Into<String>, size: usize) -> io::Result<Self> {
        let name = name.into();
        let (sender, receiver) = mpsc::channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(size.max(1));
        for n in 0..size.max(1) {
            let receiver = receiver.clone();
            let worker = thread::Builder::new()
                .name(format!("{}-{}", name, n))
                .spawn(move || worker_loop(receiver))?;
            workers.push(worker);
        }

        Ok(ThreadPool {
            name,
            sender: Mutex::new(Some(sender)),
            workers,
        })
    }

    /// Pool sized to the available parallelism of the machine
    pub fn with_default_size(name: impl Into<String>) -> io::Result<Self> {
        let size = thread::available_parallelism().map(|n| n.get()).unwrap_or(4);
        Self::new(name, size)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }
}

fn worker_loop(receiver: Arc<Mutex<Receiver<Job>>>) {
    loop {
        let job = match receiver.lock() {
            Ok(rx) => rx.recv(),
            Err(_) => break,
        };

        match job {
            Ok(job) => {
                if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                    warn!(
                        thread = thread::current().name().unwrap_or("unnamed"),
                        "job panicked"
                    );
                }
            }
            Err(_) => break,
        }
    }
}

impl Executor for ThreadPool {
    fn execute(&self, job: Job) {
        let sender = match self.sender.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        };

        match sender {
            Some(sender) => {
                if sender.send(job).is_err() {
                    warn!(pool = %self.name, "thread pool is shut down, job dropped");
                }
            }
            None => warn!(pool = %self.name, "thread pool is shut down, job dropped"),
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        if let Ok(mut sender) = self.sender.lock() {
            sender.take();
        }

        let current = thread::current().id();
        for worker in self.workers.drain(..) {
            // A worker dropping the last reference to its own pool cannot join itself
            if worker.thread().id() != current {
                let _ = worker.join();
            }
        }
    }
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("name", &self.name)
            .field("size", &self.workers.len())
            .finish()
    }
}

/// Queue of jobs run only when its owner drains it.
///
/// Lets a single-threaded caller (an event loop, a UI thread, a test)
/// receive callbacks on its own thread.
#[derive(Clone, Default)]
pub struct CallbackQueue {
    inner: Arc<(Mutex<VecDeque<Job>>, Condvar)>,
}

impl CallbackQueue {
    pub fn new() -> Self {
        CallbackQueue::default()
    }

    /// Number of jobs waiting to run
    pub fn pending(&self) -> usize {
        let (lock, _) = &*self.inner;
        lock.lock().map(|queue| queue.len()).unwrap_or(0)
    }

    /// Run every job queued so far on the current thread; returns how many ran
    pub fn run_pending(&self) -> usize {
        let jobs: Vec<Job> = {
            let (lock, _) = &*self.inner;
            match lock.lock() {
                Ok(mut queue) => queue.drain(..).collect(),
                Err(_) => return 0,
            }
        };

        let count = jobs.len();
        for job in jobs {
            job();
        }
        count
    }

    /// Wait up to `timeout` for one job and run it on the current thread
    pub fn run_next(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let (lock, cvar) = &*self.inner;

        let job = {
            let mut queue = match lock.lock() {
                Ok(queue) => queue,
                Err(_) => return false,
            };
            loop {
                if let Some(job) = queue.pop_front() {
                    break job;
                }
                let now = Instant::now();
                if now >= deadline {
                    return false;
                }
                queue = match cvar.wait_timeout(queue, deadline - now) {
                    Ok((queue, _)) => queue,
                    Err(_) => return false,
                };
            }
        };

        job();
        true
    }
}

impl Executor for CallbackQueue {
    fn execute(&self, job: Job) {
        let (lock, cvar) = &*self.inner;
        if let Ok(mut queue) = lock.lock() {
            queue.push_back(job);
            cvar.notify_all();
        }
    }
}

impl std::fmt::Debug for CallbackQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

/// Runs jobs on the blocking pool of a tokio runtime
#[cfg(feature = "async")]
#[derive(Debug, Clone)]
pub struct TokioExecutor {
    handle: tokio::runtime::Handle,
}

#[cfg(feature = "async")]
impl TokioExecutor {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        TokioExecutor { handle }
    }

    /// Executor for the runtime the caller is running in, if any
    pub fn current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }
}

#[cfg(feature = "async")]
impl Executor for TokioExecutor {
    fn execute(&self, job: Job) {
        self.handle.spawn_blocking(job);
    }
}
