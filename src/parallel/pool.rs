//! Fixed-size worker pool.
//!
//! A thin layer over [`rayon::ThreadPool`]. Queueing and scheduling are left
//! to rayon; the engines only need three things from it:
//!
//! - [`WorkerPool::run`]: enter the pool and block until the closure returns
//! - [`fork_join`]: keep one branch on the current worker, offer the sibling
//!   to the pool, and block until both finish
//! - [`WorkerPool::scope`]: a completion barrier for dynamically sized task
//!   trees; it returns only after every task spawned into it has exited
//!
//! A panic in any task resurfaces at the joining caller.

use crate::error::Result;

/// A fixed set of workers draining a shared task queue.
///
/// ```
/// use u_forkjoin::WorkerPool;
///
/// let pool = WorkerPool::new(2).unwrap();
/// assert_eq!(pool.run(|| 6 * 7), 42);
/// ```
///
/// Fork-join helpers are internal to the engines:
///
/// ```compile_fail
/// use u_forkjoin::parallel::fork_join;
/// ```
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Starts `workers` named worker threads.
    pub fn new(workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("u-forkjoin-worker-{i}"))
            .build()?;
        tracing::debug!("Started worker pool with {} workers", workers);
        Ok(Self { pool, workers })
    }

    /// Number of workers in the pool.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs `op` on a pool worker and blocks until it returns.
    ///
    /// Work forked inside `op` stays within this pool.
    pub fn run<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// Opens a completion barrier.
    ///
    /// Tasks spawned through the scope (and, transitively, by those tasks)
    /// may borrow data that outlives the call; `scope` returns only when the
    /// last of them has exited.
    pub(crate) fn scope<'scope, R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce(&rayon::Scope<'scope>) -> R + Send,
        R: Send,
    {
        self.pool.scope(op)
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers)
            .finish()
    }
}

/// Runs `local` on the calling worker while `remote` is offered to the
/// pool, then blocks until both have finished.
///
/// Must be called from inside [`WorkerPool::run`] or a pool task.
pub(crate) fn fork_join<L, R, RL, RR>(local: L, remote: R) -> (RL, RR)
where
    L: FnOnce() -> RL + Send,
    R: FnOnce() -> RR + Send,
    RL: Send,
    RR: Send,
{
    rayon::join(local, remote)
}
