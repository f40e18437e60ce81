use log::{debug, error};

use crate::config::ThreadConfig;
use crate::errors::{AwaitError, Result, ThreadError};
use crate::native::{DefaultThreads, NativeThreads};

pub use self::handle::ThreadHandle;
pub use self::runnable::Runnable;
pub use self::trampoline::LaunchId;

use self::trampoline::{trampoline, Launch};

mod handle;
mod result_box;
mod runnable;
mod trampoline;

/// The mapped diagnostic context key holding the launch id on worker threads.
pub const LAUNCH_MDC_KEY: &str = "bridge_launch";

/// Launches typed work on native threads and joins it back.
///
/// Every launch moves a `Runnable` to the heap and hands the only pointer to it
/// over to the new thread, which runs it and hands back the only pointer to its
/// result. No locks are involved: at any moment exactly one thread owns each
/// of the two allocations, and the native join orders the worker's write of the
/// result before the joiner's read.
///
/// ```
/// # use threadbridge::ThreadBridge;
/// let bridge: ThreadBridge = ThreadBridge::default();
/// let handle = bridge.spawn(20, |a: i32| Ok::<_, ()>(a + 22)).unwrap();
/// assert_eq!(handle.join().unwrap(), 42);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThreadBridge<T: NativeThreads = DefaultThreads> {
    threads: T,
    config: ThreadConfig,
}

impl<T: NativeThreads> ThreadBridge<T> {
    /// create a bridge over `threads`, with OS default thread options.
    pub fn new(threads: T) -> Self {
        Self::with_config(threads, ThreadConfig::default())
    }

    pub fn with_config(threads: T, config: ThreadConfig) -> Self {
        ThreadBridge { threads, config }
    }

    pub fn config(&self) -> &ThreadConfig {
        &self.config
    }

    /// like `thread::spawn`, but `body` receives `argument` and may fail.
    pub fn spawn<A, F, R, E>(&self, argument: A, body: F) -> Result<ThreadHandle<R, E, T>>
        where
            A: Send + 'static,
            F: FnOnce(A) -> std::result::Result<R, E> + Send + 'static,
            R: Send + 'static,
            E: Send + 'static,
    {
        self.launch(Runnable::with_argument(argument, body))
    }

    /// like `spawn`, for a body without argument.
    pub fn spawn_fn<F, R, E>(&self, body: F) -> Result<ThreadHandle<R, E, T>>
        where
            F: FnOnce() -> std::result::Result<R, E> + Send + 'static,
            R: Send + 'static,
            E: Send + 'static,
    {
        self.launch(Runnable::new(body))
    }

    /// Start a native thread running `runnable`.
    ///
    /// # Error
    ///
    /// When the OS refuses to create the thread, `ThreadError::FailToLaunch` is
    /// returned. The runnable (with everything its body captured) is dropped
    /// on the calling thread before returning, nothing keeps running.
    pub fn launch<R, E>(&self, runnable: Runnable<R, E>) -> Result<ThreadHandle<R, E, T>> {
        let id = LaunchId::next();
        let context = Box::new(Launch {
            id,
            runnable: runnable.into_erased(),
        })
        .into_context();
        match self.threads.create(trampoline, context, &self.config) {
            Ok(native) => {
                debug!("worker {} launched.", id);
                Ok(ThreadHandle::new(id, native, self.threads.clone()))
            }
            Err(io_error) => {
                // no thread took the context, so it is still ours.
                drop(unsafe { Launch::from_context(context) });
                error!(target: "app::error", "failed to launch worker {}: {}", id, io_error);
                Err(ThreadError::FailToLaunch { io_error })
            }
        }
    }
}

/// Launch `body(argument)` on a new native thread with the default bridge.
pub fn spawn<A, F, R, E>(argument: A, body: F) -> Result<ThreadHandle<R, E>>
    where
        A: Send + 'static,
        F: FnOnce(A) -> std::result::Result<R, E> + Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
{
    ThreadBridge::<DefaultThreads>::default().spawn(argument, body)
}

/// Launch `body()` on a new native thread with the default bridge.
pub fn spawn_fn<F, R, E>(body: F) -> Result<ThreadHandle<R, E>>
    where
        F: FnOnce() -> std::result::Result<R, E> + Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
{
    ThreadBridge::<DefaultThreads>::default().spawn_fn(body)
}

/// Wait for the thread behind `handle` and take its result.
pub fn await_result<R, E, T: NativeThreads>(handle: ThreadHandle<R, E, T>) -> std::result::Result<R, AwaitError<E>> {
    handle.join()
}
