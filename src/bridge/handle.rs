use std::ffi::c_void;
use std::marker::PhantomData;
use std::ptr::NonNull;

use log::{debug, error, warn};

use crate::errors::{AwaitError, ThreadError};
use crate::native::{DefaultThreads, NativeThreads};

use super::result_box::{Failure, Outcome, ResultBox};
use super::trampoline::LaunchId;

/// A running (or finished, not yet joined) thread whose work produces `Result<R, E>`.
///
/// Joining consumes the handle, so a result box is read at most once.
/// Dropping an unjoined handle still joins the thread, then throws the result away.
pub struct ThreadHandle<R, E, T: NativeThreads = DefaultThreads> {
    id: LaunchId,
    native: Option<T::Id>,
    threads: T,
    _result: PhantomData<fn() -> (R, E)>,
}

impl<R, E, T: NativeThreads> ThreadHandle<R, E, T> {
    pub(crate) fn new(id: LaunchId, native: T::Id, threads: T) -> Self {
        ThreadHandle {
            id,
            native: Some(native),
            threads,
            _result: PhantomData,
        }
    }

    pub fn launch_id(&self) -> LaunchId {
        self.id
    }

    /// Block until the thread ends and take its result.
    ///
    /// # Error
    ///
    /// `AwaitError::Work` carries the body's own error unchanged,
    /// `AwaitError::Panicked` reports a panic inside the body,
    /// `AwaitError::Thread` reports a failure of the native threading layer.
    pub fn join(mut self) -> Result<R, AwaitError<E>> {
        let native = match self.native.take() {
            Some(native) => native,
            // only `join(self)` and `drop` take it, and both end the handle.
            None => unreachable!("worker {} was already reaped", self.id),
        };
        match reclaim::<R, E, T>(&self.threads, native, self.id)? {
            Ok(value) => Ok(value),
            Err(Failure::Work(err)) => Err(AwaitError::Work(err)),
            Err(Failure::Panicked(message)) => Err(AwaitError::Panicked { message }),
        }
    }
}

impl<R, E, T: NativeThreads> Drop for ThreadHandle<R, E, T> {
    fn drop(&mut self) {
        if let Some(native) = self.native.take() {
            warn!("handle of worker {} dropped without join, joining it now.", self.id);
            if let Err(err) = reclaim::<R, E, T>(&self.threads, native, self.id) {
                error!(target: "app::error", "failed to reap worker {}: {}", self.id, err);
            }
        }
    }
}

fn reclaim<R, E, T: NativeThreads>(
    threads: &T,
    native: T::Id,
    id: LaunchId,
) -> Result<Outcome<R, E>, ThreadError> {
    let raw: *mut c_void = threads.join(native).map_err(|io_error| {
        error!(target: "app::error", "failed to join worker {}: {}", id, io_error);
        ThreadError::FailToJoin { io_error }
    })?;
    let raw = NonNull::new(raw).ok_or(ThreadError::MissingResult)?;
    debug!("worker {} joined.", id);
    // the handle was built by `ThreadBridge::launch` from a `Runnable<R, E>`,
    // and the threading layer hands back what the trampoline returned.
    Ok(unsafe { ResultBox::<R, E>::consume(raw) })
}
