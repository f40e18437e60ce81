use std::ffi::c_void;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::ptr::NonNull;

use log::error;
use panic_control::ThreadResultExt;

use super::result_box::{Failure, ResultBox};

/// Work whose result type has been forgotten.
pub(crate) trait ErasedRunnable: Send {
    /// Run the work once and box whatever came out of it.
    /// Nothing unwinds out of this call.
    fn run(self: Box<Self>) -> NonNull<c_void>;
}

struct Work<F, R, E> {
    body: F,
    _result: PhantomData<fn() -> (R, E)>,
}

impl<F, R, E> ErasedRunnable for Work<F, R, E>
    where
        F: FnOnce() -> Result<R, E> + Send,
{
    fn run(self: Box<Self>) -> NonNull<c_void> {
        let body = self.body;
        let caught = panic::catch_unwind(AssertUnwindSafe(body));
        let message = caught.panic_value_as_str().map(str::to_owned);
        match caught {
            Ok(Ok(value)) => ResultBox::<R, E>::allocate().initialize_success(value),
            Ok(Err(err)) => ResultBox::<R, E>::allocate().initialize_failure(Failure::Work(err)),
            Err(_) => {
                let message = message.unwrap_or_else(|| "<non-string panic payload>".to_owned());
                error!(target: "app::error", "the work panicked: {}", message);
                ResultBox::<R, E>::allocate().initialize_failure(Failure::Panicked(message))
            }
        }
    }
}

/// A unit of work producing `Result<R, E>`, ready to be launched by a `ThreadBridge`.
///
/// It owns the body and its argument until a thread runs it.
/// The result type stays on this handle (and later on the `ThreadHandle`),
/// while the threading layer only sees an erased runnable.
pub struct Runnable<R, E> {
    inner: Box<dyn ErasedRunnable>,
    _result: PhantomData<fn() -> (R, E)>,
}

impl<R, E> Runnable<R, E>
    where
        R: Send + 'static,
        E: Send + 'static,
{
    /// wrap a body taking no argument.
    pub fn new<F>(body: F) -> Self
        where
            F: FnOnce() -> Result<R, E> + Send + 'static,
    {
        Runnable {
            inner: Box::new(Work {
                body,
                _result: PhantomData,
            }),
            _result: PhantomData,
        }
    }

    /// wrap a body with the argument it will be called with.
    pub fn with_argument<A, F>(argument: A, body: F) -> Self
        where
            A: Send + 'static,
            F: FnOnce(A) -> Result<R, E> + Send + 'static,
    {
        Runnable::new(move || body(argument))
    }
}

impl<R, E> Runnable<R, E> {
    pub(crate) fn into_erased(self) -> Box<dyn ErasedRunnable> {
        self.inner
    }
}
