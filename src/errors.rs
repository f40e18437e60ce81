use std::fmt;

use failure::Fail;

/// The result type used by the OS-facing part of the bridge.
pub type Result<T> = std::result::Result<T, ThreadError>;

/// The Error type raised by the native threading layer.
/// Both io variants wrap the `errno` the OS reported.
/// There is no `From<std::io::Error>`, the caller picks the variant.
#[derive(Debug, Fail)]
pub enum ThreadError {
    #[fail(display = "Failed to launch a native thread because error [{}].", io_error)]
    /// the OS declined to create the thread, nothing was leaked and no thread exists.
    FailToLaunch {
        #[cause]
        /// the original io exception.
        io_error: std::io::Error,
    },
    #[fail(display = "Failed to join a native thread because error [{}].", io_error)]
    /// the OS refused to join an existing thread.
    FailToJoin {
        #[cause]
        /// the original io exception.
        io_error: std::io::Error,
    },
    /// The thread was joined but handed back no result box.
    #[fail(display = "The joined thread returned no result.")]
    MissingResult,
}

impl ThreadError {
    /// whether this error happened before any thread existed.
    pub fn is_launch_failure(&self) -> bool {
        match self {
            ThreadError::FailToLaunch { .. } => true,
            _ => false,
        }
    }
}

/// The error returned when awaiting a `ThreadHandle`.
///
/// `E` is the error type chosen by the body, it travels through the result box
/// untouched and comes back as `AwaitError::Work`.
#[derive(Debug)]
pub enum AwaitError<E> {
    /// the native threading layer failed.
    Thread(ThreadError),
    /// the body returned its own error.
    Work(E),
    /// the body panicked, the panic was stopped before the thread entry point.
    Panicked {
        /// the panic payload when it was a string, a placeholder otherwise.
        message: String,
    },
}

impl<E> AwaitError<E> {
    /// borrow the body's own error, if that is what happened.
    pub fn work(&self) -> Option<&E> {
        match self {
            AwaitError::Work(e) => Some(e),
            _ => None,
        }
    }

    /// take the body's own error, if that is what happened.
    pub fn into_work(self) -> Option<E> {
        match self {
            AwaitError::Work(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_panic(&self) -> bool {
        match self {
            AwaitError::Panicked { .. } => true,
            _ => false,
        }
    }
}

impl<E> From<ThreadError> for AwaitError<E> {
    fn from(err: ThreadError) -> Self {
        AwaitError::Thread(err)
    }
}

impl<E: fmt::Display> fmt::Display for AwaitError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AwaitError::Thread(err) => write!(f, "{}", err),
            AwaitError::Work(err) => write!(f, "The work failed because error [{}].", err),
            AwaitError::Panicked { message } => write!(f, "The work panicked: {}", message),
        }
    }
}

impl<E: Fail> Fail for AwaitError<E> {
    fn cause(&self) -> Option<&dyn Fail> {
        match self {
            AwaitError::Thread(err) => Some(err),
            AwaitError::Work(err) => Some(err),
            AwaitError::Panicked { .. } => None,
        }
    }
}
