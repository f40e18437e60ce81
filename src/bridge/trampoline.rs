use std::ffi::c_void;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use super::runnable::ErasedRunnable;
use super::LAUNCH_MDC_KEY;

static NEXT_LAUNCH: AtomicU64 = AtomicU64::new(1);

/// A process-unique number given to every launch, used to correlate logs.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LaunchId(u64);

impl LaunchId {
    pub(crate) fn next() -> Self {
        LaunchId(NEXT_LAUNCH.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LaunchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the context pointer of a native thread points to.
/// `Box<dyn ErasedRunnable>` is a fat pointer, this box keeps the context thin.
pub(crate) struct Launch {
    pub id: LaunchId,
    pub runnable: Box<dyn ErasedRunnable>,
}

impl Launch {
    pub fn into_context(self: Box<Self>) -> *mut c_void {
        Box::into_raw(self) as *mut c_void
    }

    /// # Safety
    ///
    /// `context` must come from `into_context` and must not be used again.
    pub unsafe fn from_context(context: *mut c_void) -> Box<Self> {
        Box::from_raw(context as *mut Launch)
    }
}

/// The entry point of every thread launched by a `ThreadBridge`.
///
/// Takes the `Launch` back, runs it, frees the runnable and returns the result box.
pub(crate) extern "C" fn trampoline(context: *mut c_void) -> *mut c_void {
    // the creator gave up this pointer when the thread was created.
    let launch = unsafe { Launch::from_context(context) };
    let Launch { id, runnable } = *launch;
    log_mdc::insert(LAUNCH_MDC_KEY, id.as_u64().to_string());
    debug!("worker {} started.", id);
    let result = runnable.run();
    debug!("worker {} finished.", id);
    log_mdc::remove(LAUNCH_MDC_KEY);
    result.as_ptr()
}
