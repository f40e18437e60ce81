use std::ffi::c_void;
use std::io;

use crate::config::ThreadConfig;

/// The only function signature the OS will start a thread with.
pub type EntryFn = extern "C" fn(*mut c_void) -> *mut c_void;

/// The common abstraction of a native threading layer.
///
/// It only knows about untyped entry points and untyped return slots,
/// the `ThreadBridge` builds typed work on top of it.
///
/// # Safety
///
/// The bridge hands ownership of a heap allocation through `context`,
/// so implementations must uphold:
///
/// - when `create` returns `Ok`, `entry` is called with `context` exactly once;
/// - when `create` returns `Err`, `entry` has not been and will never be called;
/// - `join` only returns `Ok` after `entry` has returned, and returns exactly
///   the pointer `entry` returned.
pub unsafe trait NativeThreads: Clone + Send + Sync + 'static {
    /// identifies a created, not yet joined thread.
    type Id: Send + 'static;

    /// like `pthread_create`, start a thread running `entry(context)`.
    fn create(&self, entry: EntryFn, context: *mut c_void, config: &ThreadConfig) -> io::Result<Self::Id>;

    /// like `pthread_join`, block until the thread ends and take its return value.
    fn join(&self, id: Self::Id) -> io::Result<*mut c_void>;
}
