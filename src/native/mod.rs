pub use threads::{EntryFn, NativeThreads};
pub use portable::{StdThreadId, StdThreads};
#[cfg(unix)]
pub use posix::{PosixThreadId, PosixThreads};

mod threads;
mod portable;
#[cfg(unix)]
mod posix;

/// The threading layer `ThreadBridge::default()` uses.
#[cfg(unix)]
pub type DefaultThreads = PosixThreads;
/// The threading layer `ThreadBridge::default()` uses.
#[cfg(not(unix))]
pub type DefaultThreads = StdThreads;
