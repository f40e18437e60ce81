pub use bridge::{await_result, spawn, spawn_fn, LaunchId, Runnable, ThreadBridge, ThreadHandle};
pub use errors::{AwaitError, Result, ThreadError};
pub use native::{DefaultThreads, NativeThreads, StdThreads};
#[cfg(unix)]
pub use native::PosixThreads;

/// Launching and joining typed work.
pub mod bridge;
/// Thread options and the logging config.
pub mod config;
/// The error types.
pub mod errors;
/// The native threading layers the bridge runs on.
pub mod native;
