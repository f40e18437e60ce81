use std::ffi::c_void;
use std::io;
use std::thread;

use crate::config::ThreadConfig;

use super::threads::{EntryFn, NativeThreads};

/// The `NativeThreads` implementation using `std::thread::Builder`.
/// It works wherever the standard library has threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdThreads;

struct RawPtr(*mut c_void);

// the pointee is owned by whoever holds the pointer, never by two threads.
unsafe impl Send for RawPtr {}

/// A spawned std thread that has not been joined yet.
pub struct StdThreadId(thread::JoinHandle<RawPtr>);

unsafe impl NativeThreads for StdThreads {
    type Id = StdThreadId;

    fn create(&self, entry: EntryFn, context: *mut c_void, config: &ThreadConfig) -> io::Result<Self::Id> {
        let mut builder = thread::Builder::new();
        if let Some(name) = config.name() {
            builder = builder.name(name.to_owned());
        }
        if let Some(size) = config.stack_size() {
            builder = builder.stack_size(size);
        }
        let context = RawPtr(context);
        builder
            .spawn(move || {
                let context = context;
                RawPtr(entry(context.0))
            })
            .map(StdThreadId)
    }

    fn join(&self, id: Self::Id) -> io::Result<*mut c_void> {
        id.0
            .join()
            .map(|ret| ret.0)
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "the native thread panicked"))
    }
}
