#![allow(dead_code)]

use std::ffi::c_void;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use failure::Fail;

use threadbridge::NativeThreads;
use threadbridge::config::ThreadConfig;
use threadbridge::native::EntryFn;

#[derive(Debug, Clone, Eq, PartialEq, Fail)]
pub enum DomainError {
    #[fail(display = "boom")]
    Boom,
    #[fail(display = "bad input: {}", input)]
    BadInput { input: i64 },
}

/// Counts how many times it was dropped.
pub struct DropTracker(pub Arc<AtomicUsize>);

impl Drop for DropTracker {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// A threading layer that never manages to create a thread.
#[derive(Clone, Default)]
pub struct RefusingThreads {
    pub attempts: Arc<AtomicUsize>,
}

unsafe impl NativeThreads for RefusingThreads {
    type Id = ();

    fn create(&self, _entry: EntryFn, _context: *mut c_void, _config: &ThreadConfig) -> io::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::new(io::ErrorKind::WouldBlock, "no more threads"))
    }

    fn join(&self, _id: ()) -> io::Result<*mut c_void> {
        Err(io::Error::new(io::ErrorKind::Other, "nothing was launched"))
    }
}

/// A threading layer running the entry point right away, on the calling thread.
#[derive(Clone, Default)]
pub struct InlineThreads;

unsafe impl NativeThreads for InlineThreads {
    type Id = usize;

    fn create(&self, entry: EntryFn, context: *mut c_void, _config: &ThreadConfig) -> io::Result<usize> {
        Ok(entry(context) as usize)
    }

    fn join(&self, id: usize) -> io::Result<*mut c_void> {
        Ok(id as *mut c_void)
    }
}

/// Runs the entry point inline, then refuses to join.
/// The result box it got back is leaked, the bridge never sees it.
#[derive(Clone, Default)]
pub struct UnjoinableThreads;

unsafe impl NativeThreads for UnjoinableThreads {
    type Id = usize;

    fn create(&self, entry: EntryFn, context: *mut c_void, _config: &ThreadConfig) -> io::Result<usize> {
        Ok(entry(context) as usize)
    }

    fn join(&self, _id: usize) -> io::Result<*mut c_void> {
        Err(io::Error::new(io::ErrorKind::Other, "deadlock detected"))
    }
}

/// Runs nothing and hands back a null result.
#[derive(Clone, Default)]
pub struct SilentThreads;

unsafe impl NativeThreads for SilentThreads {
    type Id = ();

    fn create(&self, entry: EntryFn, context: *mut c_void, _config: &ThreadConfig) -> io::Result<()> {
        // the entry still has to run once to release the context.
        let _leaked_result = entry(context);
        Ok(())
    }

    fn join(&self, _id: ()) -> io::Result<*mut c_void> {
        Ok(std::ptr::null_mut())
    }
}
