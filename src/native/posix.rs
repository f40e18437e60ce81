use std::ffi::{c_void, CString};
use std::io;
use std::mem;
use std::ptr;

use log::debug;

use crate::config::ThreadConfig;

use super::threads::{EntryFn, NativeThreads};

/// The `NativeThreads` implementation on top of `pthread_create` and `pthread_join`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixThreads;

/// A `pthread_t` that has not been joined yet.
#[derive(Debug)]
pub struct PosixThreadId(libc::pthread_t);

// `pthread_t` is an opaque pointer on some platforms, but any thread may join it.
unsafe impl Send for PosixThreadId {}

struct Attributes(libc::pthread_attr_t);

impl Attributes {
    fn new() -> io::Result<Self> {
        let mut attr: libc::pthread_attr_t = unsafe { mem::zeroed() };
        check(unsafe { libc::pthread_attr_init(&mut attr) })?;
        Ok(Attributes(attr))
    }
}

impl Drop for Attributes {
    fn drop(&mut self) {
        unsafe { libc::pthread_attr_destroy(&mut self.0) };
    }
}

/// pthread functions return the errno instead of setting it.
fn check(code: libc::c_int) -> io::Result<()> {
    if code == 0 {
        Ok(())
    } else {
        Err(io::Error::from_raw_os_error(code))
    }
}

/// The name as the kernel will keep it: 15 bytes plus the NUL.
fn thread_name(name: &str) -> Option<CString> {
    let mut end = name.len().min(15);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    match CString::new(&name[..end]) {
        Ok(name) => Some(name),
        Err(err) => {
            debug!("unable to name thread: {}", err);
            None
        }
    }
}

#[cfg(target_os = "linux")]
fn name_current_thread(name: &CString) -> libc::c_int {
    unsafe { libc::pthread_setname_np(libc::pthread_self(), name.as_ptr()) }
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
fn name_current_thread(name: &CString) -> libc::c_int {
    unsafe { libc::pthread_setname_np(name.as_ptr()) }
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "ios")))]
fn name_current_thread(_name: &CString) -> libc::c_int {
    libc::ENOSYS
}

/// What a POSIX thread starts with: the caller's entry and context, plus the
/// name to take before running them.
struct Start {
    name: Option<CString>,
    entry: EntryFn,
    context: *mut c_void,
}

extern "C" fn start(raw: *mut c_void) -> *mut c_void {
    let Start { name, entry, context } = *unsafe { Box::from_raw(raw as *mut Start) };
    if let Some(name) = name {
        let code = name_current_thread(&name);
        if code != 0 {
            debug!("unable to name thread: {}", io::Error::from_raw_os_error(code));
        }
    }
    entry(context)
}

unsafe impl NativeThreads for PosixThreads {
    type Id = PosixThreadId;

    fn create(&self, entry: EntryFn, context: *mut c_void, config: &ThreadConfig) -> io::Result<Self::Id> {
        let mut attr = Attributes::new()?;
        if let Some(size) = config.stack_size() {
            check(unsafe { libc::pthread_attr_setstacksize(&mut attr.0, size) })?;
        }
        let start_with = Box::into_raw(Box::new(Start {
            name: config.name().and_then(thread_name),
            entry,
            context,
        }));
        let mut native: libc::pthread_t = unsafe { mem::zeroed() };
        let code = unsafe { libc::pthread_create(&mut native, &attr.0, start, start_with as *mut c_void) };
        if code != 0 {
            // the thread never ran, `context` goes back to the caller untouched.
            drop(unsafe { Box::from_raw(start_with) });
            return Err(io::Error::from_raw_os_error(code));
        }
        Ok(PosixThreadId(native))
    }

    fn join(&self, id: Self::Id) -> io::Result<*mut c_void> {
        let mut ret: *mut c_void = ptr::null_mut();
        check(unsafe { libc::pthread_join(id.0, &mut ret) })?;
        Ok(ret)
    }
}
