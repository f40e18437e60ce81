use std::ffi::c_void;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

/// Why the body did not produce a value.
pub(crate) enum Failure<E> {
    Work(E),
    Panicked(String),
}

pub(crate) type Outcome<R, E> = std::result::Result<R, Failure<E>>;

/// A heap slot for exactly one `Outcome<R, E>`.
///
/// The slot is allocated uninitialized. Initializing consumes it and yields the
/// type-erased pointer that crosses the thread boundary, so it cannot be
/// initialized twice. `consume` turns that pointer back into the outcome and
/// frees the allocation.
pub(crate) struct ResultBox<R, E> {
    storage: Box<MaybeUninit<Outcome<R, E>>>,
}

impl<R, E> ResultBox<R, E> {
    pub fn allocate() -> Self {
        ResultBox {
            storage: Box::new(MaybeUninit::uninit()),
        }
    }

    pub fn initialize_success(self, value: R) -> NonNull<c_void> {
        self.initialize(Ok(value))
    }

    pub fn initialize_failure(self, failure: Failure<E>) -> NonNull<c_void> {
        self.initialize(Err(failure))
    }

    fn initialize(self, outcome: Outcome<R, E>) -> NonNull<c_void> {
        let mut storage = self.storage;
        unsafe { storage.as_mut_ptr().write(outcome) };
        let raw = Box::into_raw(storage) as *mut c_void;
        // `Box::into_raw` never returns null.
        unsafe { NonNull::new_unchecked(raw) }
    }

    /// Move the outcome out and free the box.
    ///
    /// # Safety
    ///
    /// `raw` must come from `initialize_success` or `initialize_failure` on a
    /// `ResultBox<R, E>` of these exact `R` and `E`, and must not be used again.
    pub unsafe fn consume(raw: NonNull<c_void>) -> Outcome<R, E> {
        // `MaybeUninit<T>` has the layout of `T`, the allocation is freed with the same layout.
        let boxed = Box::from_raw(raw.as_ptr() as *mut Outcome<R, E>);
        *boxed
    }
}
