/// Options applied to every thread a `ThreadBridge` launches.
///
/// Unset options keep the defaults of the OS (or of `std`).
///
/// ```
/// # use threadbridge::config::ThreadConfig;
/// let config = ThreadConfig::new()
///     .with_name("bridge-worker")
///     .with_stack_size(4 << 20);
/// assert_eq!(config.name(), Some("bridge-worker"));
/// assert_eq!(config.stack_size(), Some(4 << 20));
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ThreadConfig {
    name: Option<String>,
    stack_size: Option<usize>,
}

impl ThreadConfig {
    /// create a config leaving everything to the OS.
    pub fn new() -> Self {
        ThreadConfig::default()
    }

    /// name the launched threads.
    /// POSIX threads on Linux keep only the first 15 bytes.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// the stack size of launched threads, in bytes.
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = Some(size);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().map(String::as_str)
    }

    pub fn stack_size(&self) -> Option<usize> {
        self.stack_size
    }
}
