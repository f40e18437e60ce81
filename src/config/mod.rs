pub use thread::ThreadConfig;

/// the logging config.
pub mod log4rs;
mod thread;
