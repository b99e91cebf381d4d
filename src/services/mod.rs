//! Services the browser runs on
//!
//! Background-task plumbing, time, and the terminal/logging setup used by
//! the binary.

pub mod async_bridge;
#[cfg(feature = "runtime")]
pub mod log_dirs;
#[cfg(feature = "runtime")]
pub mod terminal_modes;
pub mod time_source;
#[cfg(feature = "runtime")]
pub mod tracing_setup;
