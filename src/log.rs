//! Logging for resolution and rendering.
//!
//! `debug!` marks drawing-level events: a resolution pass with its ratio and
//! frame, a constraint or dimension being set, a marker being generated, a
//! finished render. `trace!` follows single shapes and axes inside a pass.
//!
//! With the `tracing` feature these are the `tracing` macros; without it they
//! expand to nothing.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, trace};
