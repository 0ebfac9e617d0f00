#![forbid(unsafe_code)]

//! Logging facade for the hearth crates.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported from
//! here (and from the crate root). Without it, the same macro names expand to
//! nothing so call sites compile unchanged and cost nothing at runtime.
//!
//! Call sites use the crate-root path (`hearth_core::debug!`) which resolves in
//! both configurations.

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, trace, trace_span, warn};

#[cfg(not(feature = "tracing"))]
mod disabled {
    /// Expands to nothing when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing when tracing is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// Produces an inert span when tracing is disabled.
    #[macro_export]
    macro_rules! trace_span {
        ($($arg:tt)*) => {
            $crate::logging::InertSpan
        };
    }
}

/// Stand-in for `tracing::Span` when the `tracing` feature is off.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct InertSpan;

#[cfg(not(feature = "tracing"))]
impl InertSpan {
    /// Enter the span. The returned guard does nothing.
    pub fn enter(&self) -> InertGuard {
        InertGuard
    }
}

/// Guard returned by [`InertSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct InertGuard;
