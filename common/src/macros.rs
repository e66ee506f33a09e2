//! Thin wrappers over `tracing` used by the I/O layers.
//!
//! `success!` is routed to its own target so the terminal formatter can give
//! it a distinct symbol.

#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        $crate::__tracing::info!(target: "lanward::success", $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::__tracing::info!($($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::__tracing::warn!($($arg)+)
    };
}
