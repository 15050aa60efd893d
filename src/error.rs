use thiserror::Error;

/// Errors surfaced by table and map operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested key is not present.
    #[error("key not found")]
    NotFound,

    /// A [`Config`](crate::Config) failed validation.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Which constraint was violated
        reason: &'static str,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Abort path for broken table invariants.
///
/// Reaching this means the resize policy or the probe bookkeeping is broken.
/// Logs at `error` level, then panics.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn invariant_violation(what: &str) -> ! {
    log::error!("hash table invariant violated: {what}");
    panic!("hash table invariant violated: {what}");
}
