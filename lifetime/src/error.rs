//! Errors reported by the container.

use failure::Error;

/// Failure to register a resource with a [`Lifetime`](crate::Lifetime).
///
/// Either way the resource that was being tracked has already been passed
/// to its release function: nothing is leaked and nothing is left half
/// registered.
#[derive(Clone, Copy, Debug, Fail)]
pub enum TrackError {
    /// The container's configured slot limit is reached.
    #[fail(display = "slot limit reached")]
    LimitReached,

    /// Growing the slot bookkeeping failed.
    #[fail(display = "out of memory for slot bookkeeping")]
    OutOfMemory,
}

/// The container does not own a resource with the given identity.
#[derive(Clone, Copy, Debug, Fail)]
#[fail(display = "resource is not tracked by this lifetime")]
pub struct NotTracked;

/// Failure to replace a tracked resource in place.
#[derive(Debug, Fail)]
pub enum ResetError {
    /// The container does not own a resource with the given identity.
    #[fail(display = "resource is not tracked by this lifetime")]
    NotTracked,

    /// The replacement constructor failed. The old resource has already
    /// been released and its slot removed from the teardown order.
    #[fail(display = "replacement constructor failed: {}", _0)]
    Constructor(Error),
}

impl From<NotTracked> for ResetError {
    fn from(_: NotTracked) -> Self {
        ResetError::NotTracked
    }
}
