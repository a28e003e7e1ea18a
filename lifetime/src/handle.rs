//! Typed identity tokens for tracked resources.

use std::{
    any::type_name,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// Identity of a resource tracked by a [`Lifetime`](crate::Lifetime).
///
/// A handle is a plain token: it does not borrow from the container and does
/// not keep the resource alive. Every installed resource gets an identity
/// that is never reused, so once the resource is released or replaced the
/// handle is stale and every lookup against it fails.
pub struct Handle<T: ?Sized> {
    id: u64,
    marker: PhantomData<fn() -> T>,
}

impl<T: ?Sized> Handle<T> {
    pub(crate) fn new(id: u64) -> Self {
        Handle {
            id,
            marker: PhantomData,
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}

impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Handle<T> {}

impl<T: ?Sized> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: ?Sized> Eq for Handle<T> {}

impl<T: ?Sized> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl<T: ?Sized> fmt::Debug for Handle<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "Handle<{}>(#{})", type_name::<T>(), self.id)
    }
}
