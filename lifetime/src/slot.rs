//! One tracked resource paired with its release function.

use std::{
    any::{Any, TypeId},
    mem,
    sync::atomic::{AtomicU64, Ordering},
};

use relevant::Relevant;

use crate::handle::Handle;

type ReleaseFn = Box<dyn Fn(Box<dyn Any>)>;

/// Identities are never reused, so a stale handle can't accidentally name a
/// resource installed later, and zero-sized payloads stay distinguishable.
fn next_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// A single tracked resource and the function that releases it.
///
/// A slot always owns exactly one live resource; there is no empty state.
/// The payload can be swapped any number of times with [`Slot::replace`]
/// without changing the release function. [`Slot::release`] consumes the
/// slot, so releasing twice is unrepresentable; a slot that escapes without
/// being released is reported by its `Relevant` token.
#[derive(derivative::Derivative)]
#[derivative(Debug)]
pub struct Slot {
    #[derivative(Debug = "ignore")]
    resource: Box<dyn Any>,
    #[derivative(Debug = "ignore")]
    release: ReleaseFn,
    type_id: TypeId,
    id: u64,
    relevant: Relevant,
}

impl Slot {
    /// Create a slot owning `resource`, together with the resource's
    /// identity handle.
    pub fn new<T, F>(resource: T, release: F) -> (Self, Handle<T>)
    where
        T: 'static,
        F: Fn(T) + 'static,
    {
        let release: ReleaseFn = Box::new(move |erased: Box<dyn Any>| {
            // The slot only ever stores a payload of the type it was
            // created with; `replace` asserts it. Can't fail.
            let resource = erased.downcast::<T>().unwrap();
            release(*resource);
        });
        let (slot, handle) = Self::from_parts(resource, release, TypeId::of::<T>());
        trace!("created slot for {:?}", handle);
        (slot, handle)
    }

    /// Identity test: true iff `handle` names exactly the resource
    /// currently stored in this slot.
    pub fn owns<T: ?Sized>(&self, handle: Handle<T>) -> bool {
        self.id == handle.id()
    }

    /// Borrow the payload.
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.resource.downcast_ref()
    }

    /// Mutably borrow the payload.
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.resource.downcast_mut()
    }

    /// Release the current payload and install `resource` in its place.
    ///
    /// The release function, and the slot's position in any containing
    /// [`Lifetime`](crate::Lifetime), are unchanged. The old payload's
    /// handle goes stale; the returned handle names the new payload.
    ///
    /// # Panics
    ///
    /// If `resource` is not of the type this slot was created with.
    pub fn replace<T: 'static>(&mut self, resource: T) -> Handle<T> {
        assert_eq!(
            TypeId::of::<T>(),
            self.type_id,
            "replacement resource type differs from the tracked payload",
        );
        let old = mem::replace(&mut self.resource, Box::new(resource));
        self.id = next_id();
        (self.release)(old);
        Handle::new(self.id)
    }

    /// Invoke the release function on the payload, consuming the slot.
    pub fn release(self) {
        let Slot {
            resource,
            release,
            relevant,
            ..
        } = self;
        release(resource);
        relevant.dispose();
        trace!("removed slot");
    }

    /// Release the payload, keeping the release function for reuse in a
    /// future slot of the same payload type.
    pub(crate) fn into_release(self) -> (ReleaseFn, TypeId) {
        let Slot {
            resource,
            release,
            type_id,
            relevant,
            ..
        } = self;
        release(resource);
        relevant.dispose();
        (release, type_id)
    }

    pub(crate) fn from_parts<T: 'static>(
        resource: T,
        release: ReleaseFn,
        type_id: TypeId,
    ) -> (Self, Handle<T>) {
        assert_eq!(
            TypeId::of::<T>(),
            type_id,
            "replacement resource type differs from the tracked payload",
        );
        let id = next_id();
        let slot = Slot {
            resource: Box::new(resource),
            release,
            type_id,
            id,
            relevant: Relevant,
        };
        (slot, Handle::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn owns_is_identity_not_equality() {
        let (slot, handle) = Slot::new(7u8, |_| ());
        let (other, other_handle) = Slot::new(7u8, |_| ());
        assert!(slot.owns(handle));
        assert!(!slot.owns(other_handle));
        assert!(other.owns(other_handle));
        slot.release();
        other.release();
    }

    #[test]
    fn zero_sized_payloads_get_distinct_identities() {
        let (slot, first) = Slot::new((), |_| ());
        let (other, second) = Slot::new((), |_| ());
        assert_ne!(first, second);
        assert!(slot.owns(first));
        assert!(!slot.owns(second));
        assert!(!other.owns(first));
        slot.release();
        other.release();
    }

    #[test]
    fn replace_releases_the_old_payload_and_keeps_the_release_fn() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let log = released.clone();
        let (mut slot, first) = Slot::new(1u32, move |n| log.borrow_mut().push(n));

        let second = slot.replace(2u32);
        assert_eq!(*released.borrow(), [1]);
        assert!(slot.owns(second));
        assert!(!slot.owns(first));
        assert_eq!(slot.get::<u32>(), Some(&2));

        slot.release();
        assert_eq!(*released.borrow(), [1, 2]);
    }

    #[test]
    #[should_panic(expected = "replacement resource type differs")]
    fn replace_with_wrong_type_panics() {
        let (mut slot, _) = Slot::new(1u32, |_| ());
        slot.replace("oops");
    }
}
