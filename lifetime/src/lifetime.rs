//! The ordered container of tracked resources.

use failure::Error;
use smallvec::SmallVec;

use crate::{
    error::{NotTracked, ResetError, TrackError},
    handle::Handle,
    slot::Slot,
};

/// Ordered owner of tracked resources with guaranteed reverse-order
/// teardown.
///
/// Resources registered with [`Lifetime::track`] are released in the exact
/// reverse of their registration order, either by [`Lifetime::dispose`] or
/// when the container is dropped. Later resources may therefore reference
/// earlier ones.
///
/// The container is single-threaded and owns every tracked resource
/// exclusively; a caller must never release a tracked resource on its own.
#[derive(Debug, Default)]
pub struct Lifetime {
    slots: SmallVec<[Slot; 8]>,
    slot_limit: Option<usize>,
}

impl Lifetime {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty container that refuses to track more than `limit`
    /// resources at a time.
    ///
    /// Useful for subsystems with a known resource budget, and for forcing
    /// the registration-failure path in tests.
    pub fn with_slot_limit(limit: usize) -> Self {
        Lifetime {
            slots: SmallVec::new(),
            slot_limit: Some(limit),
        }
    }

    /// Number of resources currently tracked.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check whether no resources are tracked.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check whether `handle` names a resource owned by this container.
    pub fn contains<T: ?Sized>(&self, handle: Handle<T>) -> bool {
        self.index_of(handle).is_some()
    }

    /// Borrow a tracked resource.
    pub fn get<T: 'static>(&self, handle: Handle<T>) -> Option<&T> {
        self.slots
            .iter()
            .find(|slot| slot.owns(handle))
            .and_then(|slot| slot.get())
    }

    /// Mutably borrow a tracked resource.
    pub fn get_mut<T: 'static>(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.slots
            .iter_mut()
            .find(|slot| slot.owns(handle))
            .and_then(|slot| slot.get_mut())
    }

    /// Register `resource` and its release function, appending the pair to
    /// the teardown order.
    ///
    /// On success the returned handle names the resource, now owned
    /// exclusively by the container. If registration fails, `resource` is
    /// passed to `release` before the error is reported, so a failing chain
    /// of acquisitions never leaks the value in flight and never leaves it
    /// half-registered.
    pub fn track<T, F>(&mut self, resource: T, release: F) -> Result<Handle<T>, TrackError>
    where
        T: 'static,
        F: Fn(T) + 'static,
    {
        if self
            .slot_limit
            .map_or(false, |limit| self.slots.len() >= limit)
        {
            release(resource);
            return Err(TrackError::LimitReached);
        }
        if self.slots.try_reserve(1).is_err() {
            release(resource);
            return Err(TrackError::OutOfMemory);
        }
        let (slot, handle) = Slot::new(resource, release);
        self.slots.push(slot);
        trace!("tracking {:?} ({} slots)", handle, self.slots.len());
        Ok(handle)
    }

    /// Release the resource named by `handle` and install a replacement
    /// built by `ctor` in the same slot, at the same teardown position,
    /// with the same release function.
    ///
    /// The old resource is released before `ctor` runs. If `ctor` fails,
    /// the slot is removed from the teardown order and the container stays
    /// consistent; see [`ResetError::Constructor`].
    ///
    /// ```
    /// use tether_lifetime::Lifetime;
    ///
    /// let mut lt = Lifetime::new();
    /// let level = lt.track(String::from("level-01"), drop).unwrap();
    /// let level = lt.reset(level, || Ok(String::from("level-02"))).unwrap();
    /// assert_eq!(lt.get(level).map(String::as_str), Some("level-02"));
    /// ```
    pub fn reset<T, F>(&mut self, handle: Handle<T>, ctor: F) -> Result<Handle<T>, ResetError>
    where
        T: 'static,
        F: FnOnce() -> Result<T, Error>,
    {
        let index = self.index_of(handle).ok_or(NotTracked)?;
        let (release, type_id) = self.slots.remove(index).into_release();
        let resource = ctor().map_err(ResetError::Constructor)?;
        let (slot, handle) = Slot::from_parts(resource, release, type_id);
        self.slots.insert(index, slot);
        trace!("reset slot {} to {:?}", index, handle);
        Ok(handle)
    }

    /// Release a single resource and remove its slot from the teardown
    /// order, leaving the relative order of the rest unchanged.
    ///
    /// The common pattern is bulk teardown via [`Lifetime::dispose`];
    /// `release_one` is for resources whose lifetime is explicitly narrower
    /// than the whole chain.
    pub fn release_one<T: ?Sized>(&mut self, handle: Handle<T>) -> Result<(), NotTracked> {
        let index = self.index_of(handle).ok_or(NotTracked)?;
        self.slots.remove(index).release();
        Ok(())
    }

    /// Release every tracked resource, most recently tracked first.
    ///
    /// Dropping the container performs the same teardown; `dispose` is the
    /// explicit spelling for call sites where teardown should be visible.
    pub fn dispose(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        while let Some(slot) = self.slots.pop() {
            slot.release();
        }
    }

    fn index_of<T: ?Sized>(&self, handle: Handle<T>) -> Option<usize> {
        self.slots.iter().position(|slot| slot.owns(handle))
    }
}

impl Drop for Lifetime {
    fn drop(&mut self) {
        if !self.slots.is_empty() {
            trace!("dropping lifetime with {} live slots", self.slots.len());
        }
        self.teardown();
    }
}
