//! Tether's top level crate.
//! Reexports all others.

#![warn(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

#[doc(inline)]
pub use tether_lifetime as lifetime;

pub use tether_lifetime::{Handle, Lifetime, NotTracked, ResetError, Slot, TrackError};
