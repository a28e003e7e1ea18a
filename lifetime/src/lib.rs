//! Ordered tracking of heterogeneous owned resources with guaranteed
//! reverse-order teardown.
//!
//! Subsystem constructors that chain a dozen fallible acquisitions register
//! each acquired resource with a [`Lifetime`] as soon as it exists. A failure
//! at step K then cleans up steps 1..K-1 simply by tearing the container
//! down; no per-call-site unwind logic is needed.
//!
//! ```
//! use tether_lifetime::{Lifetime, TrackError};
//!
//! struct Image { pixels: Vec<u8> }
//! fn discard_image(image: Image) { drop(image.pixels) }
//!
//! # fn main() -> Result<(), TrackError> {
//! let mut lt = Lifetime::new();
//!
//! // The surface is created before the sprite that is drawn onto it,
//! // so teardown releases the sprite first.
//! let surface = lt.track(Image { pixels: vec![0; 64] }, discard_image)?;
//! let sprite = lt.track(Image { pixels: vec![1; 16] }, discard_image)?;
//!
//! assert!(lt.contains(surface));
//! assert_eq!(lt.get(sprite).map(|image| image.pixels.len()), Some(16));
//!
//! lt.dispose();
//! # Ok(())
//! # }
//! ```

#![forbid(overflowing_literals)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(path_statements)]
#![warn(trivial_bounds)]
#![warn(type_alias_bounds)]
#![warn(unconditional_recursion)]
#![warn(while_true)]
#![warn(unused)]
#![warn(bad_style)]
#![warn(future_incompatible)]
#![warn(rust_2018_compatibility)]
#![warn(rust_2018_idioms)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate failure;

mod error;
mod handle;
mod lifetime;
mod slot;

pub use crate::{
    error::{NotTracked, ResetError, TrackError},
    handle::Handle,
    lifetime::Lifetime,
    slot::Slot,
};
