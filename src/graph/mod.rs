//! Graph layer: the fixed pyramid topology and its slot values.
//!
//! Slots live in a single arena owned by [`Pyramid`]. Parent and child links
//! are plain arena indices, so shared children need no shared ownership.

pub mod pyramid;
pub mod slot;

pub use pyramid::{Inconsistency, MAX_ROWS, Pyramid};
pub use slot::{Slot, SlotId};
