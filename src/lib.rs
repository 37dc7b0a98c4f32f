//! Square-root pyramid solver.
//!
//! Every block in the pyramid equals the square root of the product of the two
//! blocks beneath it. Given a few known blocks, [`solve::propagate`] fills in
//! everything that can be deduced, one parent/children triple at a time.
//!
//! Layers, bottom-up:
//! - [`graph`]: the slot arena and its fixed topology
//! - [`solve`]: the triple-solver and the fixed-point driver
//! - [`puzzle`]: puzzle files, command-line seeds, the worked example
//! - [`model`] and [`render`]: reports in text and JSON

pub mod error;
pub mod graph;
pub mod model;
pub mod puzzle;
pub mod render;
pub mod solve;

pub use error::{Error, Result};
pub use graph::{Pyramid, SlotId};
pub use solve::{Convergence, propagate};
