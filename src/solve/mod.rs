//! Propagation layer: the triple-solver and the sweep-to-fixed-point driver.

pub mod engine;
pub mod triple;

pub use engine::{Convergence, Order, Sweep, propagate, propagate_with, sweep};
pub use triple::{Assignment, Rule, child_from_parent, parent_from_children, solve_triple};
