//! Local deduction over one parent and its two children.
//!
//! With parent `p` and children `l`, `r`:
//!
//! ```text
//! p = sqrt(l * r)     l = p^2 / r     r = p^2 / l
//! ```

use crate::error::{Error, Result};
use crate::graph::{Pyramid, SlotId};
use serde::Serialize;

/// Which member of the triple was deduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Parent,
    LeftChild,
    RightChild,
}

/// A single value deduced by [`solve_triple`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assignment {
    /// Slot that received the value.
    pub slot: SlotId,
    pub value: f64,
    pub rule: Rule,
    /// Parent of the triple the value was deduced from.
    pub triple: SlotId,
}

/// `sqrt(left * right)`, rejecting negative products and non-finite results.
pub fn parent_from_children(left: f64, right: f64) -> std::result::Result<f64, String> {
    let product = left * right;
    if product < 0.0 {
        return Err(format!("square root of negative product {} * {}", left, right));
    }
    let value = product.sqrt();
    if !value.is_finite() {
        return Err(format!("sqrt({} * {}) is not finite", left, right));
    }
    Ok(value)
}

/// `parent^2 / sibling`, rejecting a zero sibling and non-finite results.
pub fn child_from_parent(parent: f64, sibling: f64) -> std::result::Result<f64, String> {
    if sibling == 0.0 {
        return Err(format!("{}^2 divided by a zero sibling", parent));
    }
    let value = parent * parent / sibling;
    if !value.is_finite() {
        return Err(format!("{}^2 / {} is not finite", parent, sibling));
    }
    Ok(value)
}

/// Deduce the missing member of the triple rooted at `id`.
///
/// Acts only when exactly two of {parent, left, right} are known; leaves,
/// under-constrained and complete triples are a no-op returning `Ok(None)`.
/// At most one slot is written, and only if it was unknown.
pub fn solve_triple(pyramid: &mut Pyramid, id: SlotId) -> Result<Option<Assignment>> {
    let index = pyramid
        .index_of(id)
        .ok_or_else(|| Error::InvalidTopology(format!("no slot {} to solve", id)))?;

    let slot = pyramid.slot_at(index);
    let Some([l, r]) = slot.children else {
        return Ok(None);
    };

    let (target, rule, candidate) = match (
        slot.value,
        pyramid.slot_at(l).value,
        pyramid.slot_at(r).value,
    ) {
        (None, Some(left), Some(right)) => (index, Rule::Parent, parent_from_children(left, right)),
        (Some(p), None, Some(right)) => (l, Rule::LeftChild, child_from_parent(p, right)),
        (Some(p), Some(left), None) => (r, Rule::RightChild, child_from_parent(p, left)),
        _ => return Ok(None),
    };

    let slot = pyramid.slot_at(target).id;
    let value = candidate.map_err(|reason| Error::NumericDomain { slot, reason })?;

    let filled = pyramid.fill(target, value);
    debug_assert!(filled, "target of a two-known triple must be unknown");
    tracing::debug!(%slot, value, ?rule, triple = %id, "deduced slot");

    Ok(Some(Assignment {
        slot,
        value,
        rule,
        triple: id,
    }))
}
