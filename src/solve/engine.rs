//! Convergence driver: sweep the whole pyramid until nothing changes.
//!
//! Sweeps alternate top-down and bottom-up. A top-down sweep lets a freshly
//! deduced parent feed its children within the same pass; a bottom-up sweep
//! does the same for children feeding parents. Propagation stops after the
//! first sweep that assigns nothing.
//!
//! Every sweep before the last fills at least one unknown slot and values are
//! never unset, so an `N`-slot pyramid converges within `N` sweeps.

use crate::error::Result;
use crate::graph::{Pyramid, SlotId};
use crate::solve::triple::{Assignment, solve_triple};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    TopDown,
    BottomUp,
}

impl Order {
    pub fn flip(self) -> Self {
        match self {
            Order::TopDown => Order::BottomUp,
            Order::BottomUp => Order::TopDown,
        }
    }
}

/// One full traversal and the values it deduced, in deduction order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sweep {
    pub order: Order,
    pub assignments: Vec<Assignment>,
}

impl Sweep {
    pub fn is_stable(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Record of a propagation run. The last sweep is always the stable one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Convergence {
    pub sweeps: Vec<Sweep>,
}

impl Convergence {
    pub fn sweep_count(&self) -> usize {
        self.sweeps.len()
    }

    pub fn assignment_count(&self) -> usize {
        self.sweeps.iter().map(|s| s.assignments.len()).sum()
    }

    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> + '_ {
        self.sweeps.iter().flat_map(|s| s.assignments.iter())
    }
}

/// Apply the triple-solver to every slot once, in `order`.
pub fn sweep(pyramid: &mut Pyramid, order: Order) -> Result<Sweep> {
    let ids: Vec<SlotId> = match order {
        Order::TopDown => pyramid.top_down().collect(),
        Order::BottomUp => pyramid.bottom_up().collect(),
    };

    let mut assignments = Vec::new();
    for id in ids {
        if let Some(assignment) = solve_triple(pyramid, id)? {
            assignments.push(assignment);
        }
    }
    Ok(Sweep { order, assignments })
}

/// Propagate known values through `pyramid` in place until a fixed point.
///
/// A partially solved pyramid is a valid outcome. On a numeric domain error
/// the values deduced before the failure stay in place.
pub fn propagate(pyramid: &mut Pyramid) -> Result<Convergence> {
    propagate_with(pyramid, |_, _| {})
}

/// Like [`propagate`], calling `observe` after every sweep.
pub fn propagate_with<F>(pyramid: &mut Pyramid, mut observe: F) -> Result<Convergence>
where
    F: FnMut(&Pyramid, &Sweep),
{
    let mut convergence = Convergence::default();
    let mut order = Order::TopDown;

    loop {
        let next = sweep(pyramid, order)?;
        tracing::trace!(
            sweep = convergence.sweeps.len() + 1,
            ?order,
            assigned = next.assignments.len(),
            "finished sweep"
        );
        observe(pyramid, &next);

        let stable = next.is_stable();
        convergence.sweeps.push(next);
        if stable {
            break;
        }
        order = order.flip();
    }

    debug_assert!(convergence.sweep_count() <= pyramid.len());
    tracing::info!(
        sweeps = convergence.sweep_count(),
        assigned = convergence.assignment_count(),
        unknown = pyramid.len() - pyramid.known_count(),
        "propagation converged"
    );
    Ok(convergence)
}
