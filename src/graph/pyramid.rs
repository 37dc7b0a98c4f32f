//! The pyramid arena: every slot lives in one flat `Vec`, links are indices.

use crate::error::{Error, Result};
use crate::graph::slot::{Slot, SlotId, row_start};
use serde::Serialize;

/// Deepest pyramid `build` accepts (a little over two million slots).
pub const MAX_ROWS: usize = 2048;

/// Layered DAG of slots. Row `k` has `k + 1` slots and slot `(k, j)` has the
/// children `(k + 1, j)` and `(k + 1, j + 1)`, so interior slots are shared by
/// two parents.
///
/// The shape is fixed at construction. Values only ever go from unknown to
/// known.
#[derive(Debug, Clone, PartialEq)]
pub struct Pyramid {
    rows: usize,
    slots: Vec<Slot>,
}

/// A fully-known triple whose parent does not match `sqrt(left * right)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inconsistency {
    pub parent: SlotId,
    pub expected: f64,
    pub actual: f64,
}

impl Pyramid {
    /// Build a `rows`-deep pyramid and place the seed values.
    ///
    /// Fails with [`Error::InvalidTopology`] when `rows` is zero or above
    /// [`MAX_ROWS`], when a seed
    /// names a slot outside the pyramid, or when a slot is seeded twice with
    /// different values. Non-finite seeds fail with [`Error::InvalidSeed`].
    pub fn build<I>(rows: usize, seeds: I) -> Result<Self>
    where
        I: IntoIterator<Item = (SlotId, f64)>,
    {
        // 1) Shape.
        if rows == 0 {
            return Err(Error::InvalidTopology(
                "a pyramid needs at least one row".to_string(),
            ));
        }
        if rows > MAX_ROWS {
            return Err(Error::InvalidTopology(format!(
                "too many rows: {} (at most {})",
                rows, MAX_ROWS
            )));
        }
        let len = row_start(rows);
        let mut slots = Vec::with_capacity(len);
        for row in 0..rows {
            for col in 0..=row {
                let children = (row + 1 < rows).then(|| {
                    let left = row_start(row + 1) + col;
                    [left, left + 1]
                });
                slots.push(Slot {
                    id: SlotId::new(row, col),
                    value: None,
                    children,
                    parents: Vec::new(),
                });
            }
        }

        // 2) Back-links, so both directions agree.
        for index in 0..len {
            if let Some(kids) = slots[index].children {
                for kid in kids {
                    slots[kid].parents.push(index);
                }
            }
        }

        // 3) Seeds.
        let mut pyramid = Self { rows, slots };
        for (id, value) in seeds {
            let index = pyramid.index_of(id).ok_or_else(|| {
                Error::InvalidTopology(format!(
                    "seed {} lies outside a {}-row pyramid",
                    id, rows
                ))
            })?;
            if !value.is_finite() {
                return Err(Error::InvalidSeed { slot: id, value });
            }
            match pyramid.slots[index].value {
                Some(prev) if prev != value => {
                    return Err(Error::InvalidTopology(format!(
                        "slot {} seeded twice ({} and {})",
                        id, prev, value
                    )));
                }
                _ => pyramid.slots[index].value = Some(value),
            }
        }

        tracing::debug!(
            rows,
            slots = len,
            known = pyramid.known_count(),
            "built pyramid"
        );
        Ok(pyramid)
    }

    /// A pyramid with every slot unknown.
    pub fn new(rows: usize) -> Result<Self> {
        Self::build(rows, Vec::<(SlotId, f64)>::new())
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Arena index of `id`, if it lies inside this pyramid.
    pub fn index_of(&self, id: SlotId) -> Option<usize> {
        if id.row >= self.rows {
            return None;
        }
        id.flat_index()
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.index_of(id).map(|i| &self.slots[i])
    }

    /// Current value of `id`; `None` if unknown or outside the pyramid.
    pub fn value(&self, id: SlotId) -> Option<f64> {
        self.slot(id).and_then(|s| s.value)
    }

    pub fn children(&self, id: SlotId) -> Option<[SlotId; 2]> {
        let kids = self.slot(id)?.children?;
        Some(kids.map(|k| self.slots[k].id))
    }

    /// Zero, one, or two parents, left parent first.
    pub fn parents(&self, id: SlotId) -> Vec<SlotId> {
        self.slot(id)
            .map(|s| s.parents.iter().map(|&p| self.slots[p].id).collect())
            .unwrap_or_default()
    }

    /// Row 0 first, each row left to right.
    pub fn top_down(&self) -> impl DoubleEndedIterator<Item = SlotId> + '_ {
        self.slots.iter().map(|s| s.id)
    }

    /// Exact reverse of [`Pyramid::top_down`].
    pub fn bottom_up(&self) -> impl DoubleEndedIterator<Item = SlotId> + '_ {
        self.top_down().rev()
    }

    /// Slots of a single row, left to right.
    pub fn row(&self, row: usize) -> &[Slot] {
        if row >= self.rows {
            return &[];
        }
        &self.slots[row_start(row)..row_start(row + 1)]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Slot]> + '_ {
        (0..self.rows).map(|r| self.row(r))
    }

    pub fn known_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_known()).count()
    }

    pub fn unknown_slots(&self) -> Vec<SlotId> {
        self.slots
            .iter()
            .filter(|s| !s.is_known())
            .map(|s| s.id)
            .collect()
    }

    pub fn is_solved(&self) -> bool {
        self.slots.iter().all(Slot::is_known)
    }

    /// Values in top-down order.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.slots.iter().map(|s| s.value).collect()
    }

    /// Fully-known triples where the parent strays from `sqrt(left * right)`
    /// by more than `rel_tol` (relative to the larger magnitude, floored at 1).
    pub fn inconsistencies(&self, rel_tol: f64) -> Vec<Inconsistency> {
        let mut out = Vec::new();
        for slot in &self.slots {
            let (Some(actual), Some([l, r])) = (slot.value, slot.children) else {
                continue;
            };
            let (Some(left), Some(right)) = (self.slots[l].value, self.slots[r].value) else {
                continue;
            };
            let expected = (left * right).sqrt();
            let scale = actual.abs().max(expected.abs()).max(1.0);
            let close = (actual - expected).abs() <= rel_tol * scale;
            if !close {
                out.push(Inconsistency {
                    parent: slot.id,
                    expected,
                    actual,
                });
            }
        }
        out
    }

    pub(crate) fn slot_at(&self, index: usize) -> &Slot {
        &self.slots[index]
    }

    /// Fill an unknown slot. Returns `false` and leaves the slot alone when it
    /// is already known.
    pub(crate) fn fill(&mut self, index: usize, value: f64) -> bool {
        let slot = &mut self.slots[index];
        if slot.value.is_some() {
            return false;
        }
        slot.value = Some(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(row: usize, col: usize) -> SlotId {
        SlotId::new(row, col)
    }

    #[test]
    fn shape_has_triangular_slot_count() {
        for rows in 1..8 {
            let p = Pyramid::new(rows).unwrap();
            assert_eq!(p.len(), rows * (rows + 1) / 2);
            assert_eq!(p.iter_rows().count(), rows);
            for (k, row) in p.iter_rows().enumerate() {
                assert_eq!(row.len(), k + 1);
            }
        }
    }

    #[test]
    fn zero_rows_is_invalid() {
        let err = Pyramid::new(0).unwrap_err();
        assert!(matches!(err, Error::InvalidTopology(_)));
    }

    #[test]
    fn too_many_rows_is_invalid() {
        for rows in [MAX_ROWS + 1, usize::MAX / 2, usize::MAX] {
            let err = Pyramid::new(rows).unwrap_err();
            assert!(matches!(err, Error::InvalidTopology(ref msg) if msg.contains("too many rows")));
        }
        assert_eq!(Pyramid::new(64).unwrap().rows(), 64);
    }

    #[test]
    fn single_row_is_a_lone_leaf() {
        let p = Pyramid::build(1, [(SlotId::ROOT, 4.0)]).unwrap();
        assert_eq!(p.value(SlotId::ROOT), Some(4.0));
        assert!(p.slot(SlotId::ROOT).unwrap().is_leaf());
        assert!(p.parents(SlotId::ROOT).is_empty());
    }

    #[test]
    fn links_agree_in_both_directions() {
        let p = Pyramid::new(5).unwrap();
        for parent in p.top_down() {
            if let Some(kids) = p.children(parent) {
                assert_ne!(kids[0], kids[1]);
                for kid in kids {
                    assert!(p.parents(kid).contains(&parent));
                }
            }
        }
        for child in p.top_down() {
            for parent in p.parents(child) {
                assert!(p.children(parent).unwrap().contains(&child));
            }
        }
    }

    #[test]
    fn interior_slots_have_two_parents() {
        let p = Pyramid::new(4).unwrap();
        assert_eq!(p.parents(id(2, 1)), vec![id(1, 0), id(1, 1)]);
        assert_eq!(p.parents(id(3, 0)), vec![id(2, 0)]);
        assert_eq!(p.parents(id(3, 3)), vec![id(2, 2)]);
        assert_eq!(p.children(id(1, 1)), Some([id(2, 1), id(2, 2)]));
        assert_eq!(p.children(id(3, 2)), None);
    }

    #[test]
    fn orders_are_total_and_mirrored() {
        let p = Pyramid::new(4).unwrap();
        let down: Vec<_> = p.top_down().collect();
        let mut up: Vec<_> = p.bottom_up().collect();
        assert_eq!(down.len(), p.len());
        assert_eq!(down[0], SlotId::ROOT);
        assert_eq!(down[1], id(1, 0));
        up.reverse();
        assert_eq!(down, up);
    }

    #[test]
    fn seed_outside_pyramid_is_rejected() {
        let err = Pyramid::build(3, [(id(3, 0), 1.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidTopology(_)));
        let err = Pyramid::build(3, [(id(1, 2), 1.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidTopology(_)));
    }

    #[test]
    fn non_finite_seed_is_rejected() {
        let err = Pyramid::build(2, [(id(1, 0), f64::NAN)]).unwrap_err();
        assert!(matches!(err, Error::InvalidSeed { .. }));
    }

    #[test]
    fn conflicting_duplicate_seed_is_rejected() {
        let err = Pyramid::build(2, [(id(1, 0), 1.0), (id(1, 0), 2.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidTopology(_)));
        assert!(Pyramid::build(2, [(id(1, 0), 1.0), (id(1, 0), 1.0)]).is_ok());
    }

    #[test]
    fn fill_never_overwrites() {
        let mut p = Pyramid::build(2, [(id(1, 0), 3.0)]).unwrap();
        let index = p.index_of(id(1, 0)).unwrap();
        assert!(!p.fill(index, 9.0));
        assert_eq!(p.value(id(1, 0)), Some(3.0));
        let root = p.index_of(SlotId::ROOT).unwrap();
        assert!(p.fill(root, 5.0));
        assert_eq!(p.value(SlotId::ROOT), Some(5.0));
    }

    #[test]
    fn inconsistencies_flag_bad_parents_only() {
        let good = Pyramid::build(2, [(SlotId::ROOT, 6.0), (id(1, 0), 4.0), (id(1, 1), 9.0)])
            .unwrap();
        assert!(good.inconsistencies(1e-9).is_empty());

        let bad = Pyramid::build(2, [(SlotId::ROOT, 7.0), (id(1, 0), 4.0), (id(1, 1), 9.0)])
            .unwrap();
        let found = bad.inconsistencies(1e-9);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].parent, SlotId::ROOT);
        assert_eq!(found[0].expected, 6.0);
    }
}
