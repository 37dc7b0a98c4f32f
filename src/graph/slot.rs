//! Slot identity and per-slot state.
//!
//! A slot is addressed by `(row, col)` with `col <= row`. Row 0 holds the root.
//! The flat index enumerates slots top-down, left-to-right:
//!
//! ```text
//!          0
//!        1   2
//!      3   4   5
//!    6   7   8   9
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId {
    pub row: usize,
    pub col: usize,
}

impl SlotId {
    pub const ROOT: Self = Self { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position in the top-down arena, or `None` if `col` overhangs its row
    /// or the index does not fit in `usize`.
    pub fn flat_index(&self) -> Option<usize> {
        if self.col > self.row {
            return None;
        }
        checked_row_start(self.row)?.checked_add(self.col)
    }

    /// Inverse of [`SlotId::flat_index`].
    pub fn from_flat_index(index: usize) -> Self {
        let (mut row, mut start) = (0, 0);
        while let Some(next) = checked_row_start(row + 1).filter(|&next| next <= index) {
            row += 1;
            start = next;
        }
        Self {
            row,
            col: index - start,
        }
    }

    /// Left and right children one row down.
    pub fn children(&self) -> [SlotId; 2] {
        [
            SlotId::new(self.row + 1, self.col),
            SlotId::new(self.row + 1, self.col + 1),
        ]
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}

/// Index of the first slot in `row`. Callers stay within
/// [`crate::graph::MAX_ROWS`], where this cannot overflow.
pub(crate) const fn row_start(row: usize) -> usize {
    row * (row + 1) / 2
}

/// Index of the first slot in `row`, or `None` on overflow.
pub(crate) fn checked_row_start(row: usize) -> Option<usize> {
    let product = if row % 2 == 0 {
        (row / 2).checked_mul(row + 1)?
    } else {
        row.checked_mul(row.checked_add(1)? / 2)?
    };
    Some(product)
}

/// One position in the arena. Links are flat indices into the same arena and
/// never own anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub id: SlotId,
    pub value: Option<f64>,
    pub(crate) children: Option<[usize; 2]>,
    pub(crate) parents: Vec<usize>,
}

impl Slot {
    pub fn is_known(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_index_roundtrip_first_rows() {
        let expected = [
            (0, 0),
            (1, 0),
            (1, 1),
            (2, 0),
            (2, 1),
            (2, 2),
            (3, 0),
        ];
        for (i, (row, col)) in expected.into_iter().enumerate() {
            let id = SlotId::new(row, col);
            assert_eq!(id.flat_index(), Some(i));
            assert_eq!(SlotId::from_flat_index(i), id);
        }
    }

    #[test]
    fn overhanging_column_has_no_index() {
        assert_eq!(SlotId::new(2, 3).flat_index(), None);
    }

    #[test]
    fn huge_rows_have_no_index() {
        assert_eq!(SlotId::new(usize::MAX, 0).flat_index(), None);
        assert_eq!(SlotId::new(usize::MAX / 2, 3).flat_index(), None);
        assert_eq!(checked_row_start(usize::MAX), None);
    }

    #[test]
    fn checked_row_start_matches_the_formula() {
        for row in 0..100 {
            assert_eq!(checked_row_start(row), Some(row_start(row)));
        }
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(SlotId::new(3, 1).to_string(), "r3c1");
    }
}
