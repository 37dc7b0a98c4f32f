//! The worked puzzle: each block is the square root of the product of the two
//! blocks below it; find the top block.
//!
//! ```text
//!                .----------.
//!                |          |
//!           .----------.----------.
//!           |    60    |          |
//!      .----------.----------.----------.
//!      |          |    36    |          |
//! .----------.----------.----------.----------.
//! |   625    |          |          |   1296   |
//! '----------'----------'----------'----------'
//! ```

use crate::puzzle::PuzzleSpec;

pub fn worked_example() -> PuzzleSpec {
    PuzzleSpec {
        rows: None,
        known: Vec::new(),
        grid: Some(vec![
            vec![None],
            vec![Some(60.0), None],
            vec![None, Some(36.0), None],
            vec![Some(625.0), None, None, Some(1296.0)],
        ]),
    }
}
