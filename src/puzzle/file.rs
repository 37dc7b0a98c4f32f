//! Puzzle files (JSON) describing the pyramid depth and its known slots.
//!
//! Two shapes are accepted and may be combined:
//!
//! ```json
//! { "rows": 4, "known": [{ "row": 3, "col": 0, "value": 625 }, [1, 0, 60]] }
//! { "grid": [[null], [60, null], [null, 36, null], [625, null, null, 1296]] }
//! ```
//!
//! `rows` may be omitted when `grid` is present.

use crate::graph::{Pyramid, SlotId};
use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PuzzleSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub known: Vec<KnownSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Vec<Vec<Option<f64>>>>,
}

/// A known slot in `known`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum KnownSpec {
    // { "row": 3, "col": 0, "value": 625 }
    Explicit { row: usize, col: usize, value: f64 },
    // [3, 0, 625]
    Tuple(usize, usize, f64),
}

impl KnownSpec {
    pub fn slot(&self) -> (SlotId, f64) {
        match *self {
            KnownSpec::Explicit { row, col, value } | KnownSpec::Tuple(row, col, value) => {
                (SlotId::new(row, col), value)
            }
        }
    }
}

impl From<(SlotId, f64)> for KnownSpec {
    fn from((id, value): (SlotId, f64)) -> Self {
        KnownSpec::Explicit {
            row: id.row,
            col: id.col,
            value,
        }
    }
}

/// Read and deserialize a puzzle file.
pub fn load_puzzle_file(path: &str) -> anyhow::Result<PuzzleSpec> {
    let text = fs::read_to_string(path).with_context(|| format!("read puzzle file {}", path))?;
    let spec: PuzzleSpec =
        serde_json::from_str(&text).with_context(|| format!("parse puzzle file {}", path))?;
    Ok(spec)
}

impl PuzzleSpec {
    /// Resolve the depth, gather every known slot, and build the pyramid.
    pub fn validate_and_build(&self) -> anyhow::Result<Pyramid> {
        // 1) Depth.
        let rows = match (self.rows, &self.grid) {
            (Some(rows), Some(grid)) if rows != grid.len() => {
                bail!("rows = {} but grid has {} rows", rows, grid.len());
            }
            (Some(rows), _) => rows,
            (None, Some(grid)) => grid.len(),
            (None, None) => bail!("puzzle must give either rows or grid"),
        };

        // 2) Grid shape: row k holds k + 1 cells.
        let mut seeds: BTreeMap<SlotId, f64> = BTreeMap::new();
        if let Some(grid) = &self.grid {
            for (row, cells) in grid.iter().enumerate() {
                if cells.len() != row + 1 {
                    bail!(
                        "grid row {} has {} cells, expected {}",
                        row,
                        cells.len(),
                        row + 1
                    );
                }
                for (col, cell) in cells.iter().enumerate() {
                    if let Some(value) = cell {
                        seeds.insert(SlotId::new(row, col), *value);
                    }
                }
            }
        }

        // 3) Explicit known slots; each slot at most once.
        for known in &self.known {
            let (id, value) = known.slot();
            if seeds.insert(id, value).is_some() {
                bail!("duplicate known slot in puzzle: {}", id);
            }
        }

        let pyramid = Pyramid::build(rows, seeds)
            .with_context(|| format!("build {}-row pyramid", rows))?;
        Ok(pyramid)
    }
}
