//! Report model: a serializable snapshot of a pyramid after propagation.

use crate::graph::{Inconsistency, Pyramid, SlotId};
use crate::solve::{Convergence, Sweep};
use serde::Serialize;

/// Relative tolerance used when auditing solved triples.
pub const CONSISTENCY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Solved,
    Partial,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalsView {
    pub slots: usize,
    pub seeded: usize,
    pub deduced: usize,
    pub unknown: usize,
    pub sweeps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub status: Status,

    /// Row 0 first; `null` marks a slot that is still unknown.
    pub rows: Vec<Vec<Option<f64>>>,

    pub totals: TotalsView,
    pub unknown: Vec<SlotId>,
    pub sweeps: Vec<Sweep>,

    /// Fully-known triples that disagree with the square-root rule. Only
    /// seeded values can cause these.
    pub inconsistencies: Vec<Inconsistency>,
}

/// Summarize `pyramid` as left by the run recorded in `convergence`.
pub fn build_report_data(pyramid: &Pyramid, convergence: &Convergence) -> ReportData {
    let rows = pyramid
        .iter_rows()
        .map(|row| row.iter().map(|s| s.value).collect())
        .collect();

    let unknown = pyramid.unknown_slots();
    let deduced = convergence.assignment_count();
    let known = pyramid.known_count();

    ReportData {
        status: if unknown.is_empty() {
            Status::Solved
        } else {
            Status::Partial
        },
        rows,
        totals: TotalsView {
            slots: pyramid.len(),
            seeded: known.saturating_sub(deduced),
            deduced,
            unknown: unknown.len(),
            sweeps: convergence.sweep_count(),
        },
        unknown,
        sweeps: convergence.sweeps.clone(),
        inconsistencies: pyramid.inconsistencies(CONSISTENCY_TOLERANCE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solve::propagate;
    use pretty_assertions::assert_eq;

    #[test]
    fn solved_report_counts() {
        let mut p = Pyramid::build(2, [(SlotId::new(1, 0), 4.0), (SlotId::new(1, 1), 9.0)])
            .unwrap();
        let c = propagate(&mut p).unwrap();
        let data = build_report_data(&p, &c);
        assert_eq!(data.status, Status::Solved);
        assert_eq!(data.rows, vec![vec![Some(6.0)], vec![Some(4.0), Some(9.0)]]);
        assert_eq!(
            data.totals,
            TotalsView {
                slots: 3,
                seeded: 2,
                deduced: 1,
                unknown: 0,
                sweeps: 2,
            }
        );
        assert!(data.inconsistencies.is_empty());
    }

    #[test]
    fn partial_report_lists_unknowns() {
        let mut p = Pyramid::build(2, [(SlotId::new(1, 0), 4.0)]).unwrap();
        let c = propagate(&mut p).unwrap();
        let data = build_report_data(&p, &c);
        assert_eq!(data.status, Status::Partial);
        assert_eq!(data.unknown, vec![SlotId::ROOT, SlotId::new(1, 1)]);
    }
}
