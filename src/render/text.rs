//! Box-drawing text layout.
//!
//! Each row is offset by half a cell from the one below, so every block sits
//! over the two blocks it is computed from:
//!
//! ```text
//!      .----------.
//!      |     6    |
//! .----------.----------.
//! |     4    |     9    |
//! '----------'----------'
//! ```

use crate::graph::Pyramid;

pub const CELL_WIDTH: usize = 10;
const INDENT_STEP: usize = CELL_WIDTH / 2;

/// Draw `pyramid`; unknown slots are left blank. `precision` fixes the number
/// of decimals, otherwise the shortest exact representation is used.
pub fn render_pyramid(pyramid: &Pyramid, precision: Option<usize>) -> String {
    let rows = pyramid.rows();
    let mut out = String::new();

    for (k, row) in pyramid.iter_rows().enumerate() {
        let indent = " ".repeat(INDENT_STEP * (rows - 1 - k));

        out.push_str(&indent);
        out.push_str(&border('.', row.len()));
        out.push('\n');

        out.push_str(&indent);
        out.push('|');
        for slot in row {
            out.push_str(&cell(slot.value, precision));
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&border('\'', rows));
    out.push('\n');
    out
}

/// Format a value to fit a cell. Very large or very small magnitudes fall back
/// to scientific notation rather than being cut off.
pub fn format_value(value: f64, precision: Option<usize>) -> String {
    let text = match precision {
        Some(p) => format!("{:.*}", p, value),
        None => format!("{}", value),
    };
    if text.len() <= CELL_WIDTH {
        return text;
    }
    let magnitude = value.abs();
    if magnitude >= 1e9 || (magnitude < 1e-3 && magnitude > 0.0) {
        return format!("{:.3e}", value);
    }
    text.chars().take(CELL_WIDTH).collect()
}

/// Center within the cell; an odd leftover column goes on the left.
fn cell(value: Option<f64>, precision: Option<usize>) -> String {
    let Some(v) = value else {
        return " ".repeat(CELL_WIDTH);
    };
    let text = format_value(v, precision);
    let pad = CELL_WIDTH.saturating_sub(text.chars().count());
    let left = pad.div_ceil(2);
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

fn border(corner: char, cells: usize) -> String {
    let mut s = String::with_capacity(cells * (CELL_WIDTH + 1) + 1);
    s.push(corner);
    for _ in 0..cells {
        s.push_str(&"-".repeat(CELL_WIDTH));
        s.push(corner);
    }
    s
}
