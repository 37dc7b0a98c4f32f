//! Known-slot arguments given on the command line.
//!
//! Expected form: `ROW,COL=VALUE` (a `:` may stand in for the comma).
//!
//! Example:
//! 3,0=625   1:0=60   2,1=36.0

use crate::graph::SlotId;
use anyhow::{Context, bail};
use regex::Regex;

/// Parse every seed argument, naming the first one that is malformed.
pub fn parse_seeds<S: AsRef<str>>(args: &[S]) -> anyhow::Result<Vec<(SlotId, f64)>> {
    // Capture:
    // 1) row: integer
    // 2) col: integer
    // 3) value: anything the float parser accepts
    let re = Regex::new(r#"^\s*(\d+)\s*[,:]\s*(\d+)\s*=\s*(\S+)\s*$"#)?;

    let mut out = Vec::with_capacity(args.len());
    for arg in args {
        let arg = arg.as_ref();
        out.push(parse_with(&re, arg).with_context(|| format!("bad --known {:?}", arg))?);
    }
    Ok(out)
}

/// Parse a single `ROW,COL=VALUE` argument.
pub fn parse_seed(arg: &str) -> anyhow::Result<(SlotId, f64)> {
    let seeds = parse_seeds(&[arg])?;
    Ok(seeds[0])
}

fn parse_with(re: &Regex, arg: &str) -> anyhow::Result<(SlotId, f64)> {
    let caps = match re.captures(arg) {
        Some(c) => c,
        None => bail!("expected ROW,COL=VALUE"),
    };

    let row: usize = caps[1].parse().context("row")?;
    let col: usize = caps[2].parse().context("col")?;
    let value: f64 = caps[3]
        .parse()
        .with_context(|| format!("value {:?} is not a number", &caps[3]))?;
    Ok((SlotId::new(row, col), value))
}
