//! TRT table output
//!
//! One header row `cof,epsilon,rcrit,trt` followed by one row per policy
//! pair in sweep order. Values use the shortest round-trip form with a
//! trailing `.0` on integral values (`5.0`, `0.15000000000000002`), and a
//! threshold never reached is written as `inf`.

use std::path::Path;

use trtsim_core::TrtRow;

use crate::util::io::atomic_write;

pub const HEADER: [&str; 4] = ["cof", "epsilon", "rcrit", "trt"];

/// Render rows as CSV text
pub fn render_csv(rows: &[TrtRow]) -> String {
    let mut out = HEADER.join(",");
    out.push('\n');
    for row in rows {
        let line = [row.cof, row.epsilon, row.rcrit, row.trt].map(|v| format!("{v:?}"));
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

pub fn write_csv(path: &Path, rows: &[TrtRow]) -> std::io::Result<()> {
    atomic_write(path, render_csv(rows).as_bytes())
}
