//! Output formatting module

use std::io::{self, Write};

use anyhow::Result;
use console::style;
use serde::Serialize;

/// Write `value` as indented JSON when JSON output was requested.
///
/// Returns `false` without writing anything otherwise, so the caller can fall
/// back to text output.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, enabled: bool, value: &T) -> Result<bool> {
    if !enabled {
        return Ok(false);
    }

    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(true)
}

/// Print success message
pub fn success<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style("SUCCESS:").green().bold(), msg)
}

/// Print info message
pub fn info<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style("INFO:").cyan().bold(), msg)
}

/// Print plain text followed by a blank line
pub fn paragraph<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{}\n", msg)
}

/// Print rows as left-aligned columns separated by two spaces
pub fn write_table<W: Write>(
    out: &mut W,
    headers: &[&str],
    rows: &[Vec<String>],
) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.len());
            }
        }
    }

    let render = |cells: &[&str]| -> String {
        let last = cells.len().saturating_sub(1);
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == last {
                    cell.to_string()
                } else {
                    format!("{:width$}  ", cell, width = widths.get(i).copied().unwrap_or(0))
                }
            })
            .collect::<String>()
    };

    writeln!(out, "{}", render(headers))?;
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        writeln!(out, "{}", render(&cells))?;
    }

    Ok(())
}
