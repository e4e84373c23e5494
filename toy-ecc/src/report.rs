//! Plain text evaluation table.
//!
//! ```text
//! a: 1, b: 6, prime: 11
//! |	x	|	f(x)	|	QR	|	Y	|
//! |	0	|	6	|	False	|	None	|
//! ```
//!
//! Columns are tab separated. The `QR` column is `True`/`False` and `Y` holds
//! either the ascending root list (e.g. `[2, 15]`) or the literal `None`.

use crate::arithmetic::FieldElement;
use crate::curve::SquareRootIndex;
use crate::CurveParameters;

use std::fmt;

pub const HEADER: &str = "|\tx\t|\tf(x)\t|\tQR\t|\tY\t|";
pub const NO_ROOTS: &str = "None";

/// Borrowed view of the tables that renders as the report.
pub struct EvaluationTable<'a> {
    pub params: &'a CurveParameters,
    pub table: &'a [FieldElement],
    pub roots: &'a SquareRootIndex,
}

impl fmt::Display for EvaluationTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.params)?;
        writeln!(f, "{}", HEADER)?;
        for (x, value) in self.table.iter().enumerate() {
            let ys = self.roots.get(value);
            writeln!(
                f,
                "|\t{}\t|\t{}\t|\t{}\t|\t{}\t|",
                x,
                value,
                if ys.is_some() { "True" } else { "False" },
                ys.map(|ys| render_roots(ys.as_slice()))
                    .unwrap_or_else(|| NO_ROOTS.to_string())
            )?;
        }
        Ok(())
    }
}

pub fn evaluation_table_report(
    params: &CurveParameters,
    table: &[FieldElement],
    roots: &SquareRootIndex,
) -> String {
    EvaluationTable {
        params,
        table,
        roots,
    }
    .to_string()
}

fn render_roots(roots: &[FieldElement]) -> String {
    let inner = roots
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<String>>()
        .join(", ");
    format!("[{}]", inner)
}

/// One parsed data row of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub x: u64,
    pub value: u64,
    pub is_residue: bool,
    pub roots: Option<Vec<u64>>,
}

/// Reads the data rows back out of a report. Returns `None` on any line that
/// does not follow the layout above.
pub fn parse_rows(report: &str) -> Option<Vec<ReportRow>> {
    let mut lines = report.lines();
    lines.next()?;
    if lines.next()? != HEADER {
        return None;
    }
    lines.map(parse_row).collect()
}

fn parse_row(line: &str) -> Option<ReportRow> {
    let cells = line
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect::<Vec<&str>>();
    if cells.len() != 4 {
        return None;
    }
    let is_residue = match cells[2] {
        "True" => true,
        "False" => false,
        _ => return None,
    };
    let roots = if cells[3] == NO_ROOTS {
        None
    } else {
        let inner = cells[3].strip_prefix('[')?.strip_suffix(']')?;
        Some(
            inner
                .split(", ")
                .map(|r| r.parse().ok())
                .collect::<Option<Vec<u64>>>()?,
        )
    };
    Some(ReportRow {
        x: cells[0].parse().ok()?,
        value: cells[1].parse().ok()?,
        is_residue,
        roots,
    })
}
