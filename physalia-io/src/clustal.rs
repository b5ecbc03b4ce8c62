//! ClustalW-style alignment text.
//!
//! Interleaved blocks of 50 residues per row. The identifier column is
//! padded to the longest identifier plus four spaces, each row ends with its
//! cumulative non-gap residue count (omitted for all-gap fragments), and a
//! blank line separates blocks.

use physalia_core::{PhysaliaError, Result};

/// Residues per block row.
const BLOCK_SIZE: usize = 50;

/// Render aligned `(identifier, residues)` rows as ClustalW-style text.
pub fn write_alignment(rows: &[(String, String)]) -> String {
    let mut out = String::new();
    if rows.is_empty() {
        return out;
    }

    let pad = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0) + 4;
    let total = rows.iter().map(|(_, seq)| seq.len()).max().unwrap_or(0);
    let mut counts = vec![0usize; rows.len()];

    let mut offset = 0;
    while offset < total {
        let end = (offset + BLOCK_SIZE).min(total);
        for (row, (name, seq)) in rows.iter().enumerate() {
            let fragment = if offset < seq.len() {
                &seq[offset..end.min(seq.len())]
            } else {
                ""
            };
            out.push_str(&format!("{:<pad$}{}", name, fragment, pad = pad));
            let residues = fragment.bytes().filter(|&b| b != b'-').count();
            counts[row] += residues;
            if residues > 0 {
                out.push_str(&format!(" {}", counts[row]));
            }
            out.push('\n');
        }
        out.push('\n');
        offset = end;
    }

    out
}

/// Parse ClustalW-style alignment text back into `(identifier, residues)`
/// rows, concatenating the fragments of every block.
pub fn parse_alignment(input: &str) -> Result<Vec<(String, String)>> {
    let mut order: Vec<String> = Vec::new();
    let mut data: Vec<String> = Vec::new();

    for line in input.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let name = match parts.next() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let fragment = parts.next().ok_or_else(|| {
            PhysaliaError::Parse(format!("alignment line without residues: '{}'", line))
        })?;
        // A trailing cumulative count is optional and ignored.
        match order.iter().position(|n| *n == name) {
            Some(index) => data[index].push_str(fragment),
            None => {
                order.push(name);
                data.push(fragment.to_string());
            }
        }
    }

    Ok(order.into_iter().zip(data).collect())
}
