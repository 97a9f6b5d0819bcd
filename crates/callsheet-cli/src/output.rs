use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a left-aligned table with a dashed rule under the header. The last
/// column is never padded, so trailing whitespace doesn't leak into pipes.
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let widths = column_widths(headers, &rows);

    print_row(&headers.iter().map(|h| h.to_string()).collect::<Vec<_>>(), &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", rule.join("  "));
    for row in &rows {
        print_row(row, &widths);
    }
}

/// Flag column for play listings: `L` locked, `*` favorite, `x` disabled.
pub fn play_flags(locked: bool, favorite: bool, enabled: bool) -> String {
    let mut flags = String::new();
    if locked {
        flags.push('L');
    }
    if favorite {
        flags.push('*');
    }
    if !enabled {
        flags.push('x');
    }
    flags
}

/// Footer line shown after revisioned listings (play pool, terminology).
pub fn print_revision(revision: u64) {
    println!("revision {revision}");
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (col, cell) in row.iter().enumerate().take(widths.len()) {
            widths[col] = widths[col].max(cell.len());
        }
    }
    widths
}

fn print_row(cells: &[String], widths: &[usize]) {
    let last = cells.len().saturating_sub(1);
    let line: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            if col == last {
                cell.clone()
            } else {
                let w = widths.get(col).copied().unwrap_or(0);
                format!("{cell:w$}")
            }
        })
        .collect();
    println!("{}", line.join("  ").trim_end());
}
