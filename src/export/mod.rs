use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Transaction;

const HEADER: [&str; 5] = ["date", "type", "category", "description", "amount"];

/// Write transactions to a CSV file at `path`, replacing any existing file.
/// Returns the number of rows written.
pub(crate) fn export_to_csv(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(file, transactions)
}

pub(crate) fn write_csv<W: Write>(out: W, transactions: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADER)?;
    for txn in transactions {
        wtr.write_record([
            txn.date.format("%Y-%m-%d").to_string(),
            txn.transaction_type.to_string(),
            txn.category.to_string(),
            txn.description.clone(),
            format!("{:.2}", txn.amount),
        ])
        .context("Failed to write CSV record")?;
    }
    wtr.flush()?;
    Ok(transactions.len())
}

#[cfg(test)]
mod tests;
