use std::{fs::File, io::Write, path::Path};

use anyhow::Context;

use crate::record::{COLUMNS, Record};

/// Writes the header and one row per record. Returns the number of rows,
/// header excluded.
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> anyhow::Result<usize> {
    // Header is written by hand so that an empty run still yields one.
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(COLUMNS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(records.len())
}

pub fn export_csv(path: &Path, records: &[Record]) -> anyhow::Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_records(file, records).with_context(|| format!("failed to write {}", path.display()))
}
