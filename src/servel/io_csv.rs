// Primitives for writing CSV files.

use std::path::Path;

use crate::servel::*;

/// Writes the table, with a leading unnamed column holding the row index.
///
/// Any existing file at `path` is replaced.
pub fn write_table(path: &Path, table: &FlatTable) -> ServelResult<()> {
    let p = path.display().to_string();
    info!(
        "Writing {} rows and {} columns to {:?}",
        table.rows.len(),
        table.columns.len(),
        p
    );
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)
        .context(CreatingOutputSnafu { path: p.clone() })?;

    let mut header: Vec<&str> = vec![""];
    header.extend(table.columns.iter().map(|s| s.as_str()));
    wtr.write_record(&header)
        .context(WritingCsvSnafu { path: p.clone() })?;

    for (idx, row) in table.rows.iter().enumerate() {
        let idx_s = idx.to_string();
        let mut line: Vec<&str> = Vec::with_capacity(row.len() + 1);
        line.push(idx_s.as_str());
        line.extend(row.iter().map(|s| s.as_str()));
        wtr.write_record(&line)
            .context(WritingCsvSnafu { path: p.clone() })?;
    }
    wtr.flush()
        .map_err(csv::Error::from)
        .context(WritingCsvSnafu { path: p })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn table() -> FlatTable {
        FlatTable {
            columns: vec!["id_mesa".to_string(), "mesa".to_string(), "Parisi".to_string()],
            rows: vec![
                vec!["1".to_string(), "1M".to_string(), "20".to_string()],
                vec!["2".to_string(), "Mesa 2, anexo".to_string(), "".to_string()],
            ],
        }
    }

    #[test]
    fn writes_index_and_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_table(&path, &table()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            ",id_mesa,mesa,Parisi\n0,1,1M,20\n1,2,\"Mesa 2, anexo\",\n"
        );
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale content that is longer than the new table\n".repeat(10)).unwrap();
        let empty = FlatTable {
            columns: vec!["id_mesa".to_string()],
            rows: vec![],
        };
        write_table(&path, &empty).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), ",id_mesa\n");
    }

    #[test]
    fn unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = write_table(&path, &table()).unwrap_err();
        assert!(matches!(err, ServelError::CreatingOutput { .. }));
    }
}
