use std::collections::HashMap;

pub use crate::config::*;

/// A builder for assembling flat rows into a table.
///
/// The columns of the table are the union of the columns of all the rows, in
/// the order in which they first appear. Rows that lack a column get an empty
/// cell for it.
///
/// ```
/// use mesa_flatten::builder::TableBuilder;
/// # use mesa_flatten::*;
///
/// let mut builder = TableBuilder::new();
/// # let record: RawStationRecord = serde_json::from_str(r#"{"id_region": 1, "id_cirsen": 1,
/// #   "id_distrito": 1, "id_provincia": 1, "orden_comuna": 1, "id_comuna": 1, "id_mesa": 1,
/// #   "mesa": "1", "id_local": 1, "orden_local": 1, "blancos": 0, "nulos": 0,
/// #   "total_general": 3, "electores": 10, "candidatos": [{"orden_voto": 1, "votos": 3}]}"#).unwrap();
/// let row = transform_station(&record, &CandidateTable::PRESIDENTIAL_2025, &TransformRules::DEFAULT_RULES)?;
/// builder.add_row(&row);
///
/// let table = builder.build();
/// assert_eq!(table.columns.last().map(|s| s.as_str()), Some("Parisi"));
///
/// # Ok::<(), TransformError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    pub(crate) _columns: Vec<String>,
    pub(crate) _positions: HashMap<String, usize>,
    pub(crate) _rows: Vec<Vec<Option<String>>>,
}

impl TableBuilder {
    pub fn new() -> TableBuilder {
        TableBuilder::default()
    }

    /// Adds one row at the end of the table.
    pub fn add_row(&mut self, row: &FlatStationRow) {
        let mut cells: Vec<Option<String>> = vec![None; self._columns.len()];
        for (name, value) in row.cells() {
            let idx = match self._positions.get(name) {
                Some(idx) => *idx,
                None => {
                    let idx = self._columns.len();
                    self._columns.push(name.to_string());
                    self._positions.insert(name.to_string(), idx);
                    cells.push(None);
                    idx
                }
            };
            cells[idx] = Some(value);
        }
        self._rows.push(cells);
    }

    pub fn add_rows(&mut self, rows: &[FlatStationRow]) {
        for row in rows.iter() {
            self.add_row(row);
        }
    }

    pub fn build(self) -> FlatTable {
        let width = self._columns.len();
        let rows: Vec<Vec<String>> = self
            ._rows
            .into_iter()
            .map(|cells| {
                let mut line: Vec<String> = cells.into_iter().map(|c| c.unwrap_or_default()).collect();
                line.resize(width, String::new());
                line
            })
            .collect();
        FlatTable {
            columns: self._columns,
            rows,
        }
    }
}

/// Assembles all the rows at once.
pub fn assemble_table(rows: &[FlatStationRow]) -> FlatTable {
    let mut builder = TableBuilder::new();
    builder.add_rows(rows);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id_mesa: i64) -> StationInfo {
        let v = FieldValue::Integer;
        StationInfo {
            id_region: v(1),
            id_cirsen: v(2),
            id_distrito: v(3),
            id_provincia: v(4),
            orden_comuna: v(5),
            id_comuna: v(6),
            id_mesa: v(id_mesa),
            mesa: FieldValue::Text(format!("{}M", id_mesa)),
            id_local: v(7),
            orden_local: v(8),
            blancos: v(0),
            nulos: FieldValue::Null,
            total_general: v(50),
            electores: v(100),
        }
    }

    fn row(id_mesa: i64, votes: &[(&str, u64)]) -> FlatStationRow {
        FlatStationRow {
            station: station(id_mesa),
            votes: votes.iter().map(|(n, c)| (n.to_string(), *c)).collect(),
        }
    }

    #[test]
    fn homogeneous_rows() {
        let table = assemble_table(&[
            row(1, &[("Parisi", 20), ("Jara", 30)]),
            row(2, &[("Parisi", 21), ("Jara", 31)]),
        ]);
        let mut expected: Vec<String> = STATION_FIELDS.iter().map(|s| s.to_string()).collect();
        expected.push("Parisi".to_string());
        expected.push("Jara".to_string());
        assert_eq!(table.columns, expected);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][6], "2");
        assert_eq!(table.rows[1][7], "2M");
        assert_eq!(table.rows[0][11], "");
        assert_eq!(&table.rows[1][14..], &["21".to_string(), "31".to_string()]);
    }

    #[test]
    fn union_of_columns_in_first_seen_order() {
        let table = assemble_table(&[
            row(1, &[("Jara", 30)]),
            row(2, &[("Parisi", 21), ("Jara", 31)]),
            row(3, &[]),
        ]);
        assert_eq!(&table.columns[14..], &["Jara".to_string(), "Parisi".to_string()]);
        assert_eq!(&table.rows[0][14..], &["30".to_string(), "".to_string()]);
        // The second row puts each value under its own column.
        assert_eq!(&table.rows[1][14..], &["31".to_string(), "21".to_string()]);
        assert_eq!(&table.rows[2][14..], &["".to_string(), "".to_string()]);
        assert!(table.rows.iter().all(|r| r.len() == table.columns.len()));
    }

    #[test]
    fn disjoint_rosters_give_different_columns() {
        let first = assemble_table(&[row(1, &[("Parisi", 20), ("Matthei", 5)])]);
        let second = assemble_table(&[row(1, &[("Jara", 60), ("Kast", 70)])]);
        assert_eq!(&first.columns[14..], &["Parisi".to_string(), "Matthei".to_string()]);
        assert_eq!(&second.columns[14..], &["Jara".to_string(), "Kast".to_string()]);
    }

    #[test]
    fn empty_table() {
        let table = TableBuilder::new().build();
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }
}
