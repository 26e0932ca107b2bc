// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

use serde::Deserialize;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;

/// One polling station (mesa), as found in the source dump.
///
/// The record is kept loosely typed: only the fields listed in
/// [STATION_FIELDS] and `candidatos` are ever read, everything else is ignored.
#[derive(PartialEq, Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RawStationRecord(pub JSMap<String, JSValue>);

impl RawStationRecord {
    pub fn get(&self, key: &str) -> Option<&JSValue> {
        self.0.get(key)
    }

    /// A label for diagnostics, based on `id_mesa` when it is readable.
    pub fn label(&self) -> String {
        match self.0.get("id_mesa") {
            Some(JSValue::Number(n)) => n.to_string(),
            Some(JSValue::String(s)) => s.clone(),
            _ => "?".to_string(),
        }
    }
}

/// One element of `candidatos`.
///
/// The ballot position is not always present: write-in placeholders and
/// similar rows carry `null`.
#[derive(PartialEq, Debug, Clone, Deserialize)]
pub struct CandidateVoteEntry {
    #[serde(rename = "orden_voto", default)]
    pub ballot_position: Option<JSValue>,
    #[serde(rename = "votos")]
    pub votes: u64,
}

/// The administrative fields kept for every station, in output order.
pub const STATION_FIELDS: [&str; 14] = [
    "id_region",
    "id_cirsen",
    "id_distrito",
    "id_provincia",
    "orden_comuna",
    "id_comuna",
    "id_mesa",
    "mesa",
    "id_local",
    "orden_local",
    "blancos",
    "nulos",
    "total_general",
    "electores",
];

/// A scalar value of an administrative field.
#[derive(PartialEq, Debug, Clone)]
pub enum FieldValue {
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Decimal(f64),
    Text(String),
    Boolean(bool),
    Null,
}

impl FieldValue {
    /// The textual form written in a table cell. Null is the empty cell.
    pub fn render(&self) -> String {
        match self {
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Unsigned(u) => u.to_string(),
            FieldValue::Decimal(f) => format!("{:?}", f),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Boolean(true) => "True".to_string(),
            FieldValue::Boolean(false) => "False".to_string(),
            FieldValue::Null => "".to_string(),
        }
    }
}

/// The fixed administrative part of a station.
#[derive(PartialEq, Debug, Clone)]
pub struct StationInfo {
    pub id_region: FieldValue,
    pub id_cirsen: FieldValue,
    pub id_distrito: FieldValue,
    pub id_provincia: FieldValue,
    pub orden_comuna: FieldValue,
    pub id_comuna: FieldValue,
    pub id_mesa: FieldValue,
    pub mesa: FieldValue,
    pub id_local: FieldValue,
    pub orden_local: FieldValue,
    pub blancos: FieldValue,
    pub nulos: FieldValue,
    pub total_general: FieldValue,
    pub electores: FieldValue,
}

impl StationInfo {
    /// The fields paired with their column names, in [STATION_FIELDS] order.
    pub fn columns(&self) -> [(&'static str, &FieldValue); 14] {
        [
            ("id_region", &self.id_region),
            ("id_cirsen", &self.id_cirsen),
            ("id_distrito", &self.id_distrito),
            ("id_provincia", &self.id_provincia),
            ("orden_comuna", &self.orden_comuna),
            ("id_comuna", &self.id_comuna),
            ("id_mesa", &self.id_mesa),
            ("mesa", &self.mesa),
            ("id_local", &self.id_local),
            ("orden_local", &self.orden_local),
            ("blancos", &self.blancos),
            ("nulos", &self.nulos),
            ("total_general", &self.total_general),
            ("electores", &self.electores),
        ]
    }
}

// ******** Output data structures *********

/// A station flattened to a single level: administrative fields first, then
/// one (name, votes) pair per candidate in ascending ballot position.
#[derive(PartialEq, Debug, Clone)]
pub struct FlatStationRow {
    pub station: StationInfo,
    pub votes: Vec<(String, u64)>,
}

impl FlatStationRow {
    /// All the cells of this row, rendered, in column order.
    pub fn cells(&self) -> Vec<(&str, String)> {
        let mut res: Vec<(&str, String)> = self
            .station
            .columns()
            .iter()
            .map(|(name, v)| (*name, v.render()))
            .collect();
        for (name, count) in self.votes.iter() {
            res.push((name.as_str(), count.to_string()));
        }
        res
    }
}

/// The assembled table: the union of all the columns, and one line of cells
/// per row. Cells absent from a row are empty.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct FlatTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Errors that prevent a station from being flattened.
#[derive(PartialEq, Debug, Clone)]
pub enum TransformError {
    /// An administrative field is not in the record.
    MissingField { station: String, field: &'static str },
    /// An administrative field holds a list or an object.
    WrongFieldType {
        station: String,
        field: &'static str,
        value: String,
    },
    /// `candidatos` is absent, null or not a list.
    MissingCandidates { station: String },
    /// An element of `candidatos` could not be read.
    MalformedCandidate { station: String, message: String },
    /// The ballot position has no entry in the candidate table.
    UnknownBallotPosition { station: String, position: String },
    /// The ballot position is null or absent.
    MissingBallotPosition { station: String, votes: u64 },
}

impl Error for TransformError {}

impl Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::MissingField { station, field } => {
                write!(f, "station {}: missing field {:?}", station, field)
            }
            TransformError::WrongFieldType {
                station,
                field,
                value,
            } => write!(
                f,
                "station {}: field {:?} is not a scalar: {}",
                station, field, value
            ),
            TransformError::MissingCandidates { station } => {
                write!(f, "station {}: no candidatos list", station)
            }
            TransformError::MalformedCandidate { station, message } => {
                write!(f, "station {}: malformed candidate entry: {}", station, message)
            }
            TransformError::UnknownBallotPosition { station, position } => write!(
                f,
                "station {}: no candidate for ballot position {}",
                station, position
            ),
            TransformError::MissingBallotPosition { station, votes } => write!(
                f,
                "station {}: candidate entry with {} votes has no ballot position",
                station, votes
            ),
        }
    }
}

/// The first failure of a batch, with the 0-based index of the record.
#[derive(PartialEq, Debug, Clone)]
pub struct BatchError {
    pub index: usize,
    pub cause: TransformError,
}

impl Error for BatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

impl Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record #{}: {}", self.index, self.cause)
    }
}

// ********* Configuration **********

/// Maps a ballot position, in its decimal string form, to a display name.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct CandidateTable {
    pub entries: &'static [(&'static str, &'static str)],
}

impl CandidateTable {
    /// The 2025 presidential roster.
    pub const PRESIDENTIAL_2025: CandidateTable = CandidateTable {
        entries: &[
            ("1", "Parisi"),
            ("2", "Jara"),
            ("3", "MEO"),
            ("4", "Kaiser"),
            ("5", "Kast"),
            ("6", "Artes"),
            ("7", "Matthei"),
            ("8", "HMN"),
        ],
    };

    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, name)| *name)
    }
}

/// What to do with a candidate entry that has no ballot position.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum NullPositionPolicy {
    /// Fail the whole record.
    Fail,
    /// Drop the entry (its votes are not reported).
    Skip,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct TransformRules {
    pub null_position: NullPositionPolicy,
}

impl TransformRules {
    pub const DEFAULT_RULES: TransformRules = TransformRules {
        null_position: NullPositionPolicy::Fail,
    };
}

impl Default for TransformRules {
    fn default() -> Self {
        TransformRules::DEFAULT_RULES
    }
}
