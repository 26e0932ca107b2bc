mod config;
use log::{debug, info, warn};

pub mod builder;
pub mod manual;

use serde::Deserialize;
use serde_json::Value as JSValue;

pub use crate::config::*;

// **** Private structures ****

// A candidate entry whose ballot position has been read as an integer.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
struct PositionedVote {
    position: i64,
    votes: u64,
}

/// Flattens one station.
///
/// Arguments:
/// * `record` the station, as read from the source
/// * `table` the names of the candidates, by ballot position
/// * `rules` the policy for the entries without a ballot position
///
/// The candidate columns come after the administrative ones, ordered by
/// ascending ballot position whatever the order of `candidatos` in the input.
pub fn transform_station(
    record: &RawStationRecord,
    table: &CandidateTable,
    rules: &TransformRules,
) -> Result<FlatStationRow, TransformError> {
    let station = project_station(record)?;
    let entries = read_candidates(record)?;

    let mut positioned: Vec<PositionedVote> = Vec::new();
    for entry in entries.iter() {
        match &entry.ballot_position {
            None | Some(JSValue::Null) => match rules.null_position {
                NullPositionPolicy::Fail => {
                    return Err(TransformError::MissingBallotPosition {
                        station: record.label(),
                        votes: entry.votes,
                    });
                }
                NullPositionPolicy::Skip => {
                    warn!(
                        "transform_station: station {}: skipping {} votes without ballot position",
                        record.label(),
                        entry.votes
                    );
                }
            },
            Some(x) => match x.as_i64() {
                Some(position) => positioned.push(PositionedVote {
                    position,
                    votes: entry.votes,
                }),
                None => {
                    return Err(TransformError::UnknownBallotPosition {
                        station: record.label(),
                        position: x.to_string(),
                    });
                }
            },
        }
    }
    // The sort is stable: equal positions keep their input order.
    positioned.sort_by_key(|pv| pv.position);

    let mut votes: Vec<(String, u64)> = Vec::new();
    for pv in positioned.iter() {
        let key = pv.position.to_string();
        let name = table
            .lookup(&key)
            .ok_or_else(|| TransformError::UnknownBallotPosition {
                station: record.label(),
                position: key.clone(),
            })?;
        // A repeated name keeps its first column and takes the last value.
        if let Some(elt) = votes.iter_mut().find(|(n, _)| n == name) {
            elt.1 = pv.votes;
        } else {
            votes.push((name.to_string(), pv.votes));
        }
    }
    debug!(
        "transform_station: station {}: votes {:?}",
        record.label(),
        votes
    );

    Ok(FlatStationRow { station, votes })
}

/// Flattens all the stations, in input order.
///
/// Stops at the first station that cannot be flattened.
pub fn transform_stations(
    records: &[RawStationRecord],
    table: &CandidateTable,
    rules: &TransformRules,
) -> Result<Vec<FlatStationRow>, BatchError> {
    info!("Processing {:?} stations, rules: {:?}", records.len(), rules);
    let mut res: Vec<FlatStationRow> = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let row =
            transform_station(record, table, rules).map_err(|cause| BatchError { index, cause })?;
        res.push(row);
    }
    Ok(res)
}

fn project_station(record: &RawStationRecord) -> Result<StationInfo, TransformError> {
    let field = |name: &'static str| read_field(record, name);
    Ok(StationInfo {
        id_region: field("id_region")?,
        id_cirsen: field("id_cirsen")?,
        id_distrito: field("id_distrito")?,
        id_provincia: field("id_provincia")?,
        orden_comuna: field("orden_comuna")?,
        id_comuna: field("id_comuna")?,
        id_mesa: field("id_mesa")?,
        mesa: field("mesa")?,
        id_local: field("id_local")?,
        orden_local: field("orden_local")?,
        blancos: field("blancos")?,
        nulos: field("nulos")?,
        total_general: field("total_general")?,
        electores: field("electores")?,
    })
}

fn read_field(record: &RawStationRecord, name: &'static str) -> Result<FieldValue, TransformError> {
    match record.get(name) {
        None => Err(TransformError::MissingField {
            station: record.label(),
            field: name,
        }),
        Some(JSValue::Null) => Ok(FieldValue::Null),
        Some(JSValue::Bool(b)) => Ok(FieldValue::Boolean(*b)),
        Some(JSValue::String(s)) => Ok(FieldValue::Text(s.clone())),
        Some(JSValue::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(FieldValue::Integer(i))
            } else if let Some(u) = n.as_u64() {
                Ok(FieldValue::Unsigned(u))
            } else if let Some(f) = n.as_f64() {
                Ok(FieldValue::Decimal(f))
            } else {
                Ok(FieldValue::Text(n.to_string()))
            }
        }
        Some(x) => Err(TransformError::WrongFieldType {
            station: record.label(),
            field: name,
            value: x.to_string(),
        }),
    }
}

fn read_candidates(record: &RawStationRecord) -> Result<Vec<CandidateVoteEntry>, TransformError> {
    let list = match record.get("candidatos") {
        Some(JSValue::Array(l)) => l,
        _ => {
            return Err(TransformError::MissingCandidates {
                station: record.label(),
            })
        }
    };
    let mut res: Vec<CandidateVoteEntry> = Vec::with_capacity(list.len());
    for elt in list.iter() {
        let entry = CandidateVoteEntry::deserialize(elt).map_err(|e| {
            TransformError::MalformedCandidate {
                station: record.label(),
                message: e.to_string(),
            }
        })?;
        res.push(entry);
    }
    Ok(res)
}
