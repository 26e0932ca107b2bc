use log::{debug, error, info};

use mesa_flatten::builder::assemble_table;
use mesa_flatten::*;
use snafu::{prelude::*, Snafu};

use std::fmt::Display;
use std::path::PathBuf;

use crate::servel::io_common::*;

pub mod io_common;
pub mod io_csv;
pub mod io_gzip;

#[derive(Debug, Snafu)]
pub enum ServelError {
    #[snafu(display("Input file {path} not found"))]
    FileNotFound {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening input file {path}"))]
    OpeningInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error decompressing {path}"))]
    Decompressing {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the stations in {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error flattening the stations of {election}: {source}"))]
    Transform {
        source: BatchError,
        election: String,
    },
    #[snafu(display("Error creating output file {path}"))]
    CreatingOutput { source: csv::Error, path: String },
    #[snafu(display("Error writing CSV file {path}"))]
    WritingCsv { source: csv::Error, path: String },
}

pub type ServelResult<T> = Result<T, ServelError>;

/// An election round. Each round has its own input and output files.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Election {
    PrimeraVuelta,
    SegundaVuelta,
}

impl Election {
    /// The rounds, in processing order.
    pub const ALL: [Election; 2] = [Election::PrimeraVuelta, Election::SegundaVuelta];

    pub fn id(&self) -> &'static str {
        match self {
            Election::PrimeraVuelta => "primera_vuelta",
            Election::SegundaVuelta => "segunda_vuelta",
        }
    }
}

impl Display for Election {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub table: CandidateTable,
    pub rules: TransformRules,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: PathBuf::from("."),
            out_dir: PathBuf::from("."),
            table: CandidateTable::PRESIDENTIAL_2025,
            rules: TransformRules::DEFAULT_RULES,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionSummary {
    pub stations: usize,
    pub columns: usize,
    pub output: PathBuf,
}

/// Loads, flattens and writes one round.
pub fn run_election(election: Election, settings: &Settings) -> ServelResult<ElectionSummary> {
    info!("Processing election {}", election);
    let input = input_path(&settings.data_dir, election);
    let stations = io_gzip::read_stations(&input)?;

    let rows = transform_stations(&stations, &settings.table, &settings.rules).context(
        TransformSnafu {
            election: election.id(),
        },
    )?;
    drop(stations);

    let table = assemble_table(&rows);
    debug!("run_election: {}: columns {:?}", election, table.columns);

    let output = output_path(&settings.out_dir, election);
    io_csv::write_table(&output, &table)?;

    Ok(ElectionSummary {
        stations: table.rows.len(),
        columns: table.columns.len(),
        output,
    })
}

/// Runs all the rounds, one after the other.
///
/// A failing round does not stop the next one: every round gets its own result.
pub fn run_all(settings: &Settings) -> Vec<(Election, ServelResult<ElectionSummary>)> {
    let mut res: Vec<(Election, ServelResult<ElectionSummary>)> = Vec::new();
    for election in Election::ALL {
        let r = run_election(election, settings);
        match &r {
            Ok(summary) => info!(
                "Election {}: wrote {} stations and {} columns to {}",
                election,
                summary.stations,
                summary.columns,
                summary.output.display()
            ),
            Err(e) => error!("Election {} failed: {}", election, e),
        }
        res.push((election, r));
    }
    res
}

/// The process exit status: 0 when every round succeeded, 1 otherwise.
pub fn exit_code(results: &[(Election, ServelResult<ElectionSummary>)]) -> i32 {
    if results.iter().all(|(_, r)| r.is_ok()) {
        0
    } else {
        1
    }
}
