use clap::Parser;

/// Flattens the per-station results of the two presidential rounds into CSV files.
///
/// Reads primera_vuelta.json.gz and segunda_vuelta.json.gz from the current directory and
/// writes primera_vuelta.csv and segunda_vuelta.csv next to them, replacing existing files.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
