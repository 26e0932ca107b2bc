mod args;
mod servel;

use clap::Parser;
use log::{debug, info};
use snafu::ErrorCompat;

use crate::args::Args;
use crate::servel::*;

fn main() {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    debug!("args: {:?}", args);

    let results = run_all(&Settings::default());
    for (election, res) in results.iter() {
        match res {
            Ok(summary) => {
                info!("{}: done ({} stations)", election, summary.stations);
            }
            Err(e) => {
                eprintln!("An error occured while processing {}: {}", election, e);
                for cause in ErrorCompat::iter_chain(e).skip(1) {
                    eprintln!("  caused by: {}", cause);
                }
            }
        }
    }
    std::process::exit(exit_code(&results));
}
