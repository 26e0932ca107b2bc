// Primitives for reading the gzip-compressed JSON dumps.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::servel::*;

pub fn read_stations(path: &Path) -> ServelResult<Vec<RawStationRecord>> {
    let p = path.display().to_string();
    info!("Attempting to read station file {:?}", p);

    let contents = {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(e).context(FileNotFoundSnafu { path: p });
            }
            Err(e) => return Err(e).context(OpeningInputSnafu { path: p }),
        };
        let mut contents = String::new();
        MultiGzDecoder::new(BufReader::new(file))
            .read_to_string(&mut contents)
            .context(DecompressingSnafu { path: p.clone() })?;
        contents
    };
    debug!("read_stations: {:?}: {} bytes decompressed", p, contents.len());

    let stations: Vec<RawStationRecord> =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path: p.clone() })?;
    info!("Read {} stations from {:?}", stations.len(), p);
    Ok(stations)
}
