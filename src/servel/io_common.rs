use std::path::{Path, PathBuf};

use crate::servel::Election;

pub const INPUT_SUFFIX: &str = ".json.gz";
pub const OUTPUT_SUFFIX: &str = ".csv";

pub fn input_path(dir: &Path, election: Election) -> PathBuf {
    dir.join(format!("{}{}", election.id(), INPUT_SUFFIX))
}

pub fn output_path(dir: &Path, election: Election) -> PathBuf {
    dir.join(format!("{}{}", election.id(), OUTPUT_SUFFIX))
}

#[cfg(test)]
pub fn write_json_gz(path: &Path, js: &serde_json::Value) {
    write_gz(path, js.to_string().as_bytes());
}

#[cfg(test)]
pub fn write_gz(path: &Path, content: &[u8]) {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let file = std::fs::File::create(path).unwrap();
    let mut enc = GzEncoder::new(file, Compression::default());
    enc.write_all(content).unwrap();
    enc.finish().unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_election_id() {
        let dir = Path::new("data");
        assert_eq!(
            input_path(dir, Election::PrimeraVuelta),
            PathBuf::from("data/primera_vuelta.json.gz")
        );
        assert_eq!(
            output_path(Path::new("."), Election::SegundaVuelta),
            PathBuf::from("./segunda_vuelta.csv")
        );
    }
}
