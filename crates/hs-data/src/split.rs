//! Random train/test splitting of a single dataset.
//!
//! Each data line lands in the train file with probability `fraction`,
//! otherwise in the test file; comment lines (leading `#`) are copied to
//! both. The random source is a seeded ChaCha stream so a given
//! (dataset, fraction, seed) always produces the same partition.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use hs_types::{ConfigError, DataError, HsResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Seed used when the caller does not supply one. Fixed so repeated runs
/// partition identically.
pub const DEFAULT_SPLIT_SEED: u64 = 8675309;

/// Split `dataset` into `<dataset>.train.split` / `<dataset>.test.split`.
/// Returns the two paths, train first.
pub fn split_dataset(dataset: &Path, fraction: f64, seed: u64) -> HsResult<(PathBuf, PathBuf)> {
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(ConfigError::BadSplitFraction { fraction }.into());
    }
    let input = File::open(dataset).map_err(|_| DataError::DatasetNotFound {
        path: dataset.display().to_string(),
    })?;

    let train_path = append_suffix(dataset, ".train.split");
    let test_path = append_suffix(dataset, ".test.split");
    let mut train_out = BufWriter::new(File::create(&train_path)?);
    let mut test_out = BufWriter::new(File::create(&test_path)?);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for line in BufReader::new(input).lines() {
        let line = line?;
        if line.starts_with('#') {
            writeln!(train_out, "{line}")?;
            writeln!(test_out, "{line}")?;
            continue;
        }
        let roll: f64 = rng.gen();
        if roll > fraction {
            writeln!(test_out, "{line}")?;
        } else {
            writeln!(train_out, "{line}")?;
        }
    }
    train_out.flush()?;
    test_out.flush()?;

    info!(
        train = %train_path.display(),
        test = %test_path.display(),
        "split dataset"
    );
    Ok((train_path, test_path))
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
