//! On-disk persistence for Zobrist random constants (spec §6.3): a single
//! text file of 1050 comma-separated u64 values, generated with a fixed seed
//! if missing so that hashes are reproducible across runs on the same
//! machine without shipping a binary blob.

use crate::hash::zobrist::{PERSISTED_SEED, ZobristKeys, generate_zobrist_keys_with_rng};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tracing::warn;

pub const DEFAULT_ZOBRIST_FILE: &str = "zobrist.keys";

/// Load the constants file at `path`, or generate it (with the fixed spec
/// seed) and best-effort write it out if missing or corrupt.
pub fn load_or_generate(path: &Path) -> ZobristKeys {
    if let Some(keys) = try_load(path) {
        return keys;
    }
    let keys = generate_zobrist_keys_with_rng(StdRng::seed_from_u64(PERSISTED_SEED));
    if let Err(e) = save(path, &keys) {
        warn!(error = %e, path = %path.display(), "could not persist zobrist constants; continuing in-memory");
    }
    keys
}

fn try_load(path: &Path) -> Option<ZobristKeys> {
    let text = std::fs::read_to_string(path).ok()?;
    let values: Option<Vec<u64>> = text
        .trim()
        .split(',')
        .map(|tok| tok.trim().parse::<u64>().ok())
        .collect();
    let values = values?;
    let keys = ZobristKeys::from_flat(&values);
    if keys.is_none() {
        warn!(
            path = %path.display(),
            found = values.len(),
            expected = ZobristKeys::CONSTANT_COUNT,
            "zobrist constants file has wrong length; regenerating"
        );
    }
    keys
}

fn save(path: &Path, keys: &ZobristKeys) -> std::io::Result<()> {
    let flat = keys.to_flat();
    let text = flat
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    std::fs::write(path, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_a_temp_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("corvid-zobrist-test-{}.keys", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let first = load_or_generate(&path);
        let second = try_load(&path).expect("file should now exist");
        assert_eq!(first.to_flat(), second.to_flat());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let a = generate_zobrist_keys_with_rng(StdRng::seed_from_u64(PERSISTED_SEED));
        let b = generate_zobrist_keys_with_rng(StdRng::seed_from_u64(PERSISTED_SEED));
        assert_eq!(a.to_flat(), b.to_flat());
    }

    #[test]
    fn missing_file_regenerates_with_fixed_seed() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("corvid-zobrist-missing-{}.keys", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let keys = load_or_generate(&path);
        let expected = generate_zobrist_keys_with_rng(StdRng::seed_from_u64(PERSISTED_SEED));
        assert_eq!(keys.to_flat(), expected.to_flat());
        let _ = std::fs::remove_file(&path);
    }
}
