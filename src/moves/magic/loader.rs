// src/moves/magic/loader.rs
// Process-wide cache for magic bitboard tables. Building them involves a
// randomized per-square magic-number search, so we pay that cost once and
// hand out clones afterward (entries are a handful of boxed slices, cheap
// next to re-searching).

use super::precompute::{MagicTableSeed, generate_magic_tables};
use super::structs::MagicTables;
use once_cell::sync::OnceCell;
use tracing::warn;

const MAGIC_SEED: u64 = 7_919_341;

#[cfg(feature = "deterministic_magic")]
const IN_MEMORY_SEED: u64 = 0xC0FF_EE15_BEEF_CAFE;

pub const DEFAULT_MAGIC_FILE: &str = "magic.bin";

/// Returns the process-wide magic bitboard tables, building them on first use.
pub fn load_magic_tables() -> MagicTables {
    static TABLES: OnceCell<MagicTables> = OnceCell::new();
    TABLES
        .get_or_init(|| {
            #[cfg(feature = "deterministic_magic")]
            {
                generate_magic_tables(MagicTableSeed::Fixed(IN_MEMORY_SEED))
                    .expect("magic number search failed for deterministic seed")
            }
            #[cfg(all(feature = "load_magic", not(feature = "deterministic_magic")))]
            {
                load_or_generate(std::path::Path::new(DEFAULT_MAGIC_FILE))
            }
            #[cfg(not(any(feature = "deterministic_magic", feature = "load_magic")))]
            {
                generate_magic_tables(MagicTableSeed::Fixed(MAGIC_SEED))
                    .expect("magic number search failed for default seed")
            }
        })
        .clone()
}

#[cfg(feature = "load_magic")]
fn load_or_generate(path: &std::path::Path) -> MagicTables {
    if let Some(tables) = try_load(path) {
        return tables;
    }
    let tables = generate_magic_tables(MagicTableSeed::Fixed(MAGIC_SEED))
        .expect("magic number search failed for default seed");
    if let Err(e) = save(path, &tables) {
        warn!(error = %e, path = %path.display(), "could not persist magic tables; continuing in-memory");
    }
    tables
}

#[cfg(feature = "load_magic")]
fn try_load(path: &std::path::Path) -> Option<MagicTables> {
    let bytes = std::fs::read(path).ok()?;
    match bincode::deserialize(&bytes) {
        Ok(tables) => Some(tables),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "magic table blob is corrupt; regenerating");
            None
        }
    }
}

#[cfg(feature = "load_magic")]
fn save(path: &std::path::Path, tables: &MagicTables) -> std::io::Result<()> {
    let bytes = bincode::serialize(tables).expect("magic tables are always serializable");
    std::fs::write(path, bytes)
}
