// src/moves/magic/precompute.rs
// Builds magic bitboard tables from scratch: relevant-occupancy masks, every
// blocker subset of each mask (Carry-Rippler enumeration), the scan-based
// reference attack for that subset, and a randomized magic-number search
// that hashes subsets into a collision-free table.

use super::attacks::{bishop_attacks_per_square, rook_attacks_per_square};
use super::search::find_magic_number_for_square;
use super::structs::{BishopMagicTables, MagicEntry, MagicTables, RookMagicTables};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// How to seed the magic-number search.
pub enum MagicTableSeed {
    /// Deterministic: reproducible tables for tests and the `deterministic_magic` feature.
    Fixed(u64),
}

fn rook_mask(square: usize) -> u64 {
    let rank = (square / 8) as i32;
    let file = (square % 8) as i32;
    let mut mask = 0u64;
    for r in (rank + 1)..7 {
        mask |= 1u64 << (r * 8 + file);
    }
    for r in (1..rank).rev() {
        mask |= 1u64 << (r * 8 + file);
    }
    for f in (file + 1)..7 {
        mask |= 1u64 << (rank * 8 + f);
    }
    for f in (1..file).rev() {
        mask |= 1u64 << (rank * 8 + f);
    }
    mask
}

fn bishop_mask(square: usize) -> u64 {
    let rank = (square / 8) as i32;
    let file = (square % 8) as i32;
    let mut mask = 0u64;
    let dirs = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
    for &(dr, df) in &dirs {
        let mut r = rank + dr;
        let mut f = file + df;
        while (1..7).contains(&r) && (1..7).contains(&f) {
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }
    mask
}

/// Every subset of `mask`'s set bits, including zero, via the Carry-Rippler trick.
fn subsets_of(mask: u64) -> Vec<u64> {
    let mut subsets = Vec::with_capacity(1 << mask.count_ones());
    let mut subset = 0u64;
    loop {
        subsets.push(subset);
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }
    subsets
}

fn build_entry(
    square: usize,
    mask: u64,
    reference: impl Fn(usize, u64) -> u64,
    rng: &mut StdRng,
) -> Result<MagicEntry, String> {
    let blockers = subsets_of(mask);
    let attacks: Vec<u64> = blockers.iter().map(|&b| reference(square, b)).collect();
    let shift = 64 - mask.count_ones();

    let magic = find_magic_number_for_square(&blockers, &attacks, shift, rng)?;

    let table_size = 1usize << mask.count_ones();
    let mut table = vec![0u64; table_size];
    for (&b, &a) in blockers.iter().zip(attacks.iter()) {
        let index = ((b.wrapping_mul(magic)) >> shift) as usize;
        table[index] = a;
    }

    Ok(MagicEntry {
        magic,
        shift,
        mask,
        table: table.into_boxed_slice(),
    })
}

/// Generate complete rook + bishop magic tables for all 64 squares.
pub fn generate_magic_tables(seed: MagicTableSeed) -> Result<MagicTables, String> {
    let MagicTableSeed::Fixed(seed_value) = seed;
    let mut rng = StdRng::seed_from_u64(seed_value);

    let mut rook_entries = Vec::with_capacity(64);
    let mut bishop_entries = Vec::with_capacity(64);

    for square in 0..64 {
        rook_entries.push(build_entry(
            square,
            rook_mask(square),
            rook_attacks_per_square,
            &mut rng,
        )?);
        bishop_entries.push(build_entry(
            square,
            bishop_mask(square),
            bishop_attacks_per_square,
            &mut rng,
        )?);
    }

    Ok(MagicTables {
        rook: RookMagicTables {
            entries: rook_entries,
        },
        bishop: BishopMagicTables {
            entries: bishop_entries,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_mask_excludes_board_edges() {
        let mask = rook_mask(0); // a1
        assert_eq!(mask & 0x8080_8080_8080_8080, 0); // no h-file bit
        assert_eq!(mask & 0xFF00_0000_0000_0000, 0); // no rank 8 bit
    }

    #[test]
    fn bishop_mask_excludes_board_edges() {
        let mask = bishop_mask(27); // d4
        assert_eq!(mask & 0xFF00_0000_0000_00FF, 0); // no rank 1 or rank 8 bits
    }

    #[test]
    fn subsets_of_mask_has_correct_cardinality() {
        let mask = 0b1011u64;
        let subsets = subsets_of(mask);
        assert_eq!(subsets.len(), 1 << mask.count_ones());
    }

    #[test]
    fn generated_tables_match_scan_reference_everywhere() {
        let tables = generate_magic_tables(MagicTableSeed::Fixed(0x45)).unwrap();
        for square in [0usize, 27, 63] {
            let blockers = 0u64;
            assert_eq!(
                tables.rook.get_attacks(square, blockers),
                rook_attacks_per_square(square, blockers)
            );
            assert_eq!(
                tables.bishop.get_attacks(square, blockers),
                bishop_attacks_per_square(square, blockers)
            );
        }
    }
}
