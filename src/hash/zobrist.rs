use crate::board::{Board, Color, Piece};
use once_cell::sync::OnceCell;
use rand::{RngCore, SeedableRng, rngs::StdRng};

const FILE_A: u64 = 0x0101_0101_0101_0101;
const FILE_H: u64 = 0x8080_8080_8080_8080;

/// Fixed seed used to (re)generate the persisted constants file when it is
/// absent (see `hash::persist`).
pub const PERSISTED_SEED: u64 = 2_361_912;

#[cfg(feature = "deterministic_zobrist")]
const IN_MEMORY_SEED: u64 = 0x9E37_79B9_AAAC_5C87;

/// 8 piece-kind slots per color (only 0..=5, Pawn..King, are ever read by
/// board logic); 16 castling-rights slots indexed directly by the 4-bit
/// rights bitmask; 9 en-passant-file slots (0..=7 = file a..h, 8 reserved);
/// plus the side-to-move key. `(8*2*64) + 16 + 9 + 1 == 1050` constants,
/// matching the on-disk persisted layout.
pub struct ZobristKeys {
    pub piece: [[[u64; 64]; 8]; 2],
    pub castling: [u64; 16],
    pub ep_file: [u64; 9],
    pub side_to_move: u64,
}

impl ZobristKeys {
    pub const CONSTANT_COUNT: usize = 8 * 2 * 64 + 16 + 9 + 1;

    /// Flatten into the exact order persisted to disk: piece[color][kind][sq]
    /// (color-major), then castling, then ep_file, then side_to_move.
    pub fn to_flat(&self) -> Vec<u64> {
        let mut out = Vec::with_capacity(Self::CONSTANT_COUNT);
        for color in &self.piece {
            for kind in color {
                out.extend_from_slice(kind);
            }
        }
        out.extend_from_slice(&self.castling);
        out.extend_from_slice(&self.ep_file);
        out.push(self.side_to_move);
        out
    }

    pub fn from_flat(flat: &[u64]) -> Option<Self> {
        if flat.len() != Self::CONSTANT_COUNT {
            return None;
        }
        let mut it = flat.iter().copied();
        let mut piece = [[[0u64; 64]; 8]; 2];
        for color in piece.iter_mut() {
            for kind in color.iter_mut() {
                for slot in kind.iter_mut() {
                    *slot = it.next()?;
                }
            }
        }
        let mut castling = [0u64; 16];
        for slot in castling.iter_mut() {
            *slot = it.next()?;
        }
        let mut ep_file = [0u64; 9];
        for slot in ep_file.iter_mut() {
            *slot = it.next()?;
        }
        let side_to_move = it.next()?;
        Some(ZobristKeys {
            piece,
            castling,
            ep_file,
            side_to_move,
        })
    }
}

/// Generate a fresh key set from a given RNG, avoiding zero keys (reduces
/// degenerate collisions). Used both for in-memory generation and for
/// (re)building the persisted constants file.
pub fn generate_zobrist_keys_with_rng(mut rng: StdRng) -> ZobristKeys {
    #[inline]
    fn non_zero(r: &mut StdRng) -> u64 {
        let mut v = r.next_u64();
        while v == 0 {
            v = r.next_u64();
        }
        v
    }

    let mut keys = ZobristKeys {
        piece: [[[0u64; 64]; 8]; 2],
        castling: [0u64; 16],
        ep_file: [0u64; 9],
        side_to_move: 0,
    };

    for color in keys.piece.iter_mut() {
        for kind in color.iter_mut() {
            for sq in kind.iter_mut() {
                *sq = non_zero(&mut rng);
            }
        }
    }
    for slot in keys.castling.iter_mut() {
        *slot = non_zero(&mut rng);
    }
    for slot in keys.ep_file.iter_mut() {
        *slot = non_zero(&mut rng);
    }
    keys.side_to_move = non_zero(&mut rng);

    keys
}

/// XOR the castling-rights component of the hash from `old` to `new_` in one
/// step: both rights values index the same table directly, so the delta is
/// just the XOR of the two entries.
#[inline]
pub fn xor_castling_rights_delta(hash: &mut u64, keys: &ZobristKeys, old: u8, new_: u8) {
    if old != new_ {
        *hash ^= keys.castling[old as usize] ^ keys.castling[new_ as usize];
    }
}

/// Returns Some(file 0..7) if EP should contribute to the hash *this ply*; else None.
/// Rule: include EP only if side-to-move has at least one pawn that could capture onto ep_square.
/// Pseudo-legal only (ignore pins/king safety).
pub fn ep_file_to_hash(board: &Board) -> Option<u8> {
    let ep = board.en_passant?;
    let s = ep.index();

    let r = s / 8;
    if !(r == 2 || r == 5) {
        return None;
    }

    let bb_s: u64 = 1u64 << s;

    let has_capturing_pawn = match board.side_to_move {
        Color::White => {
            let src_ne = (bb_s >> 9) & !FILE_H;
            let src_nw = (bb_s >> 7) & !FILE_A;
            ((src_ne | src_nw) & board.bb(Color::White, Piece::Pawn)) != 0
        }
        Color::Black => {
            let src_se = (bb_s << 7) & !FILE_A;
            let src_sw = (bb_s << 9) & !FILE_H;
            ((src_se | src_sw) & board.bb(Color::Black, Piece::Pawn)) != 0
        }
    };

    if has_capturing_pawn { Some(s % 8) } else { None }
}

/// Process-wide, read-only-after-init Zobrist constants. Under
/// `deterministic_zobrist` these are generated purely in memory from a fixed
/// seed (handy for reproducible tests); otherwise they are loaded from (or
/// written to) the on-disk persisted-constants file.
pub fn zobrist_keys() -> &'static ZobristKeys {
    static KEYS: OnceCell<ZobristKeys> = OnceCell::new();
    KEYS.get_or_init(|| {
        #[cfg(feature = "deterministic_zobrist")]
        {
            generate_zobrist_keys_with_rng(StdRng::seed_from_u64(IN_MEMORY_SEED))
        }
        #[cfg(not(feature = "deterministic_zobrist"))]
        {
            crate::hash::persist::load_or_generate(std::path::Path::new(
                crate::hash::persist::DEFAULT_ZOBRIST_FILE,
            ))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_roundtrip_preserves_keys() {
        let keys = generate_zobrist_keys_with_rng(StdRng::seed_from_u64(42));
        let flat = keys.to_flat();
        assert_eq!(flat.len(), ZobristKeys::CONSTANT_COUNT);
        let back = ZobristKeys::from_flat(&flat).expect("valid flat layout");
        assert_eq!(keys.piece, back.piece);
        assert_eq!(keys.castling, back.castling);
        assert_eq!(keys.ep_file, back.ep_file);
        assert_eq!(keys.side_to_move, back.side_to_move);
    }

    #[test]
    fn constant_count_matches_spec_formula() {
        assert_eq!(ZobristKeys::CONSTANT_COUNT, 1050);
    }

    #[test]
    fn castling_delta_is_symmetric() {
        let keys = generate_zobrist_keys_with_rng(StdRng::seed_from_u64(7));
        let mut hash = 0u64;
        xor_castling_rights_delta(&mut hash, &keys, 0b1111, 0b0000);
        xor_castling_rights_delta(&mut hash, &keys, 0b0000, 0b1111);
        assert_eq!(hash, 0);
    }
}
