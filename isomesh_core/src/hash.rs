//! Seed hashing primitives.
//!
//! FNV-1a over little-endian integer bytes. Used to turn a user seed into a
//! noise permutation and a lattice offset; not cryptographic.

// FNV-1a constants
const FNV_OFFSET_64: u64 = 0xcbf29ce484222325;
const FNV_PRIME_64: u64 = 0x00000100000001b3;
const FNV_OFFSET_32: u32 = 0x811c9dc5;
const FNV_PRIME_32: u32 = 0x01000193;

/// FNV-1a 64-bit hash of a byte slice.
#[inline]
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_64;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME_64);
    }
    hash
}

/// FNV-1a 32-bit hash of a byte slice.
#[inline]
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_32;
    for &byte in bytes {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(FNV_PRIME_32);
    }
    hash
}

/// Hash a seed together with a stream index.
///
/// Distinct `(seed, stream)` pairs give independent-looking values, which is
/// what the permutation shuffle draws from.
#[inline]
pub fn hash_seed(seed: u32, stream: u32) -> u64 {
    let mut bytes = [0u8; 8];
    bytes[..4].copy_from_slice(&seed.to_le_bytes());
    bytes[4..].copy_from_slice(&stream.to_le_bytes());
    fnv1a_64(&bytes)
}

/// Derive a lattice offset in `[0, 256)` per axis from a seed.
///
/// Shifting the sample point by this offset moves the sampled region of the
/// noise lattice, so different seeds produce different terrain even with the
/// same permutation table.
#[inline]
pub fn seed_offset(seed: u32) -> [f32; 3] {
    let mut bytes = [0u8; 5];
    bytes[..4].copy_from_slice(&seed.to_le_bytes());

    let mut out = [0.0f32; 3];
    for (axis, slot) in out.iter_mut().enumerate() {
        bytes[4] = axis as u8;
        // 8 integer bits plus 8 fractional bits
        *slot = (fnv1a_32(&bytes) & 0xFFFF) as f32 / 256.0;
    }
    out
}
