//! Deterministic stand-in for randomness in the grid.
//!
//! Spacer placement must not change between renders, so instead of a seeded
//! RNG every decision is derived from the album id alone.

/// 32-bit polynomial string hash: `h = 31 * h + unit` over the UTF-16 code
/// units of `id`, starting from 0, wrapping on overflow.
///
/// UTF-16 units (not bytes or chars) keep the values identical to the ones
/// browsers compute for the same id, so server-side and client-side layouts
/// agree cell for cell.
pub fn hash_id(id: &str) -> i32 {
    id.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Low byte of the hash mapped onto `[0, 1]`.
#[inline]
pub fn spacer_roll(hash: i32) -> f64 {
    f64::from(hash & 0xFF) / 255.0
}

/// Whether the album with this id is preceded by a spacer at the given rate.
#[inline]
pub fn wants_spacer(id: &str, rate: f64) -> bool {
    spacer_roll(hash_id(id)) < rate
}
