/// Largest power of two that is less than or equal to `n`, or 0 when `n` is 0.
///
/// Flood-fills every bit below the highest set bit (so `0b0101_0000` becomes
/// `0b0111_1111`), then clears all but the top one by subtracting the same
/// pattern shifted right by one.
pub const fn bit_floor(n: u64) -> u64 {
    let mut n = n;
    n |= n >> 1;
    n |= n >> 2;
    n |= n >> 4;
    n |= n >> 8;
    n |= n >> 16;
    n |= n >> 32;
    n - (n >> 1)
}

/// Return a bit mask with `n` 1-bits set in the low bits.
/// `n` may be anywhere in `0..=64`.
pub const fn low_mask(n: u32) -> u64 {
    match u64::MAX.checked_shr(u64::BITS - n) {
        Some(mask) => mask,
        None => 0,
    }
}
