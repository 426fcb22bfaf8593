// Morton (Z-order) codes for any number of equal-width lanes that fit in 64 bits.
//
// Lane `i` of a `d`-dimensional code occupies bit positions i, i + d, i + 2d, ...
// so 2d codes are laid out as yxyxyxyx and 3d codes as zyxzyxzyxzyx, with x
// (the first value passed in) in the lowest bit.
//
// The fixed-width spread routines from Fabian Giesen's "Decoding Morton codes"
// (https://fgiesen.wordpress.com/2009/12/13/decoding-morton-codes/) are a chain of
// `x = (x | (x << s)) & m` steps where `s` halves every time. For d = 2:
//
//   x = ---- ---- ---- ---- fedc ba98 7654 3210
//   x = ---- ---- fedc ba98 ---- ---- 7654 3210   s = 8
//   x = ---- fedc ---- ba98 ---- 7654 ---- 3210   s = 4
//   x = --fe --dc --ba --98 --76 --54 --32 --10   s = 2
//   x = -f-e -d-c -b-a -9-8 -7-6 -5-4 -3-2 -1-0   s = 1
//
// Here the chain is derived instead of hardcoded. Bit k has to travel
// distance(k) = (d - 1) * k positions. Read that distance in binary: the step with
// shift `s` moves bit k iff `s` is set in distance(k), and since steps run from the
// largest shift down, once the step with shift `s` is done bit k sits at
//
//   k + (distance(k) & !(s - 1))
//
// which is exactly what that step's mask has to keep. The first shift is the largest
// power of two not exceeding the largest distance, and a shift that is not part of
// any distance gets no step at all.
//
// Gathering runs the same table backwards. Step j's mask describes the layout
// *before* step j + 1 moved anything, so undoing step j + 1 is
// `x = (x | (x >> shift[j + 1])) & mask[j]`, hence the gather shifts are the spread
// shifts moved down by one slot with a 0 appended for the last (pure masking) step.

use crate::error::MortonError;
use crate::utils::bit_floor;
use crate::utils::low_mask;

/// One `x = (x | (x << shift)) & mask` step of the spread transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    mask: u64,
    shift: u32,
}

/// Packs `dimensions` unsigned lanes of `bits` bits each into one 64-bit Morton code.
///
/// The masks and shifts are computed once in [`Morton64::new`]; every other method
/// is a pure function of its arguments and that table, so one codec can be shared
/// freely between threads.
///
/// ```
/// use morton64::Morton64;
///
/// let m = Morton64::new(2, 32)?;
/// let code = m.pack(&[1, 2])?;
/// assert_eq!(code, 0b1001);
/// assert_eq!(m.unpack(code), vec![1, 2]);
///
/// let code = m.spack(&[-5, 7])?;
/// assert_eq!(m.sunpack(code), vec![-5, 7]);
/// # Ok::<(), morton64::MortonError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morton64 {
    dimensions: u32,
    bits: u32,
    /// Spread steps, applied first to last. `steps[0]` only masks the input.
    steps: Box<[Step]>,
    /// `gather_shifts[j]` is paired with `steps[j].mask`, applied last to first.
    gather_shifts: Box<[u32]>,
}

impl Morton64 {
    /// Build a codec for `dimensions` lanes of `bits` bits each.
    ///
    /// Fails unless both are non-zero and `dimensions * bits <= 64`.
    pub fn new(dimensions: u32, bits: u32) -> Result<Self, MortonError> {
        let fits = matches!(dimensions.checked_mul(bits), Some(total) if total <= u64::BITS);
        if dimensions == 0 || bits == 0 || !fits {
            return Err(MortonError::InvalidConfiguration { dimensions, bits });
        }

        let steps = spread_steps(dimensions, bits);
        let gather_shifts: Box<[u32]> = steps
            .iter()
            .skip(1)
            .map(|step| step.shift)
            .chain(std::iter::once(0))
            .collect();

        log::debug!(
            "morton codec for {} dimensions of {} bits: {:x?}",
            dimensions,
            bits,
            steps
        );

        Ok(Self {
            dimensions,
            bits,
            steps,
            gather_shifts,
        })
    }

    /// Number of lanes in a code.
    pub fn dimensions(&self) -> u32 {
        self.dimensions
    }

    /// Bit width of every lane.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Largest value [`Morton64::pack`] accepts in a lane.
    pub fn max_value(&self) -> u64 {
        low_mask(self.bits)
    }

    /// Largest magnitude [`Morton64::spack`] accepts in a lane. The top bit of each
    /// lane holds the sign, so this is 0 for 1-bit lanes.
    pub fn max_signed(&self) -> i64 {
        (self.sign_bit() - 1) as i64
    }

    /// Interleave `values` (lane 0 first) into a Morton code.
    ///
    /// The code uses all 64 bits and is returned as the `i64` with the same bit pattern.
    pub fn pack(&self, values: &[u64]) -> Result<i64, MortonError> {
        self.check_dimensions(values.len())?;
        let max = self.max_value();
        if let Some(&value) = values.iter().find(|&&value| value > max) {
            return Err(MortonError::ValueOutOfRange { value });
        }

        let code = values
            .iter()
            .enumerate()
            .fold(0u64, |code, (i, &value)| code | (self.spread(value) << i));
        Ok(code as i64)
    }

    /// Pack signed lanes, each stored as sign and magnitude.
    ///
    /// A value is accepted when its magnitude is at most [`Morton64::max_signed`].
    /// Values are checked before the length, so an out-of-range value is reported
    /// even when the number of values is also wrong.
    pub fn spack(&self, values: &[i64]) -> Result<i64, MortonError> {
        let lanes = values
            .iter()
            .map(|&value| self.encode_sign(value))
            .collect::<Result<Vec<u64>, MortonError>>()?;
        self.pack(&lanes)
    }

    /// Split a code back into its lanes. Never fails: bits of `code` above
    /// `dimensions * bits` are ignored.
    pub fn unpack(&self, code: i64) -> Vec<u64> {
        let code = code as u64;
        (0..self.dimensions).map(|i| self.gather(code >> i)).collect()
    }

    /// Like [`Morton64::unpack`], but writes the lanes into `out`.
    pub fn unpack_into(&self, code: i64, out: &mut [u64]) -> Result<(), MortonError> {
        self.check_dimensions(out.len())?;
        let code = code as u64;
        for (i, lane) in out.iter_mut().enumerate() {
            *lane = self.gather(code >> i);
        }
        Ok(())
    }

    /// Split a code produced by [`Morton64::spack`] back into signed lanes.
    pub fn sunpack(&self, code: i64) -> Vec<i64> {
        let code = code as u64;
        (0..self.dimensions)
            .map(|i| self.decode_sign(self.gather(code >> i)))
            .collect()
    }

    /// Like [`Morton64::sunpack`], but writes the lanes into `out`.
    pub fn sunpack_into(&self, code: i64, out: &mut [i64]) -> Result<(), MortonError> {
        self.check_dimensions(out.len())?;
        let code = code as u64;
        for (i, lane) in out.iter_mut().enumerate() {
            *lane = self.decode_sign(self.gather(code >> i));
        }
        Ok(())
    }

    /// Move bit `k` of `value` to bit `k * dimensions`. Bits at or above `bits` are dropped.
    pub fn spread(&self, value: u64) -> u64 {
        self.steps
            .iter()
            .fold(value, |x, step| (x | (x << step.shift)) & step.mask)
    }

    /// Inverse of [`Morton64::spread`]: collect every `dimensions`-th bit of `code`,
    /// starting at bit 0, into the low `bits` bits.
    pub fn gather(&self, code: u64) -> u64 {
        self.steps
            .iter()
            .zip(self.gather_shifts.iter())
            .rev()
            .fold(code, |x, (step, &shift)| (x | (x >> shift)) & step.mask)
    }

    fn check_dimensions(&self, got: usize) -> Result<(), MortonError> {
        let expected = self.dimensions as usize;
        if got != expected {
            return Err(MortonError::DimensionMismatch { expected, got });
        }
        Ok(())
    }

    /// The highest bit of a lane, which holds the sign in signed codes.
    fn sign_bit(&self) -> u64 {
        1u64 << (self.bits - 1)
    }

    fn encode_sign(&self, value: i64) -> Result<u64, MortonError> {
        let sign = self.sign_bit();
        let magnitude = value.unsigned_abs();
        if magnitude >= sign {
            return Err(MortonError::SignedValueOutOfRange { value });
        }
        Ok(if value < 0 { magnitude | sign } else { magnitude })
    }

    fn decode_sign(&self, lane: u64) -> i64 {
        let sign = self.sign_bit();
        // sign - 1 keeps the magnitude below 2^63
        let magnitude = (lane & (sign - 1)) as i64;
        if lane & sign != 0 {
            -magnitude
        } else {
            magnitude
        }
    }
}

/// Compute the spread steps for a valid configuration (see the top of this file).
fn spread_steps(dimensions: u32, bits: u32) -> Box<[Step]> {
    let mut steps = vec![Step {
        mask: low_mask(bits),
        shift: 0,
    }];

    let dimensions = u64::from(dimensions);
    let bits = u64::from(bits);
    let mut shift = bit_floor(dimensions * (bits - 1));
    while shift > 0 {
        let mut mask = 0u64;
        let mut shifted = 0u64;
        for bit in 0..bits {
            let distance = (dimensions - 1) * bit;
            shifted |= shift & distance;
            mask |= 1u64 << (bit + (!(shift - 1) & distance));
        }
        if shifted != 0 {
            steps.push(Step {
                mask,
                // shifts never exceed 32
                shift: shift as u32,
            });
        }
        shift >>= 1;
    }
    steps.into_boxed_slice()
}
