/// Pack lanes passed as separate arguments, lane 0 first.
///
/// `pack!(m, x, y, z)` is the same as `m.pack(&[x, y, z])`.
///
/// ```
/// use morton64::{pack, Morton64};
///
/// let m = Morton64::new(3, 21)?;
/// assert_eq!(pack!(m, 1, 2, 4)?, m.pack(&[1, 2, 4])?);
/// # Ok::<(), morton64::MortonError>(())
/// ```
#[macro_export]
macro_rules! pack {
    ($codec:expr, $($value:expr),+ $(,)?) => {
        $codec.pack(&[$($value),+])
    };
}

/// Signed counterpart of [`pack!`]: `spack!(m, x, y)` is `m.spack(&[x, y])`.
#[macro_export]
macro_rules! spack {
    ($codec:expr, $($value:expr),+ $(,)?) => {
        $codec.spack(&[$($value),+])
    };
}
