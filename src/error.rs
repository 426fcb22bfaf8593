/// Errors returned by [`Morton64`](crate::Morton64).
///
/// Only construction can fail with [`MortonError::InvalidConfiguration`]; the
/// remaining variants reject a single call and leave the codec usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum MortonError {
    #[error("cannot build a codec with {dimensions} dimensions of {bits} bits")]
    InvalidConfiguration { dimensions: u32, bits: u32 },

    #[error("expected {expected} values but got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("value {value} does not fit in the configured bit width")]
    ValueOutOfRange { value: u64 },

    #[error("signed value {value} does not fit in the configured bit width")]
    SignedValueOutOfRange { value: i64 },
}
