//! Morton (Z-order) codes for up to 64 dimensions packed into a single 64-bit key.
//!
//! A [`Morton64`] is built once for a number of dimensions and a per-dimension bit
//! width, and then packs tuples of that shape into `i64` codes whose order follows
//! the Z-order curve. Signed lanes are stored as sign and magnitude.

mod error;
mod macros;
mod morton;
mod utils;

pub use error::MortonError;
pub use morton::Morton64;
