//! Layout constants of the series container.
//!
//! ```text
//! header   i32 MAGIC, i32 VERSION, i32 ENCODING
//! block*   i32 FIXED_STEP, i32 n, f64 start (serial days), f64 step (seconds), f32 * n
//! footer*  4 x (i32 len, utf8 bytes), i64 block offset
//! trailer  i64 footer offset, i64 trailer field offset, i32 count, i32 MAGIC
//! ```
//!
//! All values are little-endian.

/// Magic number at the start and the very end of the file.
pub const MAGIC: i32 = 518_528_588;

/// Format version written in the header.
pub const VERSION: i32 = 2;

/// Encoding flag written in the header.
pub const ENCODING: i32 = 0;

/// Step-mode flag for fixed-step blocks.
pub const FIXED_STEP: i32 = 1;

/// Size of the header in bytes.
pub const HEADER_LEN: usize = 12;

/// Size of a block header in bytes, before the values.
pub const BLOCK_HEADER_LEN: usize = 24;

/// Size of the trailer in bytes.
pub const TRAILER_LEN: usize = 24;
