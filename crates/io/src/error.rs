//! Error types for amm-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the amm-io crate.
///
/// Covers file system failures, layout violations found while decoding a
/// series file, and validation problems with the series handed to the
/// writer.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a series file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error from the operating system.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Returned when the header or trailer magic number is wrong.
    #[error("bad magic number {found} at offset {offset} (expected {expected})")]
    BadMagic {
        /// Byte offset of the magic field.
        offset: u64,
        /// Value found in the file.
        found: i32,
        /// Value the format requires.
        expected: i32,
    },

    /// Returned when the header carries an unknown format version or
    /// encoding flag.
    #[error("unsupported {field} {value}")]
    Unsupported {
        /// Header field name.
        field: &'static str,
        /// Value found in the file.
        value: i32,
    },

    /// Returned when a read runs past the end of the file.
    #[error("file truncated: needed {needed} bytes at offset {offset}, file has {len}")]
    Truncated {
        /// Byte offset of the read.
        offset: u64,
        /// Number of bytes requested.
        needed: usize,
        /// Total file length.
        len: usize,
    },

    /// Returned when a stored offset or count cannot be right.
    #[error("corrupt series file: {reason}")]
    Corrupt {
        /// What was inconsistent.
        reason: String,
    },

    /// Returned when a stored label is not valid UTF-8.
    #[error("label at offset {offset} is not valid UTF-8")]
    InvalidLabel {
        /// Byte offset of the label bytes.
        offset: u64,
    },

    /// Returned when one or more series fail validation before writing.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },
}
