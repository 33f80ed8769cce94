//! Series container reader.
//!
//! Decoding starts from the trailer: the last [`TRAILER_LEN`] bytes give the
//! footer offset and the series count, and each footer entry points back at
//! its data block.

use std::path::Path;

use tracing::debug;

use crate::error::IoError;
use crate::format::{
    BLOCK_HEADER_LEN, ENCODING, FIXED_STEP, HEADER_LEN, MAGIC, TRAILER_LEN, VERSION,
};
use crate::series::{SeriesLabels, StoredSeries};

/// Bounds-checked little-endian cursor over a byte buffer.
struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn at(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], IoError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(IoError::Truncated {
                offset: self.pos as u64,
                needed: n,
                len: self.bytes.len(),
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], IoError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn i32(&mut self) -> Result<i32, IoError> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    fn i64(&mut self) -> Result<i64, IoError> {
        Ok(i64::from_le_bytes(self.array()?))
    }

    fn f64(&mut self) -> Result<f64, IoError> {
        Ok(f64::from_le_bytes(self.array()?))
    }

    fn f32(&mut self) -> Result<f32, IoError> {
        Ok(f32::from_le_bytes(self.array()?))
    }

    fn magic(&mut self) -> Result<(), IoError> {
        let offset = self.pos as u64;
        let found = self.i32()?;
        if found != MAGIC {
            return Err(IoError::BadMagic {
                offset,
                found,
                expected: MAGIC,
            });
        }
        Ok(())
    }

    fn length(&mut self, what: &str) -> Result<usize, IoError> {
        let offset = self.pos;
        let n = self.i32()?;
        usize::try_from(n).map_err(|_| IoError::Corrupt {
            reason: format!("negative {what} {n} at offset {offset}"),
        })
    }

    fn offset(&mut self, what: &str) -> Result<usize, IoError> {
        let v = self.i64()?;
        usize::try_from(v)
            .ok()
            .filter(|&o| o <= self.bytes.len())
            .ok_or_else(|| IoError::Corrupt {
                reason: format!("{what} offset {v} is outside the file"),
            })
    }

    fn string(&mut self) -> Result<String, IoError> {
        let len = self.length("label length")?;
        let offset = self.pos as u64;
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| IoError::InvalidLabel { offset })
    }
}

fn read_header(bytes: &[u8]) -> Result<(), IoError> {
    let mut cur = ByteCursor::at(bytes, 0);
    cur.magic()?;
    let version = cur.i32()?;
    if version != VERSION {
        return Err(IoError::Unsupported {
            field: "format version",
            value: version,
        });
    }
    let encoding = cur.i32()?;
    if encoding != ENCODING {
        return Err(IoError::Unsupported {
            field: "encoding flag",
            value: encoding,
        });
    }
    Ok(())
}

fn read_block(
    bytes: &[u8],
    labels: SeriesLabels,
    offset: usize,
    data_end: usize,
) -> Result<StoredSeries, IoError> {
    if offset < HEADER_LEN || offset + BLOCK_HEADER_LEN > data_end {
        return Err(IoError::Corrupt {
            reason: format!(
                "data block offset {offset} for {} is not in the data section",
                labels.location()
            ),
        });
    }
    let mut cur = ByteCursor::at(&bytes[..data_end], offset);
    let mode = cur.i32()?;
    if mode != FIXED_STEP {
        return Err(IoError::Unsupported {
            field: "step mode",
            value: mode,
        });
    }
    let n = cur.length("sample count")?;
    let start_days = cur.f64()?;
    let interval = cur.f64()?;
    let values = (0..n).map(|_| cur.f32()).collect::<Result<Vec<_>, _>>()?;
    Ok(StoredSeries {
        labels,
        offset: offset as u64,
        start_days,
        interval,
        values,
    })
}

/// Decodes a series container held in memory.
///
/// # Errors
///
/// Returns [`IoError::BadMagic`] or [`IoError::Unsupported`] for a foreign
/// or newer file, and [`IoError::Truncated`], [`IoError::Corrupt`] or
/// [`IoError::InvalidLabel`] for a damaged one.
pub fn parse_series(bytes: &[u8]) -> Result<Vec<StoredSeries>, IoError> {
    if bytes.len() < HEADER_LEN + TRAILER_LEN {
        return Err(IoError::Truncated {
            offset: 0,
            needed: HEADER_LEN + TRAILER_LEN,
            len: bytes.len(),
        });
    }
    read_header(bytes)?;

    let trailer = bytes.len() - TRAILER_LEN;
    let mut cur = ByteCursor::at(bytes, trailer);
    let footer_start = cur.offset("footer")?;
    let _reserved = cur.i64()?;
    let count = cur.length("series count")?;
    cur.magic()?;

    if footer_start < HEADER_LEN || footer_start > trailer {
        return Err(IoError::Corrupt {
            reason: format!("footer offset {footer_start} is not between header and trailer"),
        });
    }

    let mut footer = ByteCursor::at(&bytes[..trailer], footer_start);
    let mut series = Vec::with_capacity(count.min(trailer / 8));
    for _ in 0..count {
        let labels = SeriesLabels::new(
            footer.string()?,
            footer.string()?,
            footer.string()?,
            footer.string()?,
        );
        let offset = footer.offset("data block")?;
        series.push(read_block(bytes, labels, offset, footer_start)?);
    }

    debug!(series = series.len(), bytes = bytes.len(), "read series container");
    Ok(series)
}

/// Reads every series stored in the file at `path`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist, otherwise
/// the errors of [`parse_series`].
pub fn read_series_file(path: &Path) -> Result<Vec<StoredSeries>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path)?;
    parse_series(&bytes)
}
