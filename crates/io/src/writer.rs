//! Series container writer.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use amm_calendar::to_serial_days;
use tracing::debug;

use crate::error::IoError;
use crate::format::{ENCODING, FIXED_STEP, MAGIC, VERSION};
use crate::series::SeriesBlock;

/// Little-endian writer that tracks its own byte position.
struct PositionWriter<W> {
    inner: W,
    pos: u64,
}

impl<W: Write> PositionWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, pos: 0 }
    }

    fn bytes(&mut self, bytes: &[u8]) -> Result<(), IoError> {
        self.inner.write_all(bytes)?;
        self.pos += bytes.len() as u64;
        Ok(())
    }

    fn i32(&mut self, v: i32) -> Result<(), IoError> {
        self.bytes(&v.to_le_bytes())
    }

    fn i64(&mut self, v: i64) -> Result<(), IoError> {
        self.bytes(&v.to_le_bytes())
    }

    fn f64(&mut self, v: f64) -> Result<(), IoError> {
        self.bytes(&v.to_le_bytes())
    }

    fn f32(&mut self, v: f32) -> Result<(), IoError> {
        self.bytes(&v.to_le_bytes())
    }

    fn string(&mut self, s: &str) -> Result<(), IoError> {
        // length checked in validate()
        self.i32(s.len() as i32)?;
        self.bytes(s.as_bytes())
    }

    fn offset(&mut self, v: u64) -> Result<(), IoError> {
        let v = i64::try_from(v).map_err(|_| IoError::Corrupt {
            reason: format!("offset {v} does not fit in i64"),
        })?;
        self.i64(v)
    }
}

fn validate(blocks: &[SeriesBlock<'_>]) -> Result<(), IoError> {
    let limit = i32::MAX as usize;
    let mut errors: Vec<String> = Vec::new();

    if blocks.len() > limit {
        errors.push(format!("{} series exceed the format limit", blocks.len()));
    }
    for block in blocks {
        let name = block.labels().location();
        if !(block.step_seconds().is_finite() && block.step_seconds() > 0.0) {
            errors.push(format!(
                "{name}: step must be positive, got {}",
                block.step_seconds()
            ));
        }
        if block.len() > limit {
            errors.push(format!("{name}: {} values exceed the format limit", block.len()));
        }
        for (field, text) in block.labels().fields() {
            if text.len() > limit {
                errors.push(format!("{name}: {field} label is too long"));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(IoError::Validation {
            count: errors.len(),
            details: errors.join("; "),
        })
    }
}

/// Writes `blocks` as a complete series container to `writer`.
///
/// Returns the number of bytes written. The writer is flushed but not
/// synced.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if a block cannot be represented in the
/// format, or [`IoError::Io`] if writing fails.
pub fn write_series<W: Write>(writer: W, blocks: &[SeriesBlock<'_>]) -> Result<u64, IoError> {
    validate(blocks)?;
    let mut w = PositionWriter::new(writer);

    w.i32(MAGIC)?;
    w.i32(VERSION)?;
    w.i32(ENCODING)?;

    let mut offsets = Vec::with_capacity(blocks.len());
    for block in blocks {
        offsets.push(w.pos);
        w.i32(FIXED_STEP)?;
        w.i32(block.len() as i32)?;
        w.f64(to_serial_days(block.start()))?;
        w.f64(block.step_seconds())?;
        for &v in block.values() {
            w.f32(v as f32)?;
        }
    }

    let footer_start = w.pos;
    for (block, &offset) in blocks.iter().zip(&offsets) {
        for (_, text) in block.labels().fields() {
            w.string(text)?;
        }
        w.offset(offset)?;
    }

    w.offset(footer_start)?;
    let here = w.pos;
    w.offset(here)?;
    w.i32(blocks.len() as i32)?;
    w.i32(MAGIC)?;
    w.inner.flush()?;

    debug!(series = blocks.len(), bytes = w.pos, "wrote series container");
    Ok(w.pos)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Writes `blocks` to `path`, replacing any existing file.
///
/// The file is written to `{path}.tmp`, synced to disk and renamed into
/// place, so a failed write leaves the previous file (or none) at `path`.
/// Missing parent directories are created.
///
/// # Errors
///
/// Same as [`write_series`]. The temporary file is removed on failure.
pub fn write_series_file(path: &Path, blocks: &[SeriesBlock<'_>]) -> Result<u64, IoError> {
    validate(blocks)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_sibling(path);
    let result = (|| -> Result<u64, IoError> {
        let mut file = BufWriter::new(File::create(&tmp)?);
        let written = write_series(&mut file, blocks)?;
        let file = file.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        fs::rename(&tmp, path)?;
        Ok(written)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{HEADER_LEN, TRAILER_LEN};
    use crate::series::SeriesLabels;
    use chrono::NaiveDate;

    fn block(values: &[f64], step: f64) -> SeriesBlock<'_> {
        let t = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        SeriesBlock::new(SeriesLabels::new("C", "F", "U", "L1"), t, step, values)
    }

    fn le_i32(bytes: &[u8], at: usize) -> i32 {
        i32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    fn le_i64(bytes: &[u8], at: usize) -> i64 {
        i64::from_le_bytes(bytes[at..at + 8].try_into().unwrap())
    }

    fn le_f64(bytes: &[u8], at: usize) -> f64 {
        f64::from_le_bytes(bytes[at..at + 8].try_into().unwrap())
    }

    #[test]
    fn header_and_block_layout() {
        let values = [1.5, -2.0];
        let mut buf = Vec::new();
        let n = write_series(&mut buf, &[block(&values, 900.0)]).unwrap();
        assert_eq!(n as usize, buf.len());

        assert_eq!(le_i32(&buf, 0), MAGIC);
        assert_eq!(le_i32(&buf, 4), VERSION);
        assert_eq!(le_i32(&buf, 8), ENCODING);
        assert_eq!(le_i32(&buf, 12), FIXED_STEP);
        assert_eq!(le_i32(&buf, 16), 2);
        assert_eq!(le_f64(&buf, 20), 36526.25);
        // interval field holds seconds
        assert_eq!(le_f64(&buf, 28), 900.0);
        assert_eq!(f32::from_le_bytes(buf[36..40].try_into().unwrap()), 1.5);
        assert_eq!(f32::from_le_bytes(buf[40..44].try_into().unwrap()), -2.0);
    }

    #[test]
    fn footer_and_trailer_layout() {
        let values = [0.0; 3];
        let mut buf = Vec::new();
        write_series(&mut buf, &[block(&values, 60.0)]).unwrap();

        let footer_start = HEADER_LEN + 24 + 12;
        // labels "C", "F", "U", "L1" plus the offset
        let footer_len = 3 * (4 + 1) + (4 + 2) + 8;
        assert_eq!(buf.len(), footer_start + footer_len + TRAILER_LEN);

        assert_eq!(le_i32(&buf, footer_start), 1);
        assert_eq!(&buf[footer_start + 4..footer_start + 5], b"C");
        assert_eq!(le_i64(&buf, footer_start + footer_len - 8), HEADER_LEN as i64);

        let trailer = buf.len() - TRAILER_LEN;
        assert_eq!(le_i64(&buf, trailer), footer_start as i64);
        assert_eq!(le_i64(&buf, trailer + 8), (trailer + 8) as i64);
        assert_eq!(le_i32(&buf, trailer + 16), 1);
        assert_eq!(le_i32(&buf, trailer + 20), MAGIC);
    }

    #[test]
    fn empty_container_is_header_and_trailer() {
        let mut buf = Vec::new();
        write_series(&mut buf, &[]).unwrap();
        assert_eq!(buf.len(), HEADER_LEN + TRAILER_LEN);
        assert_eq!(le_i64(&buf, HEADER_LEN), HEADER_LEN as i64);
    }

    #[test]
    fn zero_step_is_rejected() {
        let values = [1.0];
        let err = write_series(Vec::new(), &[block(&values, 0.0), block(&values, f64::NAN)])
            .unwrap_err();
        match err {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert!(details.starts_with("L1: step must be positive"));
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn temp_sibling_appends_suffix() {
        assert_eq!(
            temp_sibling(Path::new("out/AMM.tsb")),
            PathBuf::from("out/AMM.tsb.tmp")
        );
    }
}
