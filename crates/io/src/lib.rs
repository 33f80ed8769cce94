//! # amm-io
//!
//! Read and write the little-endian binary series container used for AMM
//! subcatchment results: a fixed header, one fixed-step data block per
//! series, a footer of labels pointing back at each block, and a trailer
//! that lets a reader start from the end of the file.
//!
//! ```
//! use amm_io::{SeriesBlock, SeriesLabels, parse_series, write_series};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2021, 5, 3).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let flow = [0.0, 0.5, 0.25];
//! let block = SeriesBlock::new(
//!     SeriesLabels::new("AMM Subcatchments", "Runoff", "m3/s", "S1"),
//!     start,
//!     900.0,
//!     &flow,
//! );
//!
//! let mut bytes = Vec::new();
//! write_series(&mut bytes, &[block]).unwrap();
//! let stored = parse_series(&bytes).unwrap();
//! assert_eq!(stored[0].start(), Some(start));
//! assert_eq!(stored[0].values(), &[0.0, 0.5, 0.25]);
//! ```

mod error;
pub mod format;
mod reader;
mod series;
mod writer;

pub use error::IoError;
pub use reader::{parse_series, read_series_file};
pub use series::{SeriesBlock, SeriesLabels, StoredSeries};
pub use writer::{write_series, write_series_file};
