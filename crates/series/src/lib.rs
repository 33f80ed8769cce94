//! Input time series for AMM runoff runs.
//!
//! Resamples irregular, user-entered series onto the fixed step grid of a
//! [`SimulationClock`](amm_calendar::SimulationClock): rainfall becomes a
//! per-step depth, temperature a per-step value.
//!
//! # Quick Start
//!
//! ```
//! use amm_calendar::SimulationClock;
//! use amm_series::{conform_rainfall, RainFormat, RainGage, Sample, TimeSeries};
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
//! let t = |h| day.and_hms_opt(h, 0, 0).unwrap();
//! let record = TimeSeries::new(
//!     "R1",
//!     vec![Sample::new(t(0), 5.0), Sample::new(t(1), 0.0), Sample::new(t(2), 0.0)],
//! );
//! let gage = RainGage::new("G1", RainFormat::Volume, 60.0, record);
//! let clock = SimulationClock::new(t(0), t(3), 60.0).unwrap();
//!
//! let depths = conform_rainfall(&gage, &clock, 0.001).unwrap();
//! assert_eq!(depths.len(), clock.len());
//! assert!((depths.iter().sum::<f64>() - 0.005).abs() < 1e-12);
//! ```
//!
//! # Modules
//!
//! | Module        | Purpose                                         |
//! |---------------|-------------------------------------------------|
//! | `series`      | Samples, named series, precondition checks      |
//! | `conform`     | Single-pass resampling onto target instants     |
//! | `rainfall`    | Gage conventions and per-step depths            |
//! | `temperature` | Series or climatology temperature source        |
//! | `error`       | Error types                                     |

mod conform;
mod error;
mod rainfall;
mod series;
mod temperature;

pub use conform::conform;
pub use error::SeriesError;
pub use rainfall::{DataSource, RainFormat, RainGage, conform_rainfall, to_cumulative};
pub use series::{MIN_SAMPLES, Overlap, Sample, TimeSeries};
pub use temperature::TemperatureSource;
