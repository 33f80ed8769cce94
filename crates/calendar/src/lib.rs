//! # amm-calendar
//!
//! Calendar arithmetic for AMM simulations: the fixed-step simulation
//! clock, Gregorian month lengths, the spring/fall season switch, serial
//! day numbers and the seasonal temperature interpolator.
//!
//! ## Quick Start
//!
//! ```
//! use amm_calendar::{Season, SeasonalTemperature, SimulationClock};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2021, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let end = NaiveDate::from_ymd_opt(2021, 5, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let clock = SimulationClock::new(start, end, 15.0).unwrap();
//! assert_eq!(clock.len(), 97);
//!
//! let temps = SeasonalTemperature::default();
//! let may_16 = NaiveDate::from_ymd_opt(2021, 5, 16).unwrap();
//! assert_eq!(temps.interpolate(may_16).unwrap(), 61.3);
//! assert_eq!(Season::of(may_16), Season::Spring);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `clock` | Fixed-step simulation horizon |
//! | `month` | Month lengths and centre days |
//! | `season` | Spring/fall cold-parameter switch |
//! | `seasonal` | Monthly-average temperature interpolation |
//! | `serial` | Days since 1899-12-30 |
//! | `error` | Error types |

mod clock;
mod error;
mod month;
mod season;
mod seasonal;
mod serial;

pub use clock::SimulationClock;
pub use error::CalendarError;
pub use month::{center_day, days_in_month, is_leap_year};
pub use season::Season;
pub use seasonal::SeasonalTemperature;
pub use serial::{from_serial_days, serial_epoch, to_serial_days};
