//! WRF point output wind speedup parser
//!
//! Computes the pairwise wind speed "speedup" ratios between the measurement
//! points of a site from WRF point-extracted time series.
//! For each unordered pair of points, the two series are joined on their
//! common time samples and the total least squares slope relating the wind
//! speeds is evaluated per 15 degree wind direction sector and overall,
//! together with the sector occupancy frequencies.

pub mod error;
pub mod fit;
pub mod points;
pub mod sector;
pub mod speedup;

pub use error::Error;
pub use fit::fit_tls;
pub use points::{PointSeries, PointsLoader};
pub use sector::Sector;
pub use speedup::{PairSpeedup, PairedSeries, Speedups};
