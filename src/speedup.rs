//! Pairwise speedup tables
//!
//! For a pair of points, the "initiation" point provides the speedup
//! abscissa, the "target" point the ordinate and the wind direction used to
//! stratify the samples into sectors.

use crate::fit::{fit_tls, FitError};
use crate::points::PointSeries;
use crate::sector::Sector;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

#[derive(Debug, thiserror::Error)]
pub enum SpeedupError {
    #[error("points {0} and {1} have no common time samples")]
    NoOverlap(u32, u32),
    #[error("failed to fit the overall speedup of points {initiation} and {target}")]
    Overall {
        initiation: u32,
        target: u32,
        #[source]
        source: FitError,
    },
}
type Result<T> = std::result::Result<T, SpeedupError>;

/// Time matched samples of a pair of points
pub struct PairedSeries {
    /// Initiation point id
    pub initiation: u32,
    /// Target point id
    pub target: u32,
    /// Initiation point wind speed [m/s]
    pub initiation_speed: Vec<f64>,
    /// Target point wind speed [m/s]
    pub target_speed: Vec<f64>,
    /// Target point wind direction [degree]
    pub direction: Vec<f64>,
    // initiation point record count before the join,
    // the sector frequency denominator
    n_initiation: usize,
}
impl PairedSeries {
    /// Inner-joins two point series on their time samples
    ///
    /// Both series are expected time sorted, as loaded
    pub fn new(initiation: &PointSeries, target: &PointSeries) -> Result<Self> {
        let mut paired = Self {
            initiation: initiation.id,
            target: target.id,
            initiation_speed: vec![],
            target_speed: vec![],
            direction: vec![],
            n_initiation: initiation.len(),
        };
        let (mut i, mut j) = (0, 0);
        while i < initiation.len() && j < target.len() {
            match initiation.time[i].total_cmp(&target.time[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    paired.initiation_speed.push(initiation.speed[i]);
                    paired.target_speed.push(target.speed[j]);
                    paired.direction.push(target.direction[j]);
                    i += 1;
                    j += 1;
                }
            }
        }
        if paired.is_empty() {
            Err(SpeedupError::NoOverlap(initiation.id, target.id))
        } else {
            Ok(paired)
        }
    }
    pub fn len(&self) -> usize {
        self.direction.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn sector_samples(&self, sector: Sector) -> (Vec<f64>, Vec<f64>) {
        self.direction
            .iter()
            .enumerate()
            .filter(|(_, direction)| sector.contains(**direction))
            .map(|(k, _)| (self.initiation_speed[k], self.target_speed[k]))
            .unzip()
    }
    /// TLS speedup slope of the sector samples, NaN when the sector is unresolved
    pub fn sector_slope(&self, sector: Sector) -> f64 {
        let (x, y) = self.sector_samples(sector);
        fit_tls(&x, &y).unwrap_or(f64::NAN)
    }
    /// Fraction of the initiation point records with the target wind direction in the sector
    pub fn sector_frequency(&self, sector: Sector) -> f64 {
        let n = self
            .direction
            .iter()
            .filter(|direction| sector.contains(**direction))
            .count();
        n as f64 / self.n_initiation as f64
    }
    /// TLS speedup slope over all common samples
    pub fn overall_slope(&self) -> Result<f64> {
        fit_tls(&self.initiation_speed, &self.target_speed).map_err(|source| {
            SpeedupError::Overall {
                initiation: self.initiation,
                target: self.target,
                source,
            }
        })
    }
    /// Fraction of the initiation point records with a matching target sample
    pub fn overall_frequency(&self) -> f64 {
        self.len() as f64 / self.n_initiation as f64
    }
    /// Speedup slopes and sector frequencies of the pair
    pub fn speedup(&self) -> Result<PairSpeedup> {
        Ok(PairSpeedup {
            initiation: self.initiation,
            target: self.target,
            slopes: Sector::all().map(|sector| self.sector_slope(sector)).collect(),
            frequencies: Sector::all()
                .map(|sector| self.sector_frequency(sector))
                .collect(),
            overall_slope: self.overall_slope()?,
            overall_frequency: self.overall_frequency(),
        })
    }
}

/// Directional speedup slopes and sector frequencies of a point pair
#[derive(Debug)]
pub struct PairSpeedup {
    pub initiation: u32,
    pub target: u32,
    pub slopes: Vec<f64>,
    pub frequencies: Vec<f64>,
    pub overall_slope: f64,
    pub overall_frequency: f64,
}

/// Accumulated pair speedups of a site
#[derive(Debug, Default)]
pub struct Speedups(Vec<PairSpeedup>);
impl Deref for Speedups {
    type Target = Vec<PairSpeedup>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl Speedups {
    pub fn push(&mut self, pair: PairSpeedup) {
        self.0.push(pair)
    }
    /// Whitespace delimited table of the TLS slopes
    pub fn slope_table(&self) -> SlopeTable<'_> {
        SlopeTable(&self.0)
    }
    /// Whitespace delimited table of the sector occupancy frequencies
    pub fn frequency_table(&self) -> FrequencyTable<'_> {
        FrequencyTable(&self.0)
    }
}
impl FromIterator<PairSpeedup> for Speedups {
    fn from_iter<T: IntoIterator<Item = PairSpeedup>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn write_header(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Initiation Target")?;
    for sector in Sector::all() {
        write!(f, " {}", sector)?;
    }
    writeln!(f, " Overall")
}

pub struct SlopeTable<'a>(&'a [PairSpeedup]);
impl fmt::Display for SlopeTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f)?;
        for pair in self.0 {
            write!(f, "{} {}", pair.initiation, pair.target)?;
            for slope in &pair.slopes {
                write!(f, " {}", slope)?;
            }
            writeln!(f, " {}", pair.overall_slope)?;
        }
        Ok(())
    }
}

pub struct FrequencyTable<'a>(&'a [PairSpeedup]);
impl fmt::Display for FrequencyTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f)?;
        for pair in self.0 {
            write!(f, "{} {}", pair.initiation, pair.target)?;
            for frequency in &pair.frequencies {
                write!(f, " {}", frequency)?;
            }
            writeln!(f, " {}", pair.overall_frequency)?;
        }
        Ok(())
    }
}
