//! WRF point output
//!
//! Per-point time series extracted from the WRF simulation of a site, one
//! file per measurement point: `wrf.high.point.<id>.csv[.bz2|.gz]`.
//! Loading augments the records with the derived wind speed and direction.

use bzip2::bufread::BzDecoder;
use flate2::read::GzDecoder;
use glob::glob;
use itertools::Itertools;
use itertools::MinMaxResult::MinMax;
use regex::Regex;
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
    time::Instant,
};

#[derive(Debug, thiserror::Error)]
pub enum PointsError {
    #[error("point file {0:?} not found")]
    NotFound(PathBuf),
    #[error("failed to open the point file")]
    Io(#[from] std::io::Error),
    #[error("failed to deserialize the point records")]
    Csv(#[from] csv::Error),
    #[error("point file {0:?} has no records left")]
    Empty(PathBuf),
    #[error("invalid point file pattern")]
    Glob(#[from] glob::PatternError),
    #[error("invalid point file regex")]
    Regex(#[from] regex::Error),
}
type Result<T> = std::result::Result<T, PointsError>;

/// Wind speed [m/s] from the horizontal wind components
pub fn wind_speed(u: f64, v: f64) -> f64 {
    u.hypot(v)
}
/// Wind direction [degree] in `(0,360]` from the horizontal wind components
pub fn wind_direction(u: f64, v: f64) -> f64 {
    u.atan2(v).to_degrees() + 180.
}

/// A WRF point output record
#[derive(Deserialize, Debug)]
struct Record {
    #[serde(rename = "Time (s)")]
    time: f64,
    #[serde(rename = "U (m/s)")]
    u: f64,
    #[serde(rename = "V (m/s)")]
    v: f64,
    #[serde(rename = "HGT (m)")]
    hgt: f64,
    #[serde(rename = "Lev")]
    lev: f64,
}

/// Time series of wind samples at a measurement point
#[derive(Debug, Default)]
pub struct PointSeries {
    /// Point identifier
    pub id: u32,
    /// Sample time [s]
    pub time: Vec<f64>,
    /// East-west wind component [m/s]
    pub u: Vec<f64>,
    /// North-south wind component [m/s]
    pub v: Vec<f64>,
    /// Terrain height [m]
    pub hgt: Vec<f64>,
    /// Model level
    pub lev: Vec<f64>,
    /// Wind speed [m/s]
    pub speed: Vec<f64>,
    /// Wind direction [degree]
    pub direction: Vec<f64>,
}
impl PointSeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn summary(&self) {
        let stats = |x: &[f64]| {
            let n = x.len() as f64;
            let mean = x.iter().sum::<f64>() / n;
            let std = (x.iter().map(|x| x - mean).fold(0f64, |s, x| s + x * x) / n).sqrt();
            (mean, std)
        };
        println!("SUMMARY point #{}:", self.id);
        println!(" - # of records: {}", self.len());
        println!(
            " - time range: [{:8.3}-{:8.3}]s",
            self.time.first().unwrap_or(&f64::NAN),
            self.time.last().unwrap_or(&f64::NAN)
        );
        println!(
            "    {:^10}: ({:^9}, {:^9})  ({:^9}, {:^9})",
            "FIELD", "MEAN", "STD", "MIN", "MAX"
        );
        for (label, values) in [
            ("U [m/s]", &self.u),
            ("V [m/s]", &self.v),
            ("M [m/s]", &self.speed),
            ("Dir [deg]", &self.direction),
        ] {
            let minmax = match values.iter().minmax() {
                MinMax(min, max) => (*min, *max),
                _ => (f64::NAN, f64::NAN),
            };
            println!(
                "  - {:10}: {:>9.3?}  {:>9.3?}",
                label,
                stats(values),
                minmax
            );
        }
    }
}

/// Locates the file of a point, trying the compressed variants first
pub fn point_file<P: AsRef<Path>>(path: P, id: u32) -> Option<PathBuf> {
    ["csv.bz2", "csv.gz", "csv"]
        .into_iter()
        .map(|ext| path.as_ref().join(format!("wrf.high.point.{}.{}", id, ext)))
        .find(|file| file.is_file())
}

/// Point ids discovered from the `wrf.high.point.*` files in the data path
pub fn discover_points<P: AsRef<Path>>(path: P) -> Result<Vec<u32>> {
    let pattern = path.as_ref().join("wrf.high.point.*");
    let re = Regex::new(r"wrf\.high\.point\.(\d+)\.csv")?;
    let mut ids: Vec<u32> = glob(&pattern.to_string_lossy())?
        .filter_map(|entry| entry.ok())
        .filter_map(|file| {
            re.captures(&file.file_name()?.to_string_lossy())
                .and_then(|capts| capts[1].parse().ok())
        })
        .collect();
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

/// WRF point output file loader
pub struct PointsLoader {
    path: PathBuf,
    id: u32,
    time_range: (f64, f64),
}
impl Default for PointsLoader {
    fn default() -> Self {
        Self {
            path: Path::new("input/rdm/points").to_path_buf(),
            id: 1,
            time_range: (0f64, f64::INFINITY),
        }
    }
}
impl PointsLoader {
    pub fn data_path<S: AsRef<Path>>(self, data_path: S) -> Self {
        Self {
            path: data_path.as_ref().to_path_buf(),
            ..self
        }
    }
    pub fn point_id(self, id: u32) -> Self {
        Self { id, ..self }
    }
    pub fn start_time(self, time: f64) -> Self {
        Self {
            time_range: (time, self.time_range.1),
            ..self
        }
    }
    pub fn end_time(self, time: f64) -> Self {
        Self {
            time_range: (self.time_range.0, time),
            ..self
        }
    }
    pub fn load(self) -> Result<PointSeries> {
        let csv_file = point_file(&self.path, self.id).ok_or_else(|| {
            PointsError::NotFound(self.path.join(format!("wrf.high.point.{}.csv", self.id)))
        })?;
        log::info!("Loading {:?}...", csv_file);
        let now = Instant::now();
        let file = File::open(&csv_file)?;
        let mut contents = String::new();
        match csv_file.extension().and_then(|ext| ext.to_str()) {
            Some("bz2") => {
                BzDecoder::new(BufReader::new(file)).read_to_string(&mut contents)?;
            }
            Some("gz") => {
                GzDecoder::new(file).read_to_string(&mut contents)?;
            }
            _ => {
                BufReader::new(file).read_to_string(&mut contents)?;
            }
        }
        let mut rdr = csv::Reader::from_reader(contents.as_bytes());
        let mut series = PointSeries {
            id: self.id,
            ..Default::default()
        };
        for result in rdr.deserialize() {
            let record: Record = result?;
            if record.time < self.time_range.0 || record.time > self.time_range.1 {
                continue;
            }
            series.time.push(record.time);
            series.u.push(record.u);
            series.v.push(record.v);
            series.hgt.push(record.hgt);
            series.lev.push(record.lev);
            series.speed.push(wind_speed(record.u, record.v));
            series.direction.push(wind_direction(record.u, record.v));
        }
        if series.is_empty() {
            return Err(PointsError::Empty(csv_file));
        }
        log::info!("... loaded in {}ms", now.elapsed().as_millis());
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_point_file(dir: &Path, id: u32, rows: &[(f64, f64, f64)]) {
        fs::create_dir_all(dir).unwrap();
        let mut contents = String::from("Time (s),U (m/s),V (m/s),HGT (m),Lev\n");
        for (time, u, v) in rows {
            contents.push_str(&format!("{},{},{},450.0,1\n", time, u, v));
        }
        fs::write(dir.join(format!("wrf.high.point.{}.csv", id)), contents).unwrap();
    }

    #[test]
    fn wind_direction_convention() {
        // wind blowing from the East
        assert!((wind_direction(-1., 0.) - 90.).abs() < 1e-12);
        // from the South
        assert!((wind_direction(0., 1.) - 180.).abs() < 1e-12);
        // from the West
        assert!((wind_direction(1., 0.) - 270.).abs() < 1e-12);
        // from the North
        assert!((wind_direction(0., -1.) - 360.).abs() < 1e-12);
    }
    #[test]
    fn speed_from_both_components() {
        assert!((wind_speed(3., 4.) - 5.).abs() < 1e-12);
    }
    #[test]
    fn load_plain_csv() {
        let dir = std::env::temp_dir().join("parse-speedups-load_plain_csv");
        write_point_file(&dir, 7, &[(0., 3., 4.), (3600., 0., -2.), (7200., 1., 1.)]);
        let series = PointsLoader::default()
            .data_path(&dir)
            .point_id(7)
            .load()
            .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.id, 7);
        assert!((series.speed[0] - 5.).abs() < 1e-12);
        assert!((series.direction[1] - 360.).abs() < 1e-12);
        assert_eq!(series.hgt[0], 450.);
    }
    #[test]
    fn time_range_filter() {
        let dir = std::env::temp_dir().join("parse-speedups-time_range_filter");
        write_point_file(&dir, 3, &[(0., 1., 1.), (3600., 2., 2.), (7200., 3., 3.)]);
        let series = PointsLoader::default()
            .data_path(&dir)
            .point_id(3)
            .start_time(1800.)
            .end_time(5400.)
            .load()
            .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.time[0], 3600.);
    }
    #[test]
    fn missing_point_file() {
        let dir = std::env::temp_dir().join("parse-speedups-missing_point_file");
        fs::create_dir_all(&dir).unwrap();
        assert!(matches!(
            PointsLoader::default().data_path(&dir).point_id(99).load(),
            Err(PointsError::NotFound(_))
        ));
    }
    #[test]
    fn discovery() {
        let dir = std::env::temp_dir().join("parse-speedups-discovery");
        write_point_file(&dir, 10, &[(0., 1., 1.)]);
        write_point_file(&dir, 2, &[(0., 1., 1.)]);
        write_point_file(&dir, 25, &[(0., 1., 1.)]);
        let ids = discover_points(&dir).unwrap();
        assert_eq!(ids, vec![2, 10, 25]);
    }
}
