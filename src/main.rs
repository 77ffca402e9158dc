use indicatif::{ProgressBar, ProgressIterator};
use itertools::Itertools;
use parse_speedups::{
    points::{discover_points, PointSeries, PointsLoader},
    speedup::{PairedSeries, SpeedupError, Speedups},
};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "parse-speedups", about = "Parsing WRF point output wind speedups")]
struct Opt {
    /// Path to the WRF point output repository
    #[structopt(long, default_value = "input")]
    data: PathBuf,
    /// Site name
    #[structopt(long, default_value = "rdm")]
    site: String,
    /// Point identifiers
    #[structopt(
        short,
        long,
        use_delimiter = true,
        default_value = "10,1,2,3,4,5,6,7,8,9,11,12,13,14,15,16,17,18,19,21,22,23,24,25"
    )]
    points: Vec<u32>,
    /// Samples start time
    #[structopt(short, long)]
    start: Option<f64>,
    /// Samples end time
    #[structopt(short, long)]
    end: Option<f64>,
    /// Discover the point files instead of using the point list
    #[structopt(long)]
    all: bool,
    /// Print a per-point summary
    #[structopt(long)]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let path = opt.data.join(&opt.site).join("points");
    let ids = if opt.all {
        discover_points(&path)?
    } else {
        opt.points.clone()
    };
    log::info!("found {} point files", ids.len());

    let mut points: Vec<PointSeries> = vec![];
    for id in ids {
        let mut loader = PointsLoader::default().data_path(&path).point_id(id);
        if let Some(time) = opt.start {
            loader = loader.start_time(time);
        }
        if let Some(time) = opt.end {
            loader = loader.end_time(time);
        }
        match loader.load() {
            Ok(series) => {
                if opt.summary {
                    series.summary();
                }
                points.push(series);
            }
            Err(e) => log::error!("point #{}: {}", id, e),
        }
    }

    let n_pairs = points.len() * points.len().saturating_sub(1) / 2;
    let speedups = points
        .iter()
        .tuple_combinations::<(_, _)>()
        .progress_with(ProgressBar::new(n_pairs as u64))
        .map(|(initiation, target)| {
            PairedSeries::new(initiation, target).and_then(|paired| paired.speedup())
        })
        .collect::<Result<Speedups, SpeedupError>>()?;

    println!("########## SPEEDUPS");
    println!("{}", speedups.slope_table());
    println!("########## SPEEDUPS END");
    println!("\n\n\n");
    println!("########## FREQ");
    println!("{}", speedups.frequency_table());
    println!("########## FREQ END");

    Ok(())
}
