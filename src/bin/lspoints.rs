use parse_speedups::points::{discover_points, point_file};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "lspoints", about = "Listing the point files of a site")]
struct Opt {
    /// Path to the WRF point output repository
    #[structopt(long, default_value = "input")]
    data: PathBuf,
    /// Site name
    #[structopt(long, default_value = "rdm")]
    site: String,
}

fn main() -> Result<(), parse_speedups::Error> {
    let opt = Opt::from_args();

    let path = opt.data.join(&opt.site).join("points");
    let files: Vec<_> = discover_points(&path)?
        .into_iter()
        .filter_map(|id| point_file(&path, id))
        .map(|file| file.to_string_lossy().into_owned())
        .collect();
    println!("{}", files.join(" "));
    Ok(())
}
