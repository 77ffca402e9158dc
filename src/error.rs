use crate::{fit::FitError, points::PointsError, speedup::SpeedupError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `points` module")]
    Points(#[from] PointsError),
    #[error("Error in the `fit` module")]
    Fit(#[from] FitError),
    #[error("Error in the `speedup` module")]
    Speedup(#[from] SpeedupError),
}
