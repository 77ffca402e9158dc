//! Total least squares regression
//!
//! Fits the no-intercept model `y = m * x` to a pair of wind speed series by
//! orthogonal distance regression: the slope minimizes the perpendicular
//! distances to the fitted line rather than the vertical residuals, so
//! neither series plays the role of the error-free variable.

#[derive(Debug, thiserror::Error)]
pub enum FitError {
    #[error("cannot fit a slope to empty series")]
    Empty,
    #[error("series length mismatch: {0} vs {1}")]
    Unequal(usize, usize),
    #[error("the slope is unresolved, the series carry no cross correlation")]
    Degenerate,
}
type Result<T> = std::result::Result<T, FitError>;

/// Fits the total least squares model `y = m * x` and returns the slope `m`
///
/// The perpendicular distance objective of the one parameter model is
/// minimized in closed form from the second order sums of the data,
/// the stationary slopes being the roots of
/// `m^2 Sxy + m (Sxx - Syy) - Sxy = 0`
pub fn fit_tls(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.is_empty() || y.is_empty() {
        return Err(FitError::Empty);
    }
    if x.len() != y.len() {
        return Err(FitError::Unequal(x.len(), y.len()));
    }
    let sxx: f64 = x.iter().map(|x| x * x).sum();
    let syy: f64 = y.iter().map(|y| y * y).sum();
    let sxy: f64 = x.iter().zip(y).map(|(x, y)| x * y).sum();
    // of the two stationary slopes, the minimizer carries the sign of the
    // cross moment; the branch picks the cancellation free expression
    let delta = syy - sxx;
    let discriminant = delta.hypot(2. * sxy);
    let slope = if delta > 0. {
        (delta + discriminant) / (2. * sxy)
    } else {
        2. * sxy / (discriminant - delta)
    };
    if slope.is_finite() {
        Ok(slope)
    } else {
        Err(FitError::Degenerate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_doubling() {
        let x: Vec<f64> = (1..=100).map(|k| k as f64 / 10.).collect();
        let y: Vec<f64> = x.iter().map(|x| 2. * x).collect();
        let slope = fit_tls(&x, &y).unwrap();
        assert!((slope - 2.).abs() < 1e-12, "slope = {}", slope);
    }
    #[test]
    fn identical_series() {
        let x: Vec<f64> = (1..=50).map(|k| (k as f64).sqrt()).collect();
        let slope = fit_tls(&x, &x).unwrap();
        assert!((slope - 1.).abs() < 1e-12, "slope = {}", slope);
    }
    #[test]
    fn swapping_series_inverts_the_slope() {
        let x = vec![1.2, 3.4, 2.7, 8.1, 5.5, 4.3];
        let y = vec![2.9, 6.2, 5.8, 17.3, 10.4, 9.1];
        let forward = fit_tls(&x, &y).unwrap();
        let backward = fit_tls(&y, &x).unwrap();
        assert!((forward * backward - 1.).abs() < 1e-9);
    }
    #[test]
    fn anti_correlated_series() {
        let x = vec![1., 2., 3., 4.];
        let y: Vec<f64> = x.iter().map(|x| -3. * x).collect();
        let slope = fit_tls(&x, &y).unwrap();
        assert!((slope + 3.).abs() < 1e-12, "slope = {}", slope);
    }
    #[test]
    fn empty_series() {
        assert!(matches!(fit_tls(&[], &[]), Err(FitError::Empty)));
    }
    #[test]
    fn unequal_series() {
        assert!(matches!(
            fit_tls(&[1., 2.], &[1.]),
            Err(FitError::Unequal(2, 1))
        ));
    }
    #[test]
    fn all_zero_series() {
        assert!(matches!(
            fit_tls(&[0., 0., 0.], &[0., 0., 0.]),
            Err(FitError::Degenerate)
        ));
    }
}
