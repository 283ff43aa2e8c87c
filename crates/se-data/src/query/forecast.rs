//! Linear trend forecasting

use se_core::TrendPoint;

/// Least-squares line through a set of points.
///
/// Stored around the mean point, which keeps year-sized x values from
/// cancelling out when the line is evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    mean_x: f64,
    mean_y: f64,
}

impl LinearTrend {
    /// Fit a line through every finite point.
    ///
    /// `None` with fewer than two finite points or when all x are equal.
    pub fn fit(points: &[TrendPoint]) -> Option<Self> {
        let valid: Vec<&TrendPoint> = points.iter().filter(|p| p.is_finite()).collect();
        if valid.len() < 2 {
            return None;
        }

        let n = valid.len() as f64;
        let mean_x = valid.iter().map(|p| p.x).sum::<f64>() / n;
        let mean_y = valid.iter().map(|p| p.y).sum::<f64>() / n;

        let (covariance, variance) = valid.iter().fold((0.0, 0.0), |(cov, var), p| {
            let dx = p.x - mean_x;
            (cov + dx * (p.y - mean_y), var + dx * dx)
        });

        if variance == 0.0 {
            return None;
        }

        Some(Self {
            slope: covariance / variance,
            mean_x,
            mean_y,
        })
    }

    pub fn intercept(&self) -> f64 {
        self.mean_y - self.slope * self.mean_x
    }

    /// Value of the line at `x`
    pub fn at(&self, x: f64) -> f64 {
        self.mean_y + self.slope * (x - self.mean_x)
    }
}

/// Extrapolate the trend of `points` to `target_year`
pub fn forecast(points: &[TrendPoint], target_year: f64) -> Option<f64> {
    LinearTrend::fit(points).map(|trend| trend.at(target_year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(raw: &[(f64, f64)]) -> Vec<TrendPoint> {
        raw.iter().map(|&(x, y)| TrendPoint::new(x, y)).collect()
    }

    #[test]
    fn test_two_point_extrapolation() {
        let pts = points(&[(2000.0, 10.0), (2010.0, 30.0)]);
        assert_eq!(forecast(&pts, 2020.0), Some(50.0));
    }

    #[test]
    fn test_least_squares_over_all_points() {
        // noisy points around a rising line
        let pts = points(&[(0.0, 1.5), (1.0, 3.5), (2.0, 7.5), (3.0, 9.5)]);
        let trend = LinearTrend::fit(&pts).unwrap();

        assert!((trend.slope - 2.8).abs() < 1e-12);
        assert!((trend.intercept() - 1.3).abs() < 1e-12);
        assert!((trend.at(10.0) - 29.3).abs() < 1e-9);
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(forecast(&[], 2030.0), None);
        assert_eq!(forecast(&points(&[(2000.0, 1.0)]), 2030.0), None);
        assert_eq!(forecast(&points(&[(2000.0, 1.0), (2001.0, f64::NAN)]), 2030.0), None);
        // vertical line
        assert_eq!(forecast(&points(&[(2000.0, 1.0), (2000.0, 2.0)]), 2030.0), None);
    }

    #[test]
    fn test_flat_trend() {
        let pts = points(&[(2000.0, 4.0), (2005.0, 4.0), (2010.0, 4.0)]);
        assert_eq!(forecast(&pts, 2050.0), Some(4.0));
    }
}
