//! Ordinary least squares trend lines

use serde::Serialize;

use crate::core::types::NumericColumn;
use crate::data::View;

/// Fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub points: usize,
    pub x_min: f64,
    pub x_max: f64,
}

impl TrendLine {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// End points of the line across the observed x range
    pub fn segment(&self) -> [(f64, f64); 2] {
        [
            (self.x_min, self.predict(self.x_min)),
            (self.x_max, self.predict(self.x_max)),
        ]
    }
}

/// Fit a line through `points`; `None` for fewer than two points or constant x
pub fn fit(points: &[(f64, f64)]) -> Option<TrendLine> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        sxy += (x - mean_x) * (y - mean_y);
        sxx += (x - mean_x) * (x - mean_x);
        syy += (y - mean_y) * (y - mean_y);
        x_min = x_min.min(x);
        x_max = x_max.max(x);
    }
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    // A horizontal cloud is fitted perfectly by a flat line
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };

    Some(TrendLine {
        slope,
        intercept,
        r_squared,
        points: points.len(),
        x_min,
        x_max,
    })
}

/// Paired (x, y) values of the records where both are present
pub fn scatter_points(view: &View<'_>, x: NumericColumn, y: NumericColumn) -> Vec<(f64, f64)> {
    view.iter()
        .filter_map(|r| Some((r.get(x)?, r.get(y)?)))
        .collect()
}

/// OLS trend of `y` against `x` over the view
pub fn ols_trend(view: &View<'_>, x: NumericColumn, y: NumericColumn) -> Option<TrendLine> {
    fit(&scatter_points(view, x, y))
}
