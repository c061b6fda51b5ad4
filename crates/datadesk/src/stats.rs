//! Descriptive statistics over columns that may contain missing values.
use statrs::statistics::Statistics;

/// Arithmetic mean of the present values, `None` when nothing is present.
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.mean())
    }
}

/// Pearson correlation over the rows where both values are present.
///
/// Returns NaN when fewer than two complete pairs exist or either side has
/// zero variance, matching pandas' pairwise `corr`.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// Symmetric correlation matrix of the given columns.
pub fn correlation_matrix(columns: &[&[Option<f64>]]) -> Vec<Vec<f64>> {
    let k = columns.len();
    let mut corr = vec![vec![f64::NAN; k]; k];
    for i in 0..k {
        for j in i..k {
            let r = if i == j {
                // A column with any variance correlates perfectly with itself.
                let self_r = pearson(columns[i], columns[i]);
                if self_r.is_nan() {
                    f64::NAN
                } else {
                    1.0
                }
            } else {
                pearson(columns[i], columns[j])
            };
            corr[i][j] = r;
            corr[j][i] = r;
        }
    }
    corr
}
