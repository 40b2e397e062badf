/// 10% quantile, mean and 90% quantile of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub q10: f64,
    pub mean: f64,
    pub q90: f64,
}

/// Summarise `values`, skipping NaN; `None` when nothing is left
pub fn summarize(values: &[f64]) -> Option<Summary> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    Some(Summary {
        q10: quantile(&sorted, 0.1),
        mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
        q90: quantile(&sorted, 0.9),
    })
}

/// Linearly interpolated quantile of an ascending, non-empty slice
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
