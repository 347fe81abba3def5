//! Order statistics.

/// Quantile `q` in `[0, 1]` of already sorted values, interpolating
/// linearly between the two nearest order statistics. NaN when empty.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let below = pos.floor() as usize;
            let above = (below + 1).min(n - 1);
            let frac = pos - below as f64;
            sorted[below] + (sorted[above] - sorted[below]) * frac
        }
    }
}

/// Quantile `q` of unsorted values.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, q)
}

/// Several quantiles of the same values with a single sort.
pub fn quantiles(values: &[f64], qs: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    qs.iter().map(|&q| quantile_sorted(&sorted, q)).collect()
}

pub fn median(values: &[f64]) -> f64 {
    quantile(values, 0.5)
}

/// Median that reorders `values` in place instead of allocating.
pub(crate) fn median_in_place(values: &mut [f64]) -> f64 {
    values.sort_unstable_by(f64::total_cmp);
    quantile_sorted(values, 0.5)
}
