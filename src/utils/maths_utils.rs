use argminmax::ArgMinMax;
use statrs::statistics::{Data, Median};

pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// (min, max) of a slice, or `None` when empty.
pub fn get_min_max(vec: &[f64]) -> Option<(f64, f64)> {
    if vec.is_empty() {
        return None;
    }
    Some((get_min(vec), get_max(vec)))
}

/// Index of the largest value. Ties go to the first.
pub fn argmax(vec: &[f64]) -> Option<usize> {
    if vec.is_empty() {
        None
    } else {
        Some(vec.argmax())
    }
}

pub fn argmin(vec: &[f64]) -> Option<usize> {
    if vec.is_empty() {
        None
    } else {
        Some(vec.argmin())
    }
}

/// Scales values into -1.0..=1.0 by the largest absolute value.
/// All-zero input is returned unchanged.
pub fn normalize_max_abs(vec: &[f64]) -> Vec<f64> {
    let max_abs = vec.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    match max_abs {
        val if val <= 0.0 => vec.to_vec(),
        val => vec.iter().map(|&x| x / val).collect(),
    }
}

/// Centered rolling mean. Positions where the full window does not fit keep
/// their raw value, so the output always has the input's length.
pub fn smooth_data(data: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 || data.len() < window {
        return data.to_vec();
    }

    let half = window / 2;
    let mut smoothed = data.to_vec();
    let mut sum: f64 = data[..window].iter().sum();

    // Window [i - half, i - half + window) is centered on i
    for i in half..=(data.len() - window + half) {
        let start = i - half;
        if start > 0 {
            sum += data[start + window - 1] - data[start - 1];
        }
        smoothed[i] = sum / window as f64;
    }

    smoothed
}

/// Point-to-point change. The first entry is the first value itself
/// (change from an implicit zero baseline).
pub fn first_difference(data: &[f64]) -> Vec<f64> {
    let mut previous = 0.0;
    data.iter()
        .map(|&x| {
            let d = x - previous;
            previous = x;
            d
        })
        .collect()
}

pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(Data::new(data.to_vec()).median())
}

/// Equal-width histogram over [min, max]. Returns (bin centres, counts).
pub fn histogram(data: &[f64], bins: usize) -> (Vec<f64>, Vec<usize>) {
    let Some((lo, hi)) = get_min_max(data) else {
        return (Vec::new(), Vec::new());
    };
    let bins = bins.max(1);

    // Degenerate range: everything lands in a single bin
    if hi - lo <= f64::EPSILON {
        return (vec![lo], vec![data.len()]);
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &x in data {
        let index = (((x - lo) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }
    let centres = (0..bins).map(|i| lo + (i as f64 + 0.5) * width).collect();
    (centres, counts)
}

/// Splits `0..len` into `n_chunks` near-equal contiguous ranges.
pub fn chunk_ranges(len: usize, n_chunks: usize) -> Vec<std::ops::Range<usize>> {
    if len == 0 || n_chunks == 0 {
        return Vec::new();
    }
    let n_chunks = n_chunks.min(len);
    (0..n_chunks)
        .map(|i| (i * len / n_chunks)..((i + 1) * len / n_chunks))
        .collect()
}
