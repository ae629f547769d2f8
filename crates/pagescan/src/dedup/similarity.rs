//! Normalized Levenshtein similarity over Unicode scalar values.

/// Similarity of two strings in `[0.0, 1.0]`.
///
/// Computed as `1 - levenshtein(a, b) / max(len(a), len(b))` with lengths and
/// edits counted in `char`s. Two empty strings are identical (1.0); exactly
/// one empty string scores 0.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    match (len_a, len_b) {
        (0, 0) => return 1.0,
        (0, _) | (_, 0) => return 0.0,
        _ => {}
    }

    let distance = strsim::levenshtein(a, b);
    (1.0 - distance as f64 / len_a.max(len_b) as f64).clamp(0.0, 1.0)
}

/// Highest similarity two strings of these lengths can reach.
///
/// The edit distance is at least the length difference, which lets callers
/// skip the quadratic distance computation when even a perfect alignment
/// could not clear a threshold.
pub(crate) fn similarity_upper_bound(len_a: usize, len_b: usize) -> f64 {
    let longest = len_a.max(len_b);
    if longest == 0 {
        return 1.0;
    }
    1.0 - len_a.abs_diff(len_b) as f64 / longest as f64
}
