//! Exponentially weighted moving average.

/// Computes a recursive EMA over a value sequence.
///
/// Uses the span convention `alpha = 2 / (span + 1)` with the recursion
/// seeded at the first observation:
///
/// ```text
/// y[0] = x[0]
/// y[t] = y[t-1] + alpha * (x[t] - y[t-1])
/// ```
///
/// A position is reported as defined only once `span` observations have
/// been consumed (index `span - 1` onward); earlier positions are `None`.
/// Warm-up observations still feed the recursion, they are only masked in
/// the output.
///
/// # Panics
///
/// Panics if `span` is 0.
#[must_use]
pub fn ewma(values: &[f64], span: usize) -> Vec<Option<f64>> {
    assert!(span >= 1, "EMA span must be at least 1");
    if values.is_empty() {
        return Vec::new();
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut current = values[0];

    for (i, &value) in values.iter().enumerate() {
        if i > 0 {
            current += alpha * (value - current);
        }
        out.push((i + 1 >= span).then_some(current));
    }

    out
}
