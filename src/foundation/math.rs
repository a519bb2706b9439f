/// Linear blend from `from` to `to` at progress `p`.
pub fn mix(from: f64, to: f64, p: f64) -> f64 {
    from + (to - from) * p
}

/// Inverse of [`mix`]: where `v` sits between `from` and `to`.
///
/// A zero-width span reports `1.0` (already arrived).
pub fn progress(from: f64, to: f64, v: f64) -> f64 {
    let span = to - from;
    if span == 0.0 { 1.0 } else { (v - from) / span }
}

/// Piecewise-linear map from ascending `input` stops to `output` stops, clamped to the ends.
///
/// `input` and `output` must have the same non-zero length.
pub fn interpolate(input: &[f64], output: &[f64], v: f64) -> f64 {
    debug_assert_eq!(input.len(), output.len());
    let n = input.len().min(output.len());
    match n {
        0 => return v,
        1 => return output[0],
        _ => {}
    }
    if v <= input[0] {
        return output[0];
    }
    if v >= input[n - 1] {
        return output[n - 1];
    }
    let seg = input[..n]
        .windows(2)
        .position(|w| v < w[1])
        .unwrap_or(n - 2);
    let p = progress(input[seg], input[seg + 1], v).clamp(0.0, 1.0);
    mix(output[seg], output[seg + 1], p)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
