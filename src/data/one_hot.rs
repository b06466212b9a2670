use rand::Rng;

/// A vector of `width` zeros with a single `1.0` at `hot`.
///
/// # Panics
/// Panics if `hot >= width`.
pub fn one_hot(width: usize, hot: usize) -> Vec<f64> {
    assert!(hot < width, "hot index {hot} out of range for width {width}");
    let mut v = vec![0.0; width];
    v[hot] = 1.0;
    v
}

/// `count` one-hot vectors of length `width`, the hot position drawn
/// uniformly for each. Returns an empty set when `width` is zero.
pub fn one_hot_samples<R: Rng + ?Sized>(count: usize, width: usize, rng: &mut R) -> Vec<Vec<f64>> {
    if width == 0 {
        return Vec::new();
    }
    (0..count)
        .map(|_| one_hot(width, rng.gen_range(0..width)))
        .collect()
}
