/// Radical inverse of `index` in the given base, the 1-D Halton sequence.
pub(crate) fn radical_inverse(mut index: u64, base: u32) -> f64 {
    let base_u = u64::from(base);
    let base_f = f64::from(base);
    let mut fraction = 1.0;
    let mut result = 0.0;

    while index > 0 {
        fraction /= base_f;
        result += fraction * (index % base_u) as f64;
        index /= base_u;
    }

    result
}

/// Builds `count` points pairing two Halton sequences, starting at index 1.
pub(crate) fn halton_points(count: usize, x_base: u32, y_base: u32) -> Vec<(f64, f64)> {
    (1..=count as u64)
        .map(|index| {
            (
                radical_inverse(index, x_base),
                radical_inverse(index, y_base),
            )
        })
        .collect()
}
