// digipin-core/src/domain/address/similarity.rs

/// Case-insensitive bigram (Sørensen–Dice) similarity in `[0, 1]`.
///
/// Whitespace is ignored by the bigram scorer, so "New Delhi" and "newdelhi"
/// compare as equal.
pub fn similarity(a: &str, b: &str) -> f64 {
    let score = strsim::sorensen_dice(&a.to_lowercase(), &b.to_lowercase());
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
