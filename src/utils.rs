//! Utility functions for the MENACE crate

use rand::Rng;

/// Calculate Shannon entropy from a probability distribution.
///
/// H = -Σ(p * ln(p)) over p > 0.
pub fn shannon_entropy<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    probabilities
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.ln())
        .sum()
}

/// Calculate entropy from non-negative weights, normalising first.
///
/// Returns 0.0 when the total weight is zero.
///
/// # Examples
///
/// ```
/// use menace::utils::entropy_from_weights;
///
/// let entropy = entropy_from_weights([1.0, 1.0]);
/// assert!((entropy - std::f64::consts::LN_2).abs() < 1e-9);
/// assert_eq!(entropy_from_weights([0.0, 0.0]), 0.0);
/// ```
pub fn entropy_from_weights<I>(weights: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let weights: Vec<f64> = weights.into_iter().collect();
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return 0.0;
    }
    shannon_entropy(weights.into_iter().map(|w| w / total))
}

/// Draw one item with probability proportional to its integer weight.
///
/// Builds a prefix-sum array, draws a single integer in `[0, total)` and
/// locates it with a binary search. Zero-weight items own an empty range and
/// can never be drawn. Returns `None` when the total weight is zero.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use menace::utils::weighted_pick;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let picked = weighted_pick(&mut rng, &[(3, 0), (5, 2)]);
/// assert_eq!(picked, Some(5));
/// assert_eq!(weighted_pick(&mut rng, &[(1, 0)]), None);
/// ```
pub fn weighted_pick<R, T>(rng: &mut R, items: &[(T, u32)]) -> Option<T>
where
    R: Rng,
    T: Copy,
{
    let mut prefix = Vec::with_capacity(items.len());
    let mut total = 0u64;
    for &(_, weight) in items {
        total += u64::from(weight);
        prefix.push(total);
    }

    if total == 0 {
        return None;
    }

    let ticket = rng.random_range(0..total);
    let index = prefix.partition_point(|&upper| upper <= ticket);
    items.get(index).map(|&(item, _)| item)
}
