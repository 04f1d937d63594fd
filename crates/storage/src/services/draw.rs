use rand::Rng;
use rand::seq::IndexedRandom;

/// Pick `count` distinct entries of `eligible` uniformly at random.
///
/// Every subset of size `count` is equally likely; the order of the returned
/// entries carries no meaning. Returns `None` when `count` is zero or larger
/// than the eligible set, which callers report as a failed draw.
pub fn draw<T, R>(eligible: &[T], count: usize, rng: &mut R) -> Option<Vec<T>>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if count == 0 || count > eligible.len() {
        return None;
    }

    Some(eligible.choose_multiple(rng, count).cloned().collect())
}
