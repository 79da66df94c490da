//! Painter's algorithm ordering.
//!
//! The renderer has no depth buffer: everything is drawn back to front, so
//! nearer geometry overpaints farther geometry. The same ordering is used for
//! whole solids, for a solid's points and for its faces.

use crate::math::Position3;

/// Returns the indices of `items` ordered by descending distance from `viewer`
/// (furthest first).
///
/// Items at equal distance may come out in either relative order.
pub fn furthest_first<T, F>(items: &[T], viewer: Position3, position_of: F) -> Vec<usize>
where
    F: Fn(&T) -> Position3,
{
    let mut keyed: Vec<(usize, f32)> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (i, position_of(item).distance_to(viewer)))
        .collect();

    // Descending: further away is drawn first
    keyed.sort_unstable_by(|a, b| b.1.total_cmp(&a.1));
    keyed.into_iter().map(|(i, _)| i).collect()
}
