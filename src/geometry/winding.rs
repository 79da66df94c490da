//! Clockwise ordering of coplanar points.
//!
//! A face's vertices are ordered by projecting them onto the two axes that
//! span the face's plane and merge sorting with an angular comparator. For
//! any convex point set surrounding the plane's origin this yields a simple
//! polygon whose winding is the same for every face: clockwise once the
//! second axis is drawn pointing down, as on screen.

use std::cmp::Ordering;

use crate::math::Vec3;

/// A pair of coordinate selectors spanning a plane.
#[derive(Clone, Copy)]
pub struct AxisPair {
    first: fn(&Vec3) -> f32,
    second: fn(&Vec3) -> f32,
}

impl AxisPair {
    /// Plane of constant X.
    pub const YZ: Self = Self::new(|p| p.y, |p| p.z);
    /// Plane of constant Y.
    pub const XZ: Self = Self::new(|p| p.x, |p| p.z);
    /// Plane of constant Z.
    pub const XY: Self = Self::new(|p| p.x, |p| p.y);

    pub const fn new(first: fn(&Vec3) -> f32, second: fn(&Vec3) -> f32) -> Self {
        Self { first, second }
    }

    /// The pair spanning the plane perpendicular to `axis` (0 = x, 1 = y, 2 = z).
    pub fn perpendicular_to(axis: usize) -> Self {
        match axis {
            0 => Self::YZ,
            1 => Self::XZ,
            _ => Self::XY,
        }
    }

    /// Projects a point onto the plane.
    pub fn project(&self, point: &Vec3) -> (f32, f32) {
        ((self.first)(point), (self.second)(point))
    }

    /// Orders two points around the plane's origin.
    ///
    /// Points with a non-negative first coordinate come before points with a
    /// negative one. Within a half, `a` precedes `b` when the 2D cross
    /// product `a × b` is positive. Collinear points fall back to the second
    /// coordinate, ascending.
    pub fn compare(&self, a: &Vec3, b: &Vec3) -> Ordering {
        let (ax, ay) = self.project(a);
        let (bx, by) = self.project(b);

        let a_right = ax >= 0.0;
        let b_right = bx >= 0.0;
        if a_right != b_right {
            return if a_right { Ordering::Less } else { Ordering::Greater };
        }

        let cross = ax * by - bx * ay;
        if cross > 0.0 {
            Ordering::Less
        } else if cross < 0.0 {
            Ordering::Greater
        } else {
            ay.total_cmp(&by)
        }
    }
}

impl std::fmt::Debug for AxisPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxisPair").finish_non_exhaustive()
    }
}

/// Merge sorts `points` clockwise and returns the resulting index order.
pub fn sort_clockwise(points: &[Vec3], axes: AxisPair) -> Vec<usize> {
    let indices: Vec<usize> = (0..points.len()).collect();
    merge_sort(indices, points, &axes)
}

fn merge_sort(indices: Vec<usize>, points: &[Vec3], axes: &AxisPair) -> Vec<usize> {
    if indices.len() <= 1 {
        return indices;
    }

    let mid = indices.len() / 2;
    let left = merge_sort(indices[..mid].to_vec(), points, axes);
    let right = merge_sort(indices[mid..].to_vec(), points, axes);
    merge(left, right, points, axes)
}

/// Merges two sorted runs. Ties keep the left run first, so the sort is stable.
fn merge(left: Vec<usize>, right: Vec<usize>, points: &[Vec3], axes: &AxisPair) -> Vec<usize> {
    let mut result = Vec::with_capacity(left.len() + right.len());
    let mut left_iter = left.into_iter().peekable();
    let mut right_iter = right.into_iter().peekable();

    while let (Some(&l), Some(&r)) = (left_iter.peek(), right_iter.peek()) {
        if axes.compare(&points[r], &points[l]) == Ordering::Less {
            result.push(r);
            right_iter.next();
        } else {
            result.push(l);
            left_iter.next();
        }
    }

    result.extend(left_iter);
    result.extend(right_iter);
    result
}

/// Shoelace signed area of a polygon projected onto `axes`.
pub fn signed_area(points: &[Vec3], axes: AxisPair) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (ax, ay) = axes.project(&points[i]);
            let (bx, by) = axes.project(&points[(i + 1) % n]);
            ax * by - bx * ay
        })
        .sum::<f32>()
        / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn ordered(points: &[Vec3], axes: AxisPair) -> Vec<Vec3> {
        sort_clockwise(points, axes).into_iter().map(|i| points[i]).collect()
    }

    #[test]
    fn square_is_ordered_as_a_simple_polygon() {
        let square = [
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
        ];
        let sorted = ordered(&square, AxisPair::XY);
        assert_eq!(
            sorted,
            vec![
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
                Vec3::new(-1.0, -1.0, 0.0),
            ]
        );
        assert_relative_eq!(signed_area(&sorted, AxisPair::XY), 4.0);
    }

    #[test]
    fn points_on_the_dividing_axis_sort_by_second_coordinate() {
        let diamond = [
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
        ];
        let sorted = ordered(&diamond, AxisPair::XY);
        assert_eq!(sorted[0], Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(sorted[1], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(sorted[2], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(sorted[3], Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn selectors_pick_the_face_plane() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(AxisPair::YZ.project(&p), (2.0, 3.0));
        assert_eq!(AxisPair::XZ.project(&p), (1.0, 3.0));
        assert_eq!(AxisPair::perpendicular_to(2).project(&p), (1.0, 2.0));
    }

    #[test]
    fn short_inputs_are_returned_unchanged() {
        assert!(sort_clockwise(&[], AxisPair::XY).is_empty());
        assert_eq!(sort_clockwise(&[Vec3::ONE], AxisPair::XY), vec![0]);
    }

    fn convex_polygon() -> impl Strategy<Value = Vec<Vec3>> {
        // Distinct angles on a circle around the origin, shuffled.
        (
            proptest::sample::subsequence((0..72).collect::<Vec<u32>>(), 3..9),
            0.5f32..5.0,
        )
            .prop_flat_map(|(steps, radius)| {
                let points: Vec<Vec3> = steps
                    .into_iter()
                    .map(|step| {
                        let angle = (step as f32 * 5.0).to_radians();
                        Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
                    })
                    .collect();
                Just(points).prop_shuffle()
            })
    }

    proptest! {
        #[test]
        fn convex_sets_get_positive_area_and_full_hull(points in convex_polygon()) {
            let sorted = ordered(&points, AxisPair::XY);
            let area = signed_area(&sorted, AxisPair::XY);

            let mut by_angle = points.clone();
            by_angle.sort_by(|a, b| a.y.atan2(a.x).total_cmp(&b.y.atan2(b.x)));
            let hull = signed_area(&by_angle, AxisPair::XY).abs();

            prop_assert!(area > 0.0);
            prop_assert!((area - hull).abs() < 1e-3 * hull.max(1.0));
        }
    }
}
