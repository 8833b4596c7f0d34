//! 2D vector geometry primitives shared by the safety evaluator and the roadmap
//! builders: segment/segment and point/segment squared distance, and signed
//! angular difference. All functions are pure, allocation-free, and stable for
//! degenerate (zero-length) segments.

use nalgebra::Vector2;

pub type Vec2 = Vector2<f64>;

/// Squared distance from point `p` to segment `a`-`b`, clamped to the segment's
/// endpoints.
pub fn point_seg_dist2(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(&ab);
    if len2 <= f64::EPSILON {
        return (p - a).norm_squared();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    let closest = a + ab * t;
    (p - closest).norm_squared()
}

/// Squared distance between two line segments `a1`-`a2` and `b1`-`b2`.
///
/// Uses the standard closed-form segment/segment test, falling back to
/// clamped point-to-segment distances at the endpoints whenever the segments
/// are parallel or either segment has zero length.
pub fn seg_seg_dist2(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> f64 {
    let d1 = a2 - a1;
    let d2 = b2 - b1;
    let r = a1 - b1;

    let a = d1.dot(&d1);
    let e = d2.dot(&d2);
    let f = d2.dot(&r);

    // Both segments degenerate to points.
    if a <= f64::EPSILON && e <= f64::EPSILON {
        return (a1 - b1).norm_squared();
    }
    if a <= f64::EPSILON {
        // a1 == a2, first segment is a point.
        return point_seg_dist2(a1, b1, b2);
    }
    if e <= f64::EPSILON {
        // b1 == b2, second segment is a point.
        return point_seg_dist2(b1, a1, a2);
    }

    let c = d1.dot(&r);
    let b = d1.dot(&d2);
    let denom = a * e - b * b;

    let mut s = if denom.abs() > f64::EPSILON {
        ((b * f - c * e) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut t = (b * s + f) / e;
    if t < 0.0 {
        t = 0.0;
        s = (-c / a).clamp(0.0, 1.0);
    } else if t > 1.0 {
        t = 1.0;
        s = ((b - c) / a).clamp(0.0, 1.0);
    }

    let closest_a = a1 + d1 * s;
    let closest_b = b1 + d2 * t;
    (closest_a - closest_b).norm_squared()
}

/// Signed minimal angular difference `alpha - beta`, wrapped into `(-pi, pi]`.
pub fn angle_diff(alpha: f64, beta: f64) -> f64 {
    let two_pi = std::f64::consts::PI * 2.0;
    let mut d = (alpha - beta) % two_pi;
    if d <= -std::f64::consts::PI {
        d += two_pi;
    } else if d > std::f64::consts::PI {
        d -= two_pi;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vec2 {
        Vector2::new(x, y)
    }

    #[test]
    fn point_seg_dist2_projects_onto_middle() {
        let d2 = point_seg_dist2(v(1.0, 1.0), v(0.0, 0.0), v(2.0, 0.0));
        assert!((d2 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn point_seg_dist2_clamps_to_endpoint() {
        let d2 = point_seg_dist2(v(-1.0, 0.0), v(0.0, 0.0), v(2.0, 0.0));
        assert!((d2 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn point_seg_dist2_degenerate_segment() {
        let d2 = point_seg_dist2(v(3.0, 4.0), v(0.0, 0.0), v(0.0, 0.0));
        assert!((d2 - 25.0).abs() < 1e-9);
    }

    #[test]
    fn seg_seg_dist2_parallel_segments() {
        let d2 = seg_seg_dist2(v(0.0, 0.0), v(10.0, 0.0), v(0.0, 5.0), v(10.0, 5.0));
        assert!((d2 - 25.0).abs() < 1e-9);
    }

    #[test]
    fn seg_seg_dist2_crossing_segments_is_zero() {
        let d2 = seg_seg_dist2(v(0.0, 0.0), v(10.0, 10.0), v(0.0, 10.0), v(10.0, 0.0));
        assert!(d2 < 1e-9);
    }

    #[test]
    fn seg_seg_dist2_degenerate_both_points() {
        let d2 = seg_seg_dist2(v(0.0, 0.0), v(0.0, 0.0), v(3.0, 4.0), v(3.0, 4.0));
        assert!((d2 - 25.0).abs() < 1e-9);
    }

    #[test]
    fn angle_diff_wraps_correctly() {
        let pi = std::f64::consts::PI;
        assert!((angle_diff(0.1, -0.1) - 0.2).abs() < 1e-9);
        assert!((angle_diff(-pi + 0.1, pi - 0.1) - (0.2 - 2.0 * pi)).abs() < 1e-9);
        assert!(angle_diff(pi, 0.0) <= pi);
    }

    #[test]
    fn angle_diff_is_antisymmetric() {
        let a = 1.234;
        let b = -2.1;
        assert!((angle_diff(a, b) + angle_diff(b, a)).abs() < 1e-9);
    }
}
