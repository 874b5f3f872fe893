use crate::types::Point;

/// Sub-arc count per sweep. Fixed regardless of radius or span; finer arcs
/// cost proportionally more emitted operators, and 16 per full circle is the
/// baseline fidelity target.
pub const ARC_SEGMENTS: usize = 16;

/// One sub-arc approximated as a quadratic Bezier: chord endpoints plus a
/// control point derived from the true arc midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

fn point_on(cx: f64, cy: f64, rx: f64, ry: f64, angle: f64) -> Point {
    Point::new(cx + rx * angle.cos(), cy + ry * angle.sin())
}

/// Computes sub-arc `i` (of [`ARC_SEGMENTS`]) of the elliptical arc centered
/// at (cx, cy) with radii (rx, ry), sweeping from `angle1` to `angle2` in
/// degrees, 0 degrees on the positive X axis.
///
/// The control point is the 3-point quadratic-through-midpoint construction:
/// given chord endpoints P0, P2 and true midpoint M, C = 2M - P0/2 - P2/2,
/// which makes the Bezier pass through M exactly at t = 1/2.
pub fn arc_segment(
    i: usize,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    angle1: f64,
    angle2: f64,
) -> ArcSegment {
    let n = ARC_SEGMENTS as f64;
    let a1 = angle1.to_radians();
    let a2 = angle2.to_radians();
    let s0 = a1 + (a2 - a1) * (i as f64 / n);
    let s1 = a1 + (a2 - a1) * ((i + 1) as f64 / n);

    let start = point_on(cx, cy, rx, ry, s0);
    let mid = point_on(cx, cy, rx, ry, s0 + (s1 - s0) / 2.0);
    let end = point_on(cx, cy, rx, ry, s1);
    let control = Point::new(
        2.0 * mid.x - start.x / 2.0 - end.x / 2.0,
        2.0 * mid.y - start.y / 2.0 - end.y / 2.0,
    );
    ArcSegment {
        start,
        control,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn full_sweep_starts_on_positive_x_axis() {
        let seg = arc_segment(0, 10.0, 20.0, 5.0, 5.0, 0.0, 360.0);
        assert!(close(seg.start, Point::new(15.0, 20.0)));
    }

    #[test]
    fn consecutive_segments_share_endpoints() {
        for i in 0..ARC_SEGMENTS - 1 {
            let a = arc_segment(i, 0.0, 0.0, 30.0, 18.0, 45.0, 300.0);
            let b = arc_segment(i + 1, 0.0, 0.0, 30.0, 18.0, 45.0, 300.0);
            assert!(close(a.end, b.start), "segment {} does not chain", i);
        }
    }

    #[test]
    fn full_sweep_closes_back_on_start() {
        let first = arc_segment(0, 3.0, 4.0, 7.0, 7.0, 0.0, 360.0);
        let last = arc_segment(ARC_SEGMENTS - 1, 3.0, 4.0, 7.0, 7.0, 0.0, 360.0);
        assert!(close(last.end, first.start));
    }

    #[test]
    fn endpoints_lie_on_the_ellipse() {
        let (cx, cy, rx, ry) = (5.0, -2.0, 12.0, 8.0);
        for i in 0..ARC_SEGMENTS {
            let seg = arc_segment(i, cx, cy, rx, ry, 30.0, 270.0);
            for p in [seg.start, seg.end] {
                let v = ((p.x - cx) / rx).powi(2) + ((p.y - cy) / ry).powi(2);
                assert!((v - 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn quadratic_passes_through_arc_midpoint() {
        // B(1/2) = P0/4 + C/2 + P2/4; with C = 2M - P0/2 - P2/2 this is M.
        let seg = arc_segment(2, 0.0, 0.0, 10.0, 6.0, 0.0, 180.0);
        let s0 = (2.0 / 16.0) * std::f64::consts::PI;
        let s1 = (3.0 / 16.0) * std::f64::consts::PI;
        let mid_angle = s0 + (s1 - s0) / 2.0;
        let m = Point::new(10.0 * mid_angle.cos(), 6.0 * mid_angle.sin());
        let b_half = Point::new(
            seg.start.x / 4.0 + seg.control.x / 2.0 + seg.end.x / 4.0,
            seg.start.y / 4.0 + seg.control.y / 2.0 + seg.end.y / 4.0,
        );
        assert!(close(b_half, m));
    }

    #[test]
    fn reversed_sweep_mirrors_forward_sweep() {
        let fwd = arc_segment(0, 0.0, 0.0, 9.0, 9.0, 0.0, 90.0);
        let rev = arc_segment(ARC_SEGMENTS - 1, 0.0, 0.0, 9.0, 9.0, 90.0, 0.0);
        assert!(close(fwd.start, rev.end));
        assert!(close(fwd.end, rev.start));
    }
}
