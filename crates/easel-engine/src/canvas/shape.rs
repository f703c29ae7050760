use easel_bridge::Point;

/// Segments used to flatten each bezier, quadratic or curve span.
const CURVE_STEPS: usize = 16;

/// A shape being built between `begin_shape` and `end_shape`.
///
/// Curved vertices are flattened as they arrive. Curve (Catmull-Rom)
/// vertices need four control points before the first span appears; the
/// first and last control points only steer the tangents.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    points: Vec<Point>,
    curve: Vec<Point>,
}

impl Shape {
    pub fn vertex(&mut self, p: Point) {
        self.curve.clear();
        self.points.push(p);
    }

    pub fn bezier(&mut self, c1: Point, c2: Point, anchor: Point) {
        self.curve.clear();
        let Some(&start) = self.points.last() else {
            log::debug!("bezier_vertex needs a preceding vertex");
            return;
        };
        for i in 1..=CURVE_STEPS {
            let t = i as f32 / CURVE_STEPS as f32;
            let u = 1.0 - t;
            let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
            self.points.push(Point::xy(
                a * start.x + b * c1.x + c * c2.x + d * anchor.x,
                a * start.y + b * c1.y + c * c2.y + d * anchor.y,
            ));
        }
    }

    pub fn quadratic(&mut self, control: Point, anchor: Point) {
        self.curve.clear();
        let Some(&start) = self.points.last() else {
            log::debug!("quadratic_vertex needs a preceding vertex");
            return;
        };
        for i in 1..=CURVE_STEPS {
            let t = i as f32 / CURVE_STEPS as f32;
            let u = 1.0 - t;
            let (a, b, c) = (u * u, 2.0 * u * t, t * t);
            self.points.push(Point::xy(
                a * start.x + b * control.x + c * anchor.x,
                a * start.y + b * control.y + c * anchor.y,
            ));
        }
    }

    pub fn curve(&mut self, p: Point) {
        self.curve.push(p);
        let n = self.curve.len();
        if n < 4 {
            return;
        }
        let [p0, p1, p2, p3] = [self.curve[n - 4], self.curve[n - 3], self.curve[n - 2], self.curve[n - 1]];
        if n == 4 {
            self.points.push(p1);
        }
        for i in 1..=CURVE_STEPS {
            let t = i as f32 / CURVE_STEPS as f32;
            self.points.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

fn catmull_rom(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let (t2, t3) = (t * t, t * t * t);
    let f = |a: f32, b: f32, c: f32, d: f32| {
        0.5 * ((2.0 * b) + (-a + c) * t + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2 + (-a + 3.0 * b - 3.0 * c + d) * t3)
    };
    Point::xy(f(p0.x, p1.x, p2.x, p3.x), f(p0.y, p1.y, p2.y, p3.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, x: f32, y: f32) -> bool {
        (a.x - x).abs() < 1e-4 && (a.y - y).abs() < 1e-4
    }

    #[test]
    fn bezier_ends_on_its_anchor() {
        let mut s = Shape::default();
        s.vertex(Point::xy(0.0, 0.0));
        s.bezier(Point::xy(0.0, 10.0), Point::xy(10.0, 10.0), Point::xy(10.0, 0.0));
        let pts = s.into_points();
        assert_eq!(pts.len(), 1 + CURVE_STEPS);
        assert!(close(pts[pts.len() - 1], 10.0, 0.0));
        assert!(close(pts[CURVE_STEPS / 2], 5.0, 7.5));
    }

    #[test]
    fn quadratic_without_start_is_ignored() {
        let mut s = Shape::default();
        s.quadratic(Point::xy(1.0, 1.0), Point::xy(2.0, 2.0));
        assert!(s.into_points().is_empty());
    }

    #[test]
    fn curve_spans_inner_control_points() {
        let mut s = Shape::default();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)] {
            s.curve(Point::xy(x, y));
        }
        let pts = s.into_points();
        // first span starts at p1, two spans of CURVE_STEPS each
        assert_eq!(pts.len(), 1 + 2 * CURVE_STEPS);
        assert!(close(pts[0], 1.0, 0.0));
        assert!(close(pts[pts.len() - 1], 3.0, 0.0));
    }
}
