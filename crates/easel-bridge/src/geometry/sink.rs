use super::kind::GeometryKind;

/// One coordinate. `z` is `None` for 2D batches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: Option<f32>,
}

impl Point {
    pub fn xy(x: f32, y: f32) -> Self {
        Self { x, y, z: None }
    }

    pub fn xyz(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// `coords` is 2 or 3 values long.
    pub(crate) fn from_slice(coords: &[f32]) -> Self {
        match *coords {
            [x, y, z] => Self::xyz(x, y, z),
            [x, y, ..] => Self::xy(x, y),
            _ => Self::xy(coords.first().copied().unwrap_or(0.0), 0.0),
        }
    }
}

/// The engine's per-vertex immediate-mode drawing API.
pub trait GeometrySink {
    fn point(&mut self, p: Point);
    fn line(&mut self, a: Point, b: Point);
    fn vertex(&mut self, p: Point);
    fn bezier_vertex(&mut self, c1: Point, c2: Point, anchor: Point);
    fn curve_vertex(&mut self, p: Point);
    fn quadratic_vertex(&mut self, control: Point, anchor: Point);
}

/// Anything that can hand out its primary drawing surface plus the recorder
/// currently capturing it, if one is active.
pub trait GeometryTarget {
    fn targets(&mut self) -> (&mut dyn GeometrySink, Option<&mut dyn GeometrySink>);
}

/// A single immediate-mode call, as issued from one batch row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryCall {
    Point(Point),
    Line(Point, Point),
    Vertex(Point),
    BezierVertex(Point, Point, Point),
    CurveVertex(Point),
    QuadraticVertex(Point, Point),
}

impl GeometryCall {
    /// Splits `row` into `dimension`-wide points. The row width is checked by
    /// the caller.
    pub(crate) fn from_row(kind: GeometryKind, row: &[f32], dimension: usize) -> Self {
        let mut pts = row.chunks_exact(dimension).map(Point::from_slice);
        let mut next = || pts.next().unwrap_or(Point::xy(0.0, 0.0));
        match kind {
            GeometryKind::Point => GeometryCall::Point(next()),
            GeometryKind::Line => GeometryCall::Line(next(), next()),
            GeometryKind::Vertex => GeometryCall::Vertex(next()),
            GeometryKind::BezierVertex => GeometryCall::BezierVertex(next(), next(), next()),
            GeometryKind::CurveVertex => GeometryCall::CurveVertex(next()),
            GeometryKind::QuadraticVertex => GeometryCall::QuadraticVertex(next(), next()),
        }
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            GeometryCall::Point(_) => GeometryKind::Point,
            GeometryCall::Line(..) => GeometryKind::Line,
            GeometryCall::Vertex(_) => GeometryKind::Vertex,
            GeometryCall::BezierVertex(..) => GeometryKind::BezierVertex,
            GeometryCall::CurveVertex(_) => GeometryKind::CurveVertex,
            GeometryCall::QuadraticVertex(..) => GeometryKind::QuadraticVertex,
        }
    }

    pub fn apply(&self, sink: &mut dyn GeometrySink) {
        match *self {
            GeometryCall::Point(p) => sink.point(p),
            GeometryCall::Line(a, b) => sink.line(a, b),
            GeometryCall::Vertex(p) => sink.vertex(p),
            GeometryCall::BezierVertex(c1, c2, p) => sink.bezier_vertex(c1, c2, p),
            GeometryCall::CurveVertex(p) => sink.curve_vertex(p),
            GeometryCall::QuadraticVertex(c, p) => sink.quadratic_vertex(c, p),
        }
    }
}
