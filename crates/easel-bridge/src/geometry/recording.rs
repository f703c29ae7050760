use super::sink::{GeometryCall, GeometrySink, Point};

/// In-memory recorder surface: keeps every call it receives, in order.
///
/// Useful as the secondary target of [`submit`](super::submit) and for
/// replaying a captured sequence onto another sink later.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    calls: Vec<GeometryCall>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[GeometryCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Re-issues every recorded call on `sink`, in recording order.
    pub fn replay(&self, sink: &mut dyn GeometrySink) {
        for call in &self.calls {
            call.apply(sink);
        }
    }
}

impl GeometrySink for Recording {
    fn point(&mut self, p: Point) {
        self.calls.push(GeometryCall::Point(p));
    }

    fn line(&mut self, a: Point, b: Point) {
        self.calls.push(GeometryCall::Line(a, b));
    }

    fn vertex(&mut self, p: Point) {
        self.calls.push(GeometryCall::Vertex(p));
    }

    fn bezier_vertex(&mut self, c1: Point, c2: Point, anchor: Point) {
        self.calls.push(GeometryCall::BezierVertex(c1, c2, anchor));
    }

    fn curve_vertex(&mut self, p: Point) {
        self.calls.push(GeometryCall::CurveVertex(p));
    }

    fn quadratic_vertex(&mut self, control: Point, anchor: Point) {
        self.calls.push(GeometryCall::QuadraticVertex(control, anchor));
    }
}
