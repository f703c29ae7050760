use std::fmt;

use crate::error::{BridgeError, BridgeResult};

/// Immediate-mode geometry calls a batch can be submitted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    Line,
    Vertex,
    BezierVertex,
    CurveVertex,
    QuadraticVertex,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 6] = [
        GeometryKind::Point,
        GeometryKind::Line,
        GeometryKind::Vertex,
        GeometryKind::BezierVertex,
        GeometryKind::CurveVertex,
        GeometryKind::QuadraticVertex,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Point => "point",
            GeometryKind::Line => "line",
            GeometryKind::Vertex => "vertex",
            GeometryKind::BezierVertex => "bezier_vertex",
            GeometryKind::CurveVertex => "curve_vertex",
            GeometryKind::QuadraticVertex => "quadratic_vertex",
        }
    }

    /// Points consumed by one call: a line takes its two endpoints, a bezier
    /// vertex two control points plus the anchor, and so on.
    pub fn points_per_call(self) -> usize {
        match self {
            GeometryKind::Point | GeometryKind::Vertex | GeometryKind::CurveVertex => 1,
            GeometryKind::Line | GeometryKind::QuadraticVertex => 2,
            GeometryKind::BezierVertex => 3,
        }
    }

    /// Row width for a 2D or 3D batch of this kind.
    pub fn columns(self, dimension: usize) -> usize {
        self.points_per_call() * dimension
    }

    /// Infers the point dimension (2 or 3) from a batch's row width.
    pub fn dimension_for(self, columns: usize) -> BridgeResult<usize> {
        let (two, three) = (self.columns(2), self.columns(3));
        if columns == two {
            Ok(2)
        } else if columns == three {
            Ok(3)
        } else {
            Err(BridgeError::ColumnMismatch {
                kind: self,
                columns,
                two,
                three,
            })
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
