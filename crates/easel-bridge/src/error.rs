use crate::geometry::GeometryKind;

pub type BridgeResult<T> = Result<T, BridgeError>;

/// Errors surfaced to callers of the bridge.
///
/// Handler failures are not represented here: they latch the bridge's
/// [`RunState`](crate::RunState) instead of propagating. Teardown problems are
/// captured per step in a [`TeardownReport`](crate::TeardownReport).
#[derive(thiserror::Error, Debug)]
pub enum BridgeError {
    /// The handler provider could not be queried when the session started.
    #[error("handler provider unavailable: {0}")]
    BoundaryUnavailable(String),

    /// A pixel byte buffer does not match the declared pixel count.
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// `width * height * 4` does not fit in memory.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A geometry batch row width does not fit the geometry kind.
    #[error("{kind} rows need {two} or {three} columns, got {columns}")]
    ColumnMismatch {
        kind: GeometryKind,
        columns: usize,
        two: usize,
        three: usize,
    },

    /// A geometry table whose rows are not all the same width.
    #[error("ragged geometry batch: {0}")]
    RaggedBatch(String),

    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),
}

impl BridgeError {
    pub fn boundary(msg: impl Into<String>) -> Self {
        Self::BoundaryUnavailable(msg.into())
    }

    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }

    pub fn ragged(msg: impl Into<String>) -> Self {
        Self::RaggedBatch(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            BridgeError::boundary("gone")
                .to_string()
                .starts_with("handler provider unavailable:")
        );
        assert_eq!(
            BridgeError::size_mismatch(16, 15).to_string(),
            "pixel buffer size mismatch: expected 16 bytes, got 15"
        );
        assert!(BridgeError::ragged("row 2").to_string().contains("row 2"));
    }

    #[test]
    fn column_mismatch_names_the_kind() {
        let err = BridgeError::ColumnMismatch {
            kind: GeometryKind::Line,
            columns: 3,
            two: 4,
            three: 6,
        };
        assert_eq!(err.to_string(), "line rows need 4 or 6 columns, got 3");
    }
}
