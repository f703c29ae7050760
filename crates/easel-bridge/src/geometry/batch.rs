use crate::error::{BridgeError, BridgeResult};

/// A row-major table of coordinates, one row per geometry call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryBatch {
    columns: usize,
    data: Vec<f32>,
}

impl GeometryBatch {
    /// Wraps a flat buffer. `data.len()` must be a multiple of `columns`.
    pub fn new(columns: usize, data: Vec<f32>) -> BridgeResult<Self> {
        if columns == 0 && !data.is_empty() {
            return Err(BridgeError::ragged("zero-width rows with non-empty data"));
        }
        if columns != 0 && data.len() % columns != 0 {
            return Err(BridgeError::ragged(format!(
                "{} values do not split into rows of {columns}",
                data.len()
            )));
        }
        Ok(Self { columns, data })
    }

    pub fn from_rows<const N: usize>(rows: &[[f32; N]]) -> Self {
        Self {
            columns: N,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// Builds a batch from nested rows; every row must have the same width.
    pub fn from_nested<R: AsRef<[f32]>>(rows: &[R]) -> BridgeResult<Self> {
        let columns = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(columns * rows.len());
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(BridgeError::ragged(format!(
                    "row {i} has {} values, expected {columns}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { columns, data })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.data.len() / self.columns
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.data.chunks_exact(self.columns.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_rows_must_agree_on_width() {
        let ok = GeometryBatch::from_nested(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!((ok.len(), ok.columns()), (2, 2));

        let err = GeometryBatch::from_nested(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, BridgeError::RaggedBatch(ref m) if m.contains("row 1")));
    }

    #[test]
    fn flat_buffer_must_divide_evenly() {
        assert!(GeometryBatch::new(3, vec![0.0; 7]).is_err());
        assert!(GeometryBatch::new(0, vec![1.0]).is_err());
        assert_eq!(GeometryBatch::new(3, vec![0.0; 9]).unwrap().len(), 3);
    }

    #[test]
    fn empty_batches_have_no_rows() {
        let b = GeometryBatch::from_nested::<Vec<f32>>(&[]).unwrap();
        assert!(b.is_empty());
        assert_eq!(b.rows().count(), 0);
        assert!(GeometryBatch::default().is_empty());
    }

    #[test]
    fn rows_preserve_order() {
        let b = GeometryBatch::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let rows: Vec<&[f32]> = b.rows().collect();
        assert_eq!(rows, vec![&[1.0, 2.0, 3.0][..], &[4.0, 5.0, 6.0][..]]);
    }
}
