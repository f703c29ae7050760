use crate::error::BridgeResult;

use super::batch::GeometryBatch;
use super::kind::GeometryKind;
use super::sink::{GeometryCall, GeometrySink, GeometryTarget};

/// Issues one `kind` call per batch row on `primary`, mirrored to `recorder`.
///
/// The row width is validated before anything is drawn. For each row the
/// recorder sees the call first, then the primary surface, so both observe
/// the same sequence. Returns the number of rows submitted; a batch without
/// rows is accepted whatever its width.
pub fn submit(
    kind: GeometryKind,
    batch: &GeometryBatch,
    primary: &mut dyn GeometrySink,
    mut recorder: Option<&mut dyn GeometrySink>,
) -> BridgeResult<usize> {
    if batch.is_empty() {
        return Ok(0);
    }
    let dimension = kind.dimension_for(batch.columns())?;

    let mut rows = 0;
    for row in batch.rows() {
        let call = GeometryCall::from_row(kind, row, dimension);
        if let Some(rec) = recorder.as_deref_mut() {
            call.apply(rec);
        }
        call.apply(primary);
        rows += 1;
    }

    log::trace!("submitted {rows} {kind} rows (dimension {dimension})");
    Ok(rows)
}

/// [`submit`] against whatever surfaces `target` currently exposes.
pub fn submit_to<T>(kind: GeometryKind, batch: &GeometryBatch, target: &mut T) -> BridgeResult<usize>
where
    T: GeometryTarget + ?Sized,
{
    let (primary, recorder) = target.targets();
    submit(kind, batch, primary, recorder)
}
