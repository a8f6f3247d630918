mod delete;
mod load;
mod save;

pub(crate) use delete::DeleteExecutor;
pub(crate) use load::LoadExecutor;
pub(crate) use save::SaveExecutor;

use crate::{
    db::store::{DataKey, StoredRow},
    error::InternalError,
    traits::{EntityKind, FieldValue},
};

/// Decode a stored row and check it still carries the key it is filed under.
pub(super) fn decode_row<E: EntityKind>(
    data_key: &DataKey,
    row: &StoredRow,
) -> Result<E, InternalError> {
    let entity: E = row.raw.try_decode().map_err(|err| {
        InternalError::store_corruption(format!("row decode failed: {data_key} ({err})"))
    })?;

    let decoded_key = entity.key().to_value();
    if decoded_key != data_key.key().as_value() {
        return Err(InternalError::store_corruption(format!(
            "row key mismatch: {data_key} decoded={decoded_key}"
        )));
    }

    Ok(entity)
}
