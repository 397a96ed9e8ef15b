use super::*;

/// `int`s are encoded exactly like `long`s, so they are read as such and
/// range-checked
pub(in super::super) fn read_int(state: &mut DecoderState<'_, '_>) -> Result<i32, DeError> {
	let value: i64 = state.read_varint()?;
	value.try_into().map_err(|_| {
		DeError::custom(format_args!(
			"Encoded value {value} does not fit in an avro int"
		))
	})
}
