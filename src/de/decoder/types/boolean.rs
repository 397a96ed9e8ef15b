use super::*;

/// Any non-zero byte is `true`
pub(in super::super) fn read_bool(state: &mut DecoderState<'_, '_>) -> Result<bool, DeError> {
	let [byte] = state.read_const_size_buf::<1>()?;
	Ok(byte != 0)
}
