use super::*;

pub(super) fn read_len(state: &mut DecoderState<'_, '_>) -> Result<usize, DeError> {
	let len: usize = state
		.read_varint::<i64>()?
		.try_into()
		.map_err(|e| DeError::custom(format_args!("Invalid buffer length in stream: {e}")))?;
	check_alloc_size(state, len)?;
	Ok(len)
}

fn check_alloc_size(state: &DecoderState<'_, '_>, len: usize) -> Result<(), DeError> {
	if len > state.config().max_alloc_size {
		Err(DeError::custom(format_args!(
			"Buffer length {len} in stream exceeds max_alloc_size ({})",
			state.config().max_alloc_size
		)))
	} else {
		Ok(())
	}
}

pub(in super::super) fn read_length_delimited<'a>(
	state: &mut DecoderState<'_, 'a>,
) -> Result<&'a [u8], DeError> {
	let len = read_len(state)?;
	state.read_slice(len)
}

pub(in super::super) fn read_str<'a>(state: &mut DecoderState<'_, 'a>) -> Result<&'a str, DeError> {
	parse_str(read_length_delimited(state)?)
}

pub(in super::super) fn read_fixed<'a>(
	state: &mut DecoderState<'_, 'a>,
	size: usize,
) -> Result<&'a [u8], DeError> {
	check_alloc_size(state, size)?;
	state.read_slice(size)
}

fn parse_str(bytes: &[u8]) -> Result<&str, DeError> {
	std::str::from_utf8(bytes)
		.map_err(|e| DeError::custom(format_args!("String is not valid utf-8: {e}")))
}
