use super::*;

use std::num::NonZeroUsize;

/// Arrays and maps are encoded as a series of blocks, each prefixed with its
/// item count, terminated by an empty block
///
/// A negative count means the block also carries its size in bytes right
/// after the count, which we don't need.
fn read_block_len(state: &mut DecoderState<'_, '_>) -> Result<Option<NonZeroUsize>, DeError> {
	let len: i64 = state.read_varint()?;
	let res;
	if len < 0 {
		// res = -len, properly handling i64::MIN
		res = u64::from_ne_bytes(len.to_ne_bytes()).wrapping_neg();
		// Since we don't use that value, decode as u64 instead of i64 (skip zigzag
		// decoding)
		let _: u64 = state.read_varint()?;
	} else {
		res = len as u64;
	}
	res.try_into()
		.map_err(|e| DeError::custom(format_args!("Invalid array length in stream: {e}")))
		.map(NonZeroUsize::new)
}

pub(in super::super) struct BlockReader<'r, 's, 'a> {
	current_block_len: usize,
	n_read: usize,
	state: &'r mut DecoderState<'s, 'a>,
	allowed_depth: AllowedDepth,
}

impl<'r, 's, 'a> BlockReader<'r, 's, 'a> {
	pub(in super::super) fn new(
		state: &'r mut DecoderState<'s, 'a>,
		allowed_depth: AllowedDepth,
	) -> Self {
		Self {
			state,
			current_block_len: 0,
			n_read: 0,
			allowed_depth,
		}
	}

	fn has_more(&mut self) -> Result<bool, DeError> {
		self.current_block_len = match self.current_block_len.checked_sub(1) {
			None => {
				let new_len = read_block_len(self.state)?;
				match new_len {
					None => return Ok(false),
					Some(new_len) => {
						let l = new_len.get();
						let n_read = self.n_read.saturating_add(l);
						if n_read > self.state.config().max_seq_size {
							return Err(DeError::new("Exceeding max sequence size while decoding"));
						}
						self.n_read = n_read;
						l - 1
					}
				}
			}
			Some(new_len) => new_len,
		};
		Ok(true)
	}

	fn decoder<'b>(&'b mut self, schema_node: &'s SchemaNode) -> DatumDecoder<'b, 's, 'a> {
		DatumDecoder {
			state: &mut *self.state,
			schema_node,
			allowed_depth: self.allowed_depth,
		}
	}

	/// Next array element, or `None` once the terminating block is reached
	pub(in super::super) fn next_value(
		&mut self,
		elements_schema: &'s SchemaNode,
	) -> Result<Option<Value<'s>>, DeError> {
		if self.has_more()? {
			self.decoder(elements_schema).decode().map(Some)
		} else {
			Ok(None)
		}
	}

	/// Next map entry, or `None` once the terminating block is reached
	///
	/// Map keys are always strings.
	pub(in super::super) fn next_entry(
		&mut self,
		values_schema: &'s SchemaNode,
	) -> Result<Option<(String, Value<'s>)>, DeError> {
		if self.has_more()? {
			let key = read_str(self.state)?.to_owned();
			let value = self.decoder(values_schema).decode()?;
			Ok(Some((key, value)))
		} else {
			Ok(None)
		}
	}
}
