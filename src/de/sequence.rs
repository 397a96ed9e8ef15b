use super::*;

/// The result of decoding as many complete datums as possible from a buffer
#[derive(Debug, PartialEq)]
pub struct DecodedSequence<'s> {
	/// Every complete datum found at the start of the buffer, in order
	pub values: Vec<Value<'s>>,
	/// Number of bytes taken by `values`
	///
	/// The bytes from this offset on are the beginning of a datum that is not
	/// complete yet: prepend them to the next chunk of input.
	pub consumed: usize,
}

impl<'s> DecoderConfig<'s> {
	/// Decode back-to-back datums from `buffer` until it is exhausted or the
	/// next datum is incomplete
	///
	/// Running out of bytes in the middle of a datum is not an error: decoding
	/// stops there and [`DecodedSequence::consumed`] tells where the partial
	/// datum starts. Any other failure (data that does not match the schema)
	/// is returned as an error, and the values decoded so far are dropped.
	pub fn decode_sequence(&self, buffer: &[u8]) -> Result<DecodedSequence<'s>, DeError> {
		let mut state = DecoderState::with_config(buffer, *self);
		let mut values = Vec::new();
		let mut consumed = 0;
		while consumed < buffer.len() {
			match state.decoder().decode() {
				Ok(value) => {
					let position = state.position();
					if position == consumed {
						// e.g. a schema that is just `null`: we would loop forever
						return Err(DeError::custom(format_args!(
							"Decoded a datum that takes zero bytes at offset {consumed} but {} bytes remain",
							buffer.len() - consumed
						)));
					}
					values.push(value);
					consumed = position;
				}
				Err(e) if e.is_insufficient_bytes() => break,
				Err(e) => return Err(e),
			}
		}
		Ok(DecodedSequence { values, consumed })
	}

	/// Decode a single datum from the start of `slice`
	///
	/// Trailing bytes after the datum are ignored. If `slice` ends before the
	/// datum does, the error is
	/// [`InsufficientBytes`](DeErrorKind::InsufficientBytes).
	pub fn decode_datum(&self, slice: &[u8]) -> Result<Value<'s>, DeError> {
		DecoderState::with_config(slice, *self).decoder().decode()
	}
}
