//! The byte cursor the decoder reads primitives from

use super::DeError;

use integer_encoding::VarInt;

/// Maximum number of bytes of a varint-encoded 64-bit integer
const MAX_VARINT_LEN: usize = 10;

/// Cursor over an input buffer
///
/// Every read either advances the position and returns the value, or fails
/// without ever reading past the end of the buffer. Failures caused by the
/// buffer ending too early are
/// [`InsufficientBytes`](super::DeErrorKind::InsufficientBytes) errors.
pub struct SliceRead<'a> {
	buffer: &'a [u8],
	position: usize,
}

impl<'a> SliceRead<'a> {
	/// Construct a `SliceRead` positioned at the start of `buffer`
	pub fn new(buffer: &'a [u8]) -> Self {
		Self {
			buffer,
			position: 0,
		}
	}

	/// Offset of the next byte that would be read
	///
	/// Never exceeds the length of the buffer.
	pub fn position(&self) -> usize {
		self.position
	}

	/// The bytes that have not been read yet
	pub fn remaining(&self) -> &'a [u8] {
		&self.buffer[self.position..]
	}

	/// Read an integer of type `I` using zig-zag varint encoding
	///
	/// Note that Avro uses signed integers all the time, so there is seldom
	/// use-case for unsigned integers here.
	pub fn read_varint<I>(&mut self) -> Result<I, DeError>
	where
		I: VarInt,
	{
		let remaining = self.remaining();
		match I::decode_var(remaining) {
			Some((val, read)) => {
				self.position += read;
				Ok(val)
			}
			None if remaining.len() >= MAX_VARINT_LEN => Err(DeError::new(
				"Varint is not terminated within the maximum length of an encoded 64-bit integer",
			)),
			None => Err(DeError::unexpected_eof()),
		}
	}

	/// Read a buffer of size `N`, returning it as an array
	///
	/// The decoder often needs to read fixed-size buffers to immediately turn
	/// them into values (e.g. floats).
	pub fn read_const_size_buf<const N: usize>(&mut self) -> Result<[u8; N], DeError> {
		let slice = self.read_slice(N)?;
		let mut buf = [0u8; N];
		buf.copy_from_slice(slice);
		Ok(buf)
	}

	/// Read exactly `n` bytes
	pub fn read_slice(&mut self, n: usize) -> Result<&'a [u8], DeError> {
		let remaining = self.remaining();
		if n > remaining.len() {
			Err(DeError::unexpected_eof())
		} else {
			self.position += n;
			Ok(&remaining[..n])
		}
	}
}
