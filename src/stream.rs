//! Decode datums from an [`io::Read`](std::io::Read) chunk by chunk
//!
//! The stream is read into a buffer, every complete datum in that buffer is
//! decoded, and the incomplete tail is carried over in front of the next
//! chunk.

use crate::{
	de::{DeError, DecodedSequence, DecoderConfig, OutputMode, Value},
	Schema,
};

use {
	std::io::Read,
	tracing::{debug, warn},
};

/// Default size of the chunks read from the underlying reader
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Errors that may happen when decoding a stream
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
	/// A datum in the stream does not match the schema
	#[error("Failed to decode datum from stream: {0}")]
	Decode(#[from] DeError),
	/// The underlying reader failed
	#[error("Failed to read from stream: {0}")]
	Io(#[from] std::io::Error),
	/// The stream ended in the middle of a datum
	#[error("{remaining_bytes} bytes remaining but could not continue reading from stream")]
	Truncated {
		/// Size of the incomplete datum at the end of the stream
		remaining_bytes: usize,
	},
}

/// Iterator over the datums of a stream of back-to-back avro datums
///
/// Obtain one through [`read_stream`], [`read_stream_tuples`] or
/// [`StreamReader::with_config`].
///
/// After yielding an error, the iterator ends.
///
/// Datums are decoded one chunk at a time: if a chunk holds complete datums
/// followed by malformed data, the error is yielded and the datums of that
/// chunk are not. How many datums are yielded before a
/// [`StreamError::Decode`] therefore depends on the buffer size.
pub struct StreamReader<'s, R> {
	reader: R,
	config: DecoderConfig<'s>,
	buffer_size: usize,
	/// Incomplete datum carried over from the previous chunk, followed by the
	/// bytes of the chunk being read
	buffer: Vec<u8>,
	decoded: std::vec::IntoIter<Value<'s>>,
	/// The next chunk should be larger than `buffer_size` because the current
	/// datum didn't fit in the previous one
	grow: bool,
	finished: bool,
}

/// Decode every datum of `reader` according to `schema`, with records as
/// [`Value::Record`]
///
/// ```
/// let schema: avro_datum_stream::Schema = r#"["null", "string"]"#.parse().unwrap();
/// let stream: &[u8] = &[0, 2, 6, b'f', b'o', b'o'];
///
/// let values = avro_datum_stream::read_stream(&schema, stream)
/// 	.collect::<Result<Vec<_>, _>>()
/// 	.expect("Failed to decode stream");
/// assert_eq!(
/// 	values,
/// 	[
/// 		avro_datum_stream::Value::Null,
/// 		avro_datum_stream::Value::String("foo".to_owned())
/// 	]
/// );
/// ```
pub fn read_stream<'s, R: Read>(schema: &'s Schema, reader: R) -> StreamReader<'s, R> {
	StreamReader::with_config(reader, DecoderConfig::new(schema, OutputMode::Structured))
}

/// Decode every datum of `reader` according to `schema`, with records as
/// [`Value::Tuple`]
pub fn read_stream_tuples<'s, R: Read>(
	schema: &'s Schema,
	reader: R,
) -> StreamReader<'s, R> {
	StreamReader::with_config(reader, DecoderConfig::new(schema, OutputMode::Tuple))
}

impl<'s, R: Read> StreamReader<'s, R> {
	/// Construct a `StreamReader` from a reader and a [`DecoderConfig`]
	///
	/// This is only useful if you want to set custom parameters on the
	/// `DecoderConfig`, otherwise you may simply use [`read_stream`] or
	/// [`read_stream_tuples`].
	pub fn with_config(reader: R, config: DecoderConfig<'s>) -> Self {
		Self {
			reader,
			config,
			buffer_size: DEFAULT_BUFFER_SIZE,
			buffer: Vec::new(),
			decoded: Vec::new().into_iter(),
			grow: false,
			finished: false,
		}
	}

	/// Set the size of the chunks read from the underlying reader
	///
	/// Datums larger than this are still decoded: the buffer grows as
	/// necessary. A size of zero is treated as one.
	pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
		self.buffer_size = buffer_size.max(1);
		self
	}

	/// Turn the `StreamReader` into the reader it was built from
	///
	/// Bytes that were already read from it but not decoded are lost.
	pub fn into_inner(self) -> R {
		self.reader
	}

	/// Append the next chunk of the stream to `buffer`
	///
	/// Returns the number of bytes read, zero meaning the stream is over.
	///
	/// When the buffered datum didn't fit in the previous chunk, keeps reading
	/// until the whole (doubled) chunk is filled, so that the datum is not
	/// decoded again after every short read.
	fn read_chunk(&mut self) -> Result<usize, std::io::Error> {
		let start = self.buffer.len();
		if self.grow {
			let chunk_size = self.buffer_size.max(start);
			return match (&mut self.reader)
				.take(chunk_size as u64)
				.read_to_end(&mut self.buffer)
			{
				Ok(n_read) => Ok(n_read),
				Err(e) => {
					self.buffer.truncate(start);
					Err(e)
				}
			};
		}
		self.buffer.resize(start + self.buffer_size, 0);
		loop {
			match self.reader.read(&mut self.buffer[start..]) {
				Ok(n_read) => {
					self.buffer.truncate(start + n_read);
					return Ok(n_read);
				}
				Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
				Err(e) => {
					self.buffer.truncate(start);
					return Err(e);
				}
			}
		}
	}

	/// Read one chunk and decode all complete datums of the buffer
	///
	/// Returns `false` once the stream is over.
	fn fill_decoded(&mut self) -> Result<bool, StreamError> {
		let n_read = self.read_chunk()?;
		if n_read == 0 {
			debug!(remaining_bytes = self.buffer.len(), "Reached end of stream");
			return Ok(false);
		}
		let DecodedSequence { values, consumed } = self.config.decode_sequence(&self.buffer)?;
		self.buffer.drain(..consumed);
		self.grow = values.is_empty();
		if self.grow {
			debug!(
				buffered = self.buffer.len(),
				"Datum does not fit in buffer, growing next read"
			);
		} else if !self.buffer.is_empty() {
			debug!(
				remaining_bytes = self.buffer.len(),
				decoded = values.len(),
				"Carrying over partial datum to next chunk"
			);
		}
		self.decoded = values.into_iter();
		Ok(true)
	}
}

impl<'s, R: Read> Iterator for StreamReader<'s, R> {
	type Item = Result<Value<'s>, StreamError>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some(value) = self.decoded.next() {
				return Some(Ok(value));
			}
			if self.finished {
				return None;
			}
			match self.fill_decoded() {
				Ok(true) => {}
				Ok(false) => {
					self.finished = true;
					if self.buffer.is_empty() {
						return None;
					}
					let remaining_bytes = self.buffer.len();
					warn!(remaining_bytes, "Stream ended in the middle of a datum");
					return Some(Err(StreamError::Truncated { remaining_bytes }));
				}
				Err(e) => {
					// Yield this error once then pretend we reached EOF: IO errors
					// typically reproduce at every call, and decoding can't resume
					// after malformed data since we don't know where the next datum
					// starts
					self.finished = true;
					return Some(Err(e));
				}
			}
		}
	}
}
