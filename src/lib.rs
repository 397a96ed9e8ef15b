//! # Getting started
//!
//! Avro datums written back to back with no framing (no object container
//! file header, no single object encoding prefix) can be decoded either from
//! a buffer, with whatever trails the last complete datum left for later:
//!
//! ```
//! let schema = avro_datum_stream::compile_schema(
//! 	r#"
//! 	{
//! 		"namespace": "test",
//! 		"type": "record",
//! 		"name": "Test",
//! 		"fields": [
//! 			{ "name": "id", "type": "long" },
//! 			{ "name": "at", "type": "long", "is_datetime": true }
//! 		]
//! 	}
//! 	"#,
//! 	None,
//! )
//! .expect("Failed to compile schema");
//!
//! // Two datums, then the first byte of a third one
//! let buffer: &[u8] = &[2, 0, 4, 2, 6];
//!
//! let decoded = avro_datum_stream::decode_sequence(
//! 	buffer,
//! 	&schema,
//! 	avro_datum_stream::OutputMode::Tuple,
//! )
//! .expect("Failed to decode");
//!
//! assert_eq!(decoded.values.len(), 2);
//! assert_eq!(
//! 	serde_json::to_string(&decoded.values[1]).unwrap(),
//! 	r#"[2,"1970-01-01T00:00:00.000000001Z"]"#
//! );
//! assert_eq!(decoded.consumed, 4);
//! ```
//!
//! or directly from an [`io::Read`](std::io::Read), which takes care of
//! carrying incomplete datums over from one chunk to the next:
//!
//! ```
//! # let schema: avro_datum_stream::Schema = r#""string""#.parse().unwrap();
//! let file: &[u8] = &[6, b'f', b'o', b'o', 6, b'b', b'a', b'r'];
//! for value in avro_datum_stream::read_stream(&schema, file).with_buffer_size(3) {
//! 	let value = value.expect("Failed to decode stream");
//! 	println!("{}", serde_json::to_string(&value).unwrap());
//! }
//! ```
//!
//! # Insufficient bytes versus malformed data
//!
//! Decoding a buffer that ends in the middle of a datum is not an error: the
//! incomplete datum is simply not decoded, and
//! [`DecodedSequence::consumed`](de::DecodedSequence::consumed) says where it
//! starts. Data that does not match the schema is an error of kind
//! [`Malformed`](de::DeErrorKind::Malformed), which no amount of additional
//! input can fix.

pub mod de;
pub mod schema;
pub mod stream;

pub use {
	de::{OutputMode, Value},
	schema::{compile_schema, Schema},
	stream::{read_stream, read_stream_tuples},
};

/// Decode as many complete avro datums as possible from the start of
/// `buffer`
///
/// Returns the decoded values along with the number of bytes they took. The
/// remaining bytes are the beginning of a datum that `buffer` does not fully
/// contain.
///
/// See [`DecoderConfig::decode_sequence`](de::DecoderConfig::decode_sequence)
/// to set custom limits.
pub fn decode_sequence<'s>(
	buffer: &[u8],
	schema: &'s Schema,
	output_mode: OutputMode,
) -> Result<de::DecodedSequence<'s>, de::DeError> {
	de::DecoderConfig::new(schema, output_mode).decode_sequence(buffer)
}

/// Decode a single avro "datum" (raw data, no headers...) from the start of
/// `slice`
///
/// If the slice ends before the datum does, the error is of kind
/// [`InsufficientBytes`](de::DeErrorKind::InsufficientBytes).
pub fn from_datum_slice<'s>(
	slice: &[u8],
	schema: &'s Schema,
	output_mode: OutputMode,
) -> Result<Value<'s>, de::DeError> {
	de::DecoderConfig::new(schema, output_mode).decode_datum(slice)
}
