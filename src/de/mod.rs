//! Defines everything necessary for decoding avro datums into [`Value`]s
//!
//! # For advanced usage
//!
//! You typically want to use top-level functions such as
//! [`decode_sequence`](crate::decode_sequence) but access to this may be
//! necessary for more advanced usage.
//!
//! This gives access to the configuration parameters meant to prevent DOS:
//! - [`DecoderConfig::max_seq_size`]
//! - [`DecoderConfig::allowed_depth`]
//! - [`DecoderConfig::max_alloc_size`]
//!
//! Such usage would go as follows:
//! ```
//! let schema: avro_datum_stream::Schema = r#"
//! {
//! 	"namespace": "test",
//! 	"type": "record",
//! 	"name": "Test",
//! 	"fields": [
//! 		{
//! 			"type": {
//! 				"type": "string"
//! 			},
//! 			"name": "field"
//! 		}
//! 	]
//! }
//! "#
//! .parse()
//! .expect("Failed to parse schema");
//!
//! // Two datums back to back, and the beginning of a third one
//! let avro_datums: &[u8] = &[6, 102, 111, 111, 6, 98, 97, 114, 6, 98];
//!
//! let mut decoder_config = avro_datum_stream::de::DecoderConfig::new(
//! 	&schema,
//! 	avro_datum_stream::OutputMode::Structured,
//! );
//! decoder_config.max_alloc_size = 32 * 1024;
//!
//! let decoded = decoder_config
//! 	.decode_sequence(avro_datums)
//! 	.expect("Failed to decode");
//!
//! assert_eq!(
//! 	decoded.values,
//! 	[
//! 		avro_datum_stream::Value::Record(vec![(
//! 			"field",
//! 			avro_datum_stream::Value::String("foo".to_owned())
//! 		)]),
//! 		avro_datum_stream::Value::Record(vec![(
//! 			"field",
//! 			avro_datum_stream::Value::String("bar".to_owned())
//! 		)]),
//! 	]
//! );
//! // The partial third datum is left for the caller to complete
//! assert_eq!(decoded.consumed, 8);
//! ```

mod decoder;
mod error;
pub mod read;
mod sequence;
mod value;

pub use {
	decoder::DatumDecoder,
	error::{DeError, DeErrorKind},
	sequence::DecodedSequence,
	value::Value,
};

use {
	crate::schema::{Schema, SchemaNode},
	decoder::AllowedDepth,
	read::SliceRead,
};

/// How records are represented in the decoded [`Value`]s
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputMode {
	/// Records decode as [`Value::Record`]: a list of `(field name, value)`
	/// pairs in schema order
	#[default]
	Structured,
	/// Records decode as [`Value::Tuple`]: only the field values, in schema
	/// order
	Tuple,
}

/// Schema + other configs for decoding
#[derive(Clone, Copy)]
pub struct DecoderConfig<'s> {
	schema_root: &'s SchemaNode,
	/// Whether records decode as named fields or as tuples
	pub output_mode: OutputMode,
	/// If a sequence turns out to be longer than this during decoding, we
	/// will throw an error instead.
	///
	/// This is to avoid running into an infinite loop at decoding time.
	/// Default for this is `1 000 000 000` (~1s CPU time)
	pub max_seq_size: usize,
	/// If a datum turns out to be deeper than this during decoding, we will
	/// throw an error instead.
	///
	/// This is to avoid running into a stack overflow at decoding time.
	/// Default for this is `64`.
	pub allowed_depth: usize,
	/// If a `bytes`, `string` or `fixed` turns out to be longer than this,
	/// we will throw an error instead of trying to allocate it.
	///
	/// Default for this is `512MB`
	pub max_alloc_size: usize,
}

impl<'s> DecoderConfig<'s> {
	/// Construct a `DecoderConfig` from a schema, otherwise initializing
	/// all other parameters to their default values
	pub fn new(schema: &'s Schema, output_mode: OutputMode) -> Self {
		Self::from_schema_node(schema.root(), output_mode)
	}

	pub(crate) fn from_schema_node(schema_root: &'s SchemaNode, output_mode: OutputMode) -> Self {
		Self {
			schema_root,
			output_mode,
			max_seq_size: 1_000_000_000,
			allowed_depth: 64,
			max_alloc_size: 512 * 1024 * 1024,
		}
	}

	/// The schema node every top-level datum conforms to
	pub fn schema_root(&self) -> &'s SchemaNode {
		self.schema_root
	}
}

/// All configuration and state necessary for decoding to run
///
/// Notably holds the [`SliceRead`] cursor and a [`DecoderConfig`].
pub struct DecoderState<'s, 'a> {
	pub(crate) reader: SliceRead<'a>,
	config: DecoderConfig<'s>,
}

impl<'s, 'a> DecoderState<'s, 'a> {
	/// Construct a `DecoderState` from a buffer and a [`DecoderConfig`]
	pub fn with_config(buffer: &'a [u8], config: DecoderConfig<'s>) -> Self {
		DecoderState {
			reader: SliceRead::new(buffer),
			config,
		}
	}

	/// Obtain a [`DatumDecoder`] for the next top-level datum
	pub fn decoder<'r>(&'r mut self) -> DatumDecoder<'r, 's, 'a> {
		DatumDecoder {
			schema_node: self.config.schema_root,
			allowed_depth: AllowedDepth::new(self.config.allowed_depth),
			state: self,
		}
	}

	/// Get the configuration that this `DecoderState` uses (that it was
	/// built with)
	pub fn config(&self) -> &DecoderConfig<'s> {
		&self.config
	}
}

impl<'a> std::ops::Deref for DecoderState<'_, 'a> {
	type Target = SliceRead<'a>;
	fn deref(&self) -> &Self::Target {
		&self.reader
	}
}

impl<'a> std::ops::DerefMut for DecoderState<'_, 'a> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.reader
	}
}
