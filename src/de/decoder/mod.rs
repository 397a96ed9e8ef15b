mod allowed_depth;
mod types;

pub(crate) use allowed_depth::AllowedDepth;

use {
	super::*,
	types::*,
};

/// Decodes a single datum against a schema node
///
/// It is essentially an `&mut DecoderState` that also keeps track of where
/// in the schema we currently are.
///
/// Obtain one through [`DecoderState::decoder`].
pub struct DatumDecoder<'r, 's, 'a> {
	pub(super) state: &'r mut DecoderState<'s, 'a>,
	pub(super) schema_node: &'s SchemaNode,
	pub(super) allowed_depth: AllowedDepth,
}

impl<'r, 's, 'a> DatumDecoder<'r, 's, 'a> {
	/// Decode the datum at the current position, advancing the cursor past it
	///
	/// On error the cursor position is unspecified: callers that want to retry
	/// with more input should remember the position they started from.
	pub fn decode(self) -> Result<Value<'s>, DeError> {
		let schema_node: &'s SchemaNode = self.schema_node;
		Ok(match *schema_node {
			SchemaNode::Null => Value::Null,
			SchemaNode::Boolean => Value::Boolean(read_bool(self.state)?),
			SchemaNode::Int => Value::Int(read_int(self.state)?),
			SchemaNode::Long => Value::Long(self.state.read_varint()?),
			SchemaNode::Float => Value::Float(f32::from_le_bytes(
				self.state.read_const_size_buf()?,
			)),
			SchemaNode::Double => Value::Double(f64::from_le_bytes(
				self.state.read_const_size_buf()?,
			)),
			SchemaNode::Bytes => Value::Bytes(read_length_delimited(self.state)?.to_owned()),
			SchemaNode::String => Value::String(read_str(self.state)?.to_owned()),
			SchemaNode::Fixed(ref fixed) => {
				Value::Fixed(read_fixed(self.state, fixed.size)?.to_owned())
			}
			SchemaNode::Enum(ref enum_) => Value::Enum(read_enum_as_str(self.state, enum_)?),
			SchemaNode::Union(ref union) => {
				let variant_schema = read_union_discriminant(self.state, union)?;
				Self {
					schema_node: variant_schema,
					allowed_depth: self.allowed_depth.dec()?,
					state: self.state,
				}
				.decode()?
			}
			SchemaNode::Array(ref elements_schema) => {
				let mut block_reader = BlockReader::new(self.state, self.allowed_depth.dec()?);
				let mut elements = Vec::new();
				while let Some(element) = block_reader.next_value(elements_schema)? {
					elements.push(element);
				}
				Value::Array(elements)
			}
			SchemaNode::Map(ref values_schema) => {
				let mut block_reader = BlockReader::new(self.state, self.allowed_depth.dec()?);
				let mut entries = Vec::new();
				while let Some(entry) = block_reader.next_entry(values_schema)? {
					entries.push(entry);
				}
				Value::Map(entries)
			}
			SchemaNode::Record(ref record) => {
				decode_record(self.state, record, self.allowed_depth.dec()?)?
			}
		})
	}
}
