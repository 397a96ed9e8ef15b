use super::*;

use crate::schema::Record;

/// Fields are encoded one after the other in schema order, with no framing
pub(in super::super) fn decode_record<'s>(
	state: &mut DecoderState<'s, '_>,
	record: &'s Record,
	allowed_depth: AllowedDepth,
) -> Result<Value<'s>, DeError> {
	let output_mode = state.config().output_mode;
	let mut fields = Vec::with_capacity(record.fields.len());
	for field in &record.fields {
		let value = match field.schema {
			SchemaNode::Long if field.is_datetime => Value::Timestamp(read_timestamp(state)?),
			ref schema_node => DatumDecoder {
				state: &mut *state,
				schema_node,
				allowed_depth,
			}
			.decode()?,
		};
		fields.push((field.name.as_str(), value));
	}
	Ok(match output_mode {
		OutputMode::Structured => Value::Record(fields),
		OutputMode::Tuple => Value::Tuple(fields.into_iter().map(|(_, value)| value).collect()),
	})
}
