use super::*;

use crate::schema::{Enum, Union};

pub(super) fn read_discriminant(state: &mut DecoderState<'_, '_>) -> Result<usize, DeError> {
	let discriminant: i64 = state.read_varint()?;
	discriminant
		.try_into()
		.map_err(|_| DeError::custom(format_args!("Negative discriminant in stream: {discriminant}")))
}

pub(in super::super) fn read_union_discriminant<'s>(
	state: &mut DecoderState<'_, '_>,
	union: &'s Union,
) -> Result<&'s SchemaNode, DeError> {
	let discriminant = read_discriminant(state)?;
	union.variants.get(discriminant).ok_or_else(|| {
		DeError::custom(format_args!(
			"Could not find union discriminant {discriminant} in schema (union has {} variants)",
			union.variants.len()
		))
	})
}

pub(in super::super) fn read_enum_as_str<'s>(
	state: &mut DecoderState<'_, '_>,
	enum_: &'s Enum,
) -> Result<&'s str, DeError> {
	let discriminant = read_discriminant(state)?;
	match enum_.symbols.get(discriminant) {
		Some(symbol) => Ok(symbol.as_str()),
		None => Err(DeError::custom(format_args!(
			"Could not find enum discriminant {discriminant} in schema for enum {}",
			enum_.name.fully_qualified_name()
		))),
	}
}
