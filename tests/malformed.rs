//! Hand-written byte sequences: incomplete input versus input that does not
//! match the schema

use {
	avro_datum_stream::{
		de::{DeErrorKind, DecoderConfig},
		decode_sequence, from_datum_slice, OutputMode, Schema, Value,
	},
	pretty_assertions::assert_eq,
};

fn schema(json: &str) -> Schema {
	json.parse().unwrap()
}

fn error_kind(schema: &Schema, bytes: &[u8]) -> DeErrorKind {
	from_datum_slice(bytes, schema, OutputMode::Structured)
		.unwrap_err()
		.kind()
}

#[test]
fn unterminated_varint() {
	let long = schema(r#""long""#);
	for len in 1..10 {
		assert_eq!(
			error_kind(&long, &vec![0x80u8; len]),
			DeErrorKind::InsufficientBytes
		);
	}
	assert_eq!(error_kind(&long, &[0x80; 10]), DeErrorKind::Malformed);
	assert_eq!(error_kind(&long, &[0x80; 15]), DeErrorKind::Malformed);

	let decoded = decode_sequence(&[0x02, 0x80, 0x80], &long, OutputMode::Structured).unwrap();
	assert_eq!(decoded.values, [Value::Long(1)]);
	assert_eq!(decoded.consumed, 1);
}

#[test]
fn int_out_of_range() {
	let int = schema(r#""int""#);
	// zig-zag of 2^31
	assert_eq!(
		error_kind(&int, &[0x80, 0x80, 0x80, 0x80, 0x10]),
		DeErrorKind::Malformed
	);
	assert_eq!(
		from_datum_slice(&[0xFE, 0xFF, 0xFF, 0xFF, 0x0F], &int, OutputMode::Structured).unwrap(),
		Value::Int(i32::MAX)
	);
}

#[test]
fn invalid_union_index() {
	let union = schema(r#"["null", "string"]"#);
	assert_eq!(error_kind(&union, &[4]), DeErrorKind::Malformed);
	// -1
	assert_eq!(error_kind(&union, &[1]), DeErrorKind::Malformed);
	assert_eq!(
		from_datum_slice(&[4], &union, OutputMode::Structured)
			.unwrap_err()
			.to_string(),
		"Could not find union discriminant 2 in schema (union has 2 variants)"
	);
}

#[test]
fn invalid_enum_index() {
	let enum_ = schema(r#"{"type": "enum", "name": "ns.E", "symbols": ["A", "B"]}"#);
	assert_eq!(
		from_datum_slice(&[2], &enum_, OutputMode::Structured).unwrap(),
		Value::Enum("B")
	);
	assert_eq!(
		from_datum_slice(&[4], &enum_, OutputMode::Structured)
			.unwrap_err()
			.to_string(),
		"Could not find enum discriminant 2 in schema for enum ns.E"
	);
	assert_eq!(error_kind(&enum_, &[3]), DeErrorKind::Malformed);
}

#[test]
fn negative_length() {
	let string = schema(r#""string""#);
	assert_eq!(error_kind(&string, &[1]), DeErrorKind::Malformed);
	let bytes = schema(r#""bytes""#);
	assert_eq!(error_kind(&bytes, &[3, 0]), DeErrorKind::Malformed);
}

#[test]
fn invalid_utf8() {
	let string = schema(r#""string""#);
	assert_eq!(error_kind(&string, &[4, 0xC3, 0x28]), DeErrorKind::Malformed);
	// A truncated string is incomplete, whatever its content
	assert_eq!(error_kind(&string, &[6, 0xC3, 0x28]), DeErrorKind::InsufficientBytes);
}

#[test]
fn booleans() {
	let boolean = schema(r#""boolean""#);
	let decoded = decode_sequence(&[0, 1, 7], &boolean, OutputMode::Structured).unwrap();
	assert_eq!(
		decoded.values,
		[Value::Boolean(false), Value::Boolean(true), Value::Boolean(true)]
	);
}

#[test]
fn fixed_and_floats() {
	let record = schema(
		r#"{
			"type": "record",
			"name": "R",
			"fields": [
				{"name": "f", "type": "float"},
				{"name": "d", "type": "double"},
				{"name": "h", "type": {"type": "fixed", "name": "H", "size": 2}}
			]
		}"#,
	);
	let mut datum = Vec::new();
	datum.extend(1.5f32.to_le_bytes());
	datum.extend((-2.25f64).to_le_bytes());
	datum.extend([0xAB, 0xCD]);
	assert_eq!(
		from_datum_slice(&datum, &record, OutputMode::Tuple).unwrap(),
		Value::Tuple(vec![
			Value::Float(1.5),
			Value::Double(-2.25),
			Value::Fixed(vec![0xAB, 0xCD])
		])
	);
	for end in 0..datum.len() {
		assert_eq!(
			error_kind(&record, &datum[..end]),
			DeErrorKind::InsufficientBytes
		);
	}
}

#[test]
fn blocks_with_negative_counts() {
	let array = schema(r#"{"type": "array", "items": "int"}"#);
	// A block of -2 items of 2 bytes, then a block of 1 item, then the end
	let bytes: &[u8] = &[3, 4, 2, 4, 2, 6, 0];
	assert_eq!(
		from_datum_slice(bytes, &array, OutputMode::Structured).unwrap(),
		Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
	);
	// Stopping anywhere before the terminating block is incomplete
	for end in 0..bytes.len() {
		assert_eq!(
			error_kind(&array, &bytes[..end]),
			DeErrorKind::InsufficientBytes
		);
	}

	let map = schema(r#"{"type": "map", "values": "boolean"}"#);
	// A block of -2 entries of 6 bytes, then the end
	let bytes: &[u8] = &[3, 12, 2, b'b', 1, 2, b'a', 0, 0];
	assert_eq!(
		from_datum_slice(bytes, &map, OutputMode::Structured).unwrap(),
		Value::Map(vec![
			("b".to_owned(), Value::Boolean(true)),
			("a".to_owned(), Value::Boolean(false)),
		])
	);
}

#[test]
fn max_seq_size() {
	let array = schema(r#"{"type": "array", "items": "null"}"#);
	let mut config = DecoderConfig::new(&array, OutputMode::Structured);
	config.max_seq_size = 3;
	assert_eq!(
		config.decode_datum(&[6, 0]).unwrap(),
		Value::Array(vec![Value::Null; 3])
	);
	let err = config.decode_datum(&[4, 4, 0]).unwrap_err();
	assert_eq!(err.kind(), DeErrorKind::Malformed);
	assert_eq!(err.to_string(), "Exceeding max sequence size while decoding");
}

#[test]
fn max_alloc_size() {
	let bytes = schema(r#""bytes""#);
	let mut config = DecoderConfig::new(&bytes, OutputMode::Structured);
	config.max_alloc_size = 2;
	assert_eq!(
		config.decode_datum(&[4, 1, 2]).unwrap(),
		Value::Bytes(vec![1, 2])
	);
	// Rejected before even looking for the content
	assert_eq!(
		config.decode_datum(&[6]).unwrap_err().kind(),
		DeErrorKind::Malformed
	);
}

#[test]
fn max_depth_prevents_stack_overflow() {
	let depth = 20;
	let json = (0..depth).fold(r#""null""#.to_owned(), |items, _| {
		format!(r#"{{"type": "array", "items": {items}}}"#)
	});
	let nested = schema(&json);
	// Each level holds a single element, the innermost is a null
	let mut datum = vec![2u8; depth];
	datum.extend(vec![0u8; depth]);

	let mut config = DecoderConfig::new(&nested, OutputMode::Structured);
	assert!(config.decode_datum(&datum).is_ok());

	config.allowed_depth = 10;
	let err = config.decode_datum(&datum).unwrap_err();
	assert_eq!(
		err.to_string(),
		"Decoding recursivity limit reached (stack overflow prevention)"
	);
	assert_eq!(err.kind(), DeErrorKind::Malformed);
}
