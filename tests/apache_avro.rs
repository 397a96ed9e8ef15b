//! Datums encoded by the apache-avro library, decoded back to back

use {
	apache_avro::types::Value as AvroValue,
	avro_datum_stream::{decode_sequence, OutputMode, Schema, Value},
	lazy_static::lazy_static,
	pretty_assertions::assert_eq,
};

lazy_static! {
	static ref SCHEMAS_TO_VALIDATE: Vec<(&'static str, AvroValue, Value<'static>)> = vec![
		(r#""null""#, AvroValue::Null, Value::Null),
		(r#""boolean""#, AvroValue::Boolean(true), Value::Boolean(true)),
		(
			r#""string""#,
			AvroValue::String("adsfasdf09809dsf-=adsf".to_string()),
			Value::String("adsfasdf09809dsf-=adsf".to_string())
		),
		(
			r#""bytes""#,
			AvroValue::Bytes("12345abcd".to_string().into_bytes()),
			Value::Bytes("12345abcd".to_string().into_bytes())
		),
		(r#""int""#, AvroValue::Int(1234), Value::Int(1234)),
		(r#""int""#, AvroValue::Int(i32::MIN), Value::Int(i32::MIN)),
		(r#""long""#, AvroValue::Long(1234), Value::Long(1234)),
		(r#""long""#, AvroValue::Long(i64::MAX), Value::Long(i64::MAX)),
		(r#""float""#, AvroValue::Float(1234.0), Value::Float(1234.0)),
		(r#""double""#, AvroValue::Double(-0.25), Value::Double(-0.25)),
		(
			r#"{"type": "fixed", "name": "Test", "size": 1}"#,
			AvroValue::Fixed(1, vec![b'B']),
			Value::Fixed(vec![b'B'])
		),
		(
			r#"{"type": "enum", "name": "Test", "symbols": ["A", "B"]}"#,
			AvroValue::Enum(1, "B".to_string()),
			Value::Enum("B")
		),
		(
			r#"{"type": "array", "items": "long"}"#,
			AvroValue::Array(vec![AvroValue::Long(1), AvroValue::Long(3), AvroValue::Long(2)]),
			Value::Array(vec![Value::Long(1), Value::Long(3), Value::Long(2)])
		),
		(
			r#"{"type": "array", "items": "long"}"#,
			AvroValue::Array(vec![]),
			Value::Array(vec![])
		),
		(
			r#"{"type": "map", "values": "long"}"#,
			AvroValue::Map([("a".to_string(), AvroValue::Long(1i64))].into_iter().collect()),
			Value::Map(vec![("a".to_string(), Value::Long(1))])
		),
		(
			r#"["string", "null", "long"]"#,
			AvroValue::Union(1, Box::new(AvroValue::Null)),
			Value::Null
		),
		(
			r#"["string", "null", "long"]"#,
			AvroValue::Union(2, Box::new(AvroValue::Long(-3))),
			Value::Long(-3)
		),
		(
			r#"{"type": "record", "name": "Test", "fields": [{"name": "f", "type": "long"}]}"#,
			AvroValue::Record(vec![("f".to_string(), AvroValue::Long(1))]),
			Value::Record(vec![("f", Value::Long(1))])
		),
		(
			r#"{"type": "record", "name": "LongerRecord", "fields": [{"name": "f", "type": "long"}, {"name": "g", "type": "long"}, {"name": "h", "type": "string"}]}"#,
			AvroValue::Record(vec![
				("f".to_string(), AvroValue::Long(1)),
				("g".to_string(), AvroValue::Long(2)),
				("h".to_string(), AvroValue::String("Abc".to_owned())),
			]),
			Value::Record(vec![
				("f", Value::Long(1)),
				("g", Value::Long(2)),
				("h", Value::String("Abc".to_owned())),
			])
		),
		(
			r#"{"name": "null_or_string","type": ["null", "string"], "default": null}"#,
			AvroValue::Union(1, Box::new(AvroValue::String("value".to_string()))),
			Value::String("value".to_string())
		),
	];
}

#[test]
fn decode_back_to_back() {
	for (raw_schema, avro_value, expected) in SCHEMAS_TO_VALIDATE.iter() {
		let apache_schema = apache_avro::Schema::parse_str(raw_schema).unwrap();
		let schema: Schema = raw_schema.parse().unwrap();

		let datum = apache_avro::to_avro_datum(&apache_schema, avro_value.clone()).unwrap();
		let stream = datum.repeat(3);

		let decoded = decode_sequence(&stream, &schema, OutputMode::Structured).unwrap();
		if datum.is_empty() {
			// Nothing to decode: zero-sized datums can't be delimited
			assert_eq!(decoded.values, Vec::<Value>::new());
		} else {
			assert_eq!(decoded.values, [expected.clone(), expected.clone(), expected.clone()]);
		}
		assert_eq!(decoded.consumed, stream.len());

		// Any strict prefix of a single datum is incomplete
		for end in 0..datum.len() {
			let decoded = decode_sequence(&datum[..end], &schema, OutputMode::Structured).unwrap();
			assert_eq!(decoded.values, Vec::<Value>::new());
			assert_eq!(decoded.consumed, 0);
		}
	}
}

#[test]
fn tuple_output() {
	let raw_schema = r#"{
		"type": "record",
		"name": "Outer",
		"fields": [
			{"name": "a", "type": "int"},
			{"name": "inner", "type": {
				"type": "record",
				"name": "Inner",
				"fields": [{"name": "b", "type": "string"}]
			}}
		]
	}"#;
	let apache_schema = apache_avro::Schema::parse_str(raw_schema).unwrap();
	let schema: Schema = raw_schema.parse().unwrap();
	let datum = apache_avro::to_avro_datum(
		&apache_schema,
		AvroValue::Record(vec![
			("a".to_owned(), AvroValue::Int(7)),
			(
				"inner".to_owned(),
				AvroValue::Record(vec![("b".to_owned(), AvroValue::String("x".to_owned()))]),
			),
		]),
	)
	.unwrap();

	let decoded = decode_sequence(&datum, &schema, OutputMode::Tuple).unwrap();
	assert_eq!(
		decoded.values,
		[Value::Tuple(vec![
			Value::Int(7),
			Value::Tuple(vec![Value::String("x".to_owned())])
		])]
	);

	let decoded = decode_sequence(&datum, &schema, OutputMode::Structured).unwrap();
	assert_eq!(
		decoded.values,
		[Value::Record(vec![
			("a", Value::Int(7)),
			(
				"inner",
				Value::Record(vec![("b", Value::String("x".to_owned()))])
			)
		])]
	);
}
