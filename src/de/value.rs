use chrono::{DateTime, SecondsFormat, Utc};

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A decoded avro datum
///
/// Strings that come from the schema (record field names, enum symbols) are
/// borrowed from the [`Schema`](crate::Schema), while everything read from
/// the input buffer is owned, so values outlive the buffer they were decoded
/// from.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<'s> {
	/// A `null` Avro value
	Null,
	/// A `boolean` Avro value
	Boolean(bool),
	/// An `int` Avro value
	Int(i32),
	/// A `long` Avro value
	Long(i64),
	/// A `float` Avro value
	Float(f32),
	/// A `double` Avro value
	Double(f64),
	/// A `bytes` Avro value
	Bytes(Vec<u8>),
	/// A `string` Avro value
	String(String),
	/// A `fixed` Avro value
	Fixed(Vec<u8>),
	/// The symbol of an `enum` Avro value
	Enum(&'s str),
	/// An `array` Avro value
	Array(Vec<Value<'s>>),
	/// A `map` Avro value, with entries in the order they were encoded
	Map(Vec<(String, Value<'s>)>),
	/// A `record` Avro value decoded in
	/// [`OutputMode::Structured`](super::OutputMode::Structured): field names
	/// and values in schema order
	Record(Vec<(&'s str, Value<'s>)>),
	/// A `record` Avro value decoded in
	/// [`OutputMode::Tuple`](super::OutputMode::Tuple): field values in schema
	/// order
	Tuple(Vec<Value<'s>>),
	/// A `long` Avro value flagged as nanoseconds since the Unix epoch
	Timestamp(DateTime<Utc>),
}

impl<'s> Value<'s> {
	/// Look up a field of a [`Value::Record`] by name
	///
	/// Returns `None` for any other kind of value.
	pub fn field(&self, name: &str) -> Option<&Value<'s>> {
		match self {
			Value::Record(fields) => fields
				.iter()
				.find_map(|(field_name, value)| (*field_name == name).then_some(value)),
			_ => None,
		}
	}
}

/// Records and maps serialize as maps, tuples and arrays as sequences, and
/// timestamps as RFC 3339 strings
impl Serialize for Value<'_> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Value::Null => serializer.serialize_unit(),
			Value::Boolean(v) => serializer.serialize_bool(*v),
			Value::Int(v) => serializer.serialize_i32(*v),
			Value::Long(v) => serializer.serialize_i64(*v),
			Value::Float(v) => serializer.serialize_f32(*v),
			Value::Double(v) => serializer.serialize_f64(*v),
			Value::Bytes(v) | Value::Fixed(v) => serializer.serialize_bytes(v),
			Value::String(v) => serializer.serialize_str(v),
			Value::Enum(v) => serializer.serialize_str(v),
			Value::Array(values) | Value::Tuple(values) => {
				let mut seq = serializer.serialize_seq(Some(values.len()))?;
				for value in values {
					seq.serialize_element(value)?;
				}
				seq.end()
			}
			Value::Map(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
			Value::Record(fields) => {
				let mut map = serializer.serialize_map(Some(fields.len()))?;
				for (name, value) in fields {
					map.serialize_entry(name, value)?;
				}
				map.end()
			}
			Value::Timestamp(v) => {
				serializer.serialize_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
			}
		}
	}
}
