//! Navigate and initialize the [`Schema`]

mod error;
mod parsing;

pub use error::SchemaError;

/// Main Schema type, an immutable representation of an Avro schema
///
/// Unlike general Avro schemas, this is always a finite tree: named types may
/// be referenced again after they are defined, but a type may never contain
/// itself, directly or transitively. Such schemas are rejected at
/// construction.
///
/// A `Schema` is never mutated after construction, so it can be shared
/// across threads and used by any number of concurrent decode calls.
#[derive(Debug)]
pub struct Schema {
	root: SchemaNode,
	schema_json: String,
}

impl std::str::FromStr for Schema {
	type Err = SchemaError;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (root, schema_json) = parsing::parse_schema(s)?;
		Ok(Self { root, schema_json })
	}
}

impl Schema {
	/// The root node of the schema tree
	///
	/// For a stream of records, this is the record that every top-level value
	/// conforms to.
	pub fn root(&self) -> &SchemaNode {
		&self.root
	}

	/// Obtain the (minified) JSON this schema was parsed from
	pub fn json(&self) -> &str {
		&self.schema_json
	}

	/// Override the datetime flag of each top-level record field
	///
	/// `datetime_flags[i]` applies to the `i`-th field of the root record.
	/// Fields for which the flag is set and whose type is `long` decode as
	/// [`Value::Timestamp`](crate::de::Value::Timestamp) (nanoseconds since
	/// the Unix epoch).
	///
	/// This fails if the root is not a record, or if the number of flags does
	/// not match its number of fields.
	pub fn with_datetime_flags(mut self, datetime_flags: &[bool]) -> Result<Self, SchemaError> {
		let record = match self.root {
			SchemaNode::Record(ref mut record) => record,
			_ => {
				return Err(SchemaError::new(
					"Datetime flags can only be provided for a schema whose root is a record",
				))
			}
		};
		if record.fields.len() != datetime_flags.len() {
			return Err(SchemaError::msg(format_args!(
				"Got {} datetime flags but the root record {} has {} fields",
				datetime_flags.len(),
				record.name.fully_qualified_name(),
				record.fields.len()
			)));
		}
		for (field, &is_datetime) in record.fields.iter_mut().zip(datetime_flags) {
			field.is_datetime = is_datetime;
		}
		Ok(self)
	}
}

/// Build a [`Schema`] from its JSON representation, optionally overriding the
/// datetime flags of the top-level record fields
///
/// See [`Schema::with_datetime_flags`].
///
/// ```
/// let schema = avro_datum_stream::compile_schema(
/// 	r#"{
/// 		"type": "record",
/// 		"name": "Event",
/// 		"fields": [
/// 			{"name": "id", "type": "long"},
/// 			{"name": "at", "type": "long"}
/// 		]
/// 	}"#,
/// 	Some(&[false, true]),
/// )
/// .expect("Failed to compile schema");
///
/// match schema.root() {
/// 	avro_datum_stream::schema::SchemaNode::Record(record) => {
/// 		assert!(!record.fields[0].is_datetime);
/// 		assert!(record.fields[1].is_datetime);
/// 	}
/// 	_ => unreachable!(),
/// }
/// ```
pub fn compile_schema(
	schema_json: &str,
	datetime_flags: Option<&[bool]>,
) -> Result<Schema, SchemaError> {
	let schema: Schema = schema_json.parse()?;
	match datetime_flags {
		None => Ok(schema),
		Some(datetime_flags) => schema.with_datetime_flags(datetime_flags),
	}
}

/// A node of an avro schema, owned by a [`Schema`]
///
/// More information about Avro schemas can be found in the
/// [Avro Specification](https://avro.apache.org/docs/current/specification/).
#[derive(Clone, Debug)]
pub enum SchemaNode {
	/// A `null` Avro schema.
	Null,
	/// A `boolean` Avro schema.
	Boolean,
	/// An `int` Avro schema.
	Int,
	/// A `long` Avro schema.
	Long,
	/// A `float` Avro schema.
	Float,
	/// A `double` Avro schema.
	Double,
	/// A `bytes` Avro schema.
	/// `Bytes` represents a sequence of 8-bit unsigned bytes.
	Bytes,
	/// A `string` Avro schema.
	/// `String` represents a unicode character sequence.
	String,
	/// A `array` Avro schema. Avro arrays are required to have the same type
	/// for each element. This variant holds the schema for the array element
	/// type.
	Array(Box<SchemaNode>),
	/// A `map` Avro schema.
	/// `Map` holds the schema of its values, which must all be the same
	/// schema. `Map` keys are assumed to be `string`.
	Map(Box<SchemaNode>),
	/// A `union` Avro schema.
	///
	/// Values of a union decode to the value of the selected variant.
	Union(Union),
	/// A `record` Avro schema.
	Record(Record),
	/// An `enum` Avro schema.
	///
	/// Values of an enum decode to the symbol selected by the encoded index.
	Enum(Enum),
	/// A `fixed` Avro schema.
	Fixed(Fixed),
}

/// Component of a [`SchemaNode`]
#[derive(Clone, Debug)]
pub struct Union {
	/// The schemas of each variant that this Avro *union* supports, in
	/// declaration order (the encoded discriminant indexes into this)
	pub variants: Vec<SchemaNode>,
}

/// Component of a [`SchemaNode`]
///
/// An avro `record` is ~equivalent to a Rust struct.
#[derive(Clone, Debug)]
pub struct Record {
	/// The list of fields in this *record*, in the order they are encoded
	pub fields: Vec<RecordField>,
	/// The name of the record (including namespace)
	pub name: Name,
}

/// Component of a [`SchemaNode`]
#[derive(Clone, Debug)]
pub struct RecordField {
	/// Name of the field
	pub name: String,
	/// The schema of the type of this field
	pub schema: SchemaNode,
	/// Whether this field is a `long` that holds nanoseconds since the Unix
	/// epoch, and should be decoded as a timestamp
	///
	/// Has no effect if `schema` is not [`SchemaNode::Long`].
	pub is_datetime: bool,
}

/// Component of a [`SchemaNode`]
#[derive(Clone, Debug)]
pub struct Enum {
	/// All the symbols of the enum (e.g. `["CLUBS", "HEARTS"]`)
	pub symbols: Vec<String>,
	/// The name of the enum (including namespace)
	pub name: Name,
}

/// Component of a [`SchemaNode`]
#[derive(Clone, Debug)]
pub struct Fixed {
	/// The size in bytes of the *fixed* type
	pub size: usize,
	/// The name of the *fixed* type, including the namespace
	pub name: Name,
}

/// Schema component for named nodes of a [`SchemaNode`]
///
/// This holds both the "name" and the "namespace".
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Name {
	fully_qualified_name: String,
	namespace_delimiter_idx: Option<usize>,
}

impl std::fmt::Debug for Name {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		std::fmt::Debug::fmt(&self.fully_qualified_name, f)
	}
}

impl Name {
	/// The rightmost component of the fully qualified name
	///
	/// e.g. in `a.b.c` it's `c`
	pub fn name(&self) -> &str {
		match self.namespace_delimiter_idx {
			None => &self.fully_qualified_name,
			Some(delimiter_idx) => &self.fully_qualified_name[delimiter_idx + 1..],
		}
	}

	/// The namespace component of the fully qualified name
	///
	/// e.g. in `a.b.c` it's `a.b`
	pub fn namespace(&self) -> Option<&str> {
		self.namespace_delimiter_idx
			.map(|idx| &self.fully_qualified_name[..idx])
	}

	/// The fully qualified name
	///
	/// e.g. in `a.b.c` it's `a.b.c`
	pub fn fully_qualified_name(&self) -> &str {
		&self.fully_qualified_name
	}
}
